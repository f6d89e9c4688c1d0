use crate::errors::ShapeError;
use crate::shape::{resolve_axis, Shape};
use crate::tensor::Tensor;

/// Compute the output shape of a reduction over one axis.
///
/// The resolved axis is set to 1 and all other axes are unchanged. The
/// reduced axis is retained rather than removed, since shapes always carry
/// the full set of axes.
pub fn reduce(shape: Shape, axis: i32) -> Result<Shape, ShapeError> {
    let axis = resolve_axis(axis)?;
    Ok(shape.with_size(axis, 1))
}

/// Return the index of the maximum element within each group along the
/// trailing channel axis.
///
/// The channel axis is always last, so the input's elements form
/// `len / channels` contiguous groups of `channels` elements each. Ties
/// resolve to the first maximal element.
pub fn arg_max<T: Tensor + ?Sized>(input: &T) -> Result<Vec<i32>, ShapeError> {
    let channels = input.shape().channels();
    if channels == 0 {
        return Err(ShapeError::PreconditionViolation(
            "cannot select an index from an empty channel axis",
        ));
    }

    let mut indices = Vec::with_capacity(input.len() / channels);
    for group in 0..input.len() / channels {
        let first = group * channels;
        let mut max_index = 0;
        let mut max_value = input.at(first);
        for offset in 1..channels {
            let value = input.at(first + offset);
            if value > max_value {
                max_index = offset;
                max_value = value;
            }
        }
        indices.push(max_index as i32);
    }
    Ok(indices)
}
