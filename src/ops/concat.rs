use smallvec::SmallVec;

use crate::errors::ShapeError;
use crate::shape::{resolve_axis, Shape};
use crate::tensor::Tensor;

/// Compute the shape produced by concatenating tensors along `axis`.
///
/// All shapes must be equal once the concatenation axis is ignored;
/// otherwise the first disagreeing pair is reported. The result is the
/// first shape with the concatenation axis set to the summed size. An empty
/// input list yields the zeroed default shape.
pub fn concat(shapes: &[Shape], axis: i32) -> Result<Shape, ShapeError> {
    let Some((first, rest)) = shapes.split_first() else {
        return Ok(Shape::default());
    };
    let axis = resolve_axis(axis)?;

    let off_axis = first.with_size(axis, 0);
    let mut total = first[axis];
    for other in rest {
        if other.with_size(axis, 0) != off_axis {
            return Err(ShapeError::ShapeMismatch {
                expected: *first,
                actual: *other,
            });
        }
        total += other[axis];
    }

    Ok(first.with_size(axis, total))
}

/// Compute the elementwise maximum of a non-empty list of shapes.
///
/// This is the broadcast-compatible result shape for elementwise operators
/// whose inputs may have size-1 axes.
pub fn max_shape(shapes: &[Shape]) -> Result<Shape, ShapeError> {
    let Some((first, rest)) = shapes.split_first() else {
        return Err(ShapeError::PreconditionViolation(
            "max requires at least one shape",
        ));
    };

    let mut dims = first.dims();
    for other in rest {
        for (size, &other_size) in dims.iter_mut().zip(other.dims().iter()) {
            *size = (*size).max(other_size);
        }
    }
    Ok(Shape::new(dims))
}

/// [`max_shape`] over the shapes of a list of tensors.
pub fn max_tensor_shape<T: Tensor>(tensors: &[T]) -> Result<Shape, ShapeError> {
    let shapes: SmallVec<[Shape; 4]> = tensors.iter().map(|tensor| tensor.shape()).collect();
    max_shape(&shapes)
}
