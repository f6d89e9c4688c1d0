use crate::errors::ShapeError;
use crate::nhwc::{normalize_params, promote_permutation};
use crate::shape::{Shape, RANK};

/// Compute the shape produced by reshaping `shape` to `sizes`.
///
/// Entries of `sizes` are interpreted per the reference reshape operator:
/// `0` keeps the corresponding existing axis size, a negative value marks
/// the (at most one) dimension whose size is inferred from the input's
/// element count, and anything else is a literal target size. A 4-entry
/// `sizes` is normalized first, with the filler axes keeping their sizes.
pub fn reshape(shape: Shape, sizes: &[i32]) -> Result<Shape, ShapeError> {
    let sizes = normalize_params(sizes, shape, 0)?;

    let mut unspecified_dim = None;
    let mut specified_len = 1usize;
    for (dim, &size) in sizes.iter().enumerate() {
        if size == 0 {
            specified_len *= shape[dim];
        } else if size > 0 {
            specified_len *= size as usize;
        } else if unspecified_dim.is_some() {
            return Err(ShapeError::InvalidReshape(
                "multiple dimensions in new shape are unspecified",
            ));
        } else {
            unspecified_dim = Some(dim);
        }
    }

    let input_len = shape.len();
    let unspecified_size = match unspecified_dim {
        None => {
            if specified_len != input_len {
                return Err(ShapeError::InvalidReshape(
                    "new shape has a different element count",
                ));
            }
            0
        }
        Some(_) => {
            if specified_len == 0 || input_len % specified_len != 0 {
                return Err(ShapeError::InvalidReshape(
                    "element count is not a multiple of the specified sizes",
                ));
            }
            input_len / specified_len
        }
    };

    let mut dims = [0; RANK];
    for (dim, &size) in sizes.iter().enumerate() {
        dims[dim] = if size == 0 {
            shape[dim]
        } else if size > 0 {
            size as usize
        } else {
            unspecified_size
        };
    }
    Ok(Shape::new(dims))
}

/// Multiply each axis of `shape` by the corresponding factor.
///
/// 4-entry factor arrays apply to the batch/height/width/channel axes and
/// leave the filler axes alone.
pub fn scale(shape: Shape, factors: &[i32]) -> Result<Shape, ShapeError> {
    let factors = normalize_params(factors, shape, 1)?;

    let mut dims = shape.dims();
    for (size, &factor) in dims.iter_mut().zip(factors.iter()) {
        if factor < 0 {
            return Err(ShapeError::PreconditionViolation(
                "scale factor is negative",
            ));
        }
        *size *= factor as usize;
    }
    Ok(Shape::new(dims))
}

/// Compute the shape produced by permuting the axes of `shape`.
///
/// Output axis `i` takes the size of input axis `perm[i]`, or size 1 when
/// `perm[i]` is negative (a new axis). A 4-entry permutation is expanded to
/// the 8-axis layout first, with the filler axes mapping to themselves.
pub fn permute(shape: Shape, perm: &[i32]) -> Result<Shape, ShapeError> {
    let perm: [i32; RANK] = match perm.len() {
        RANK => {
            let mut out = [0; RANK];
            out.copy_from_slice(perm);
            out
        }
        _ => promote_permutation(perm)?,
    };

    let mut dims = [0; RANK];
    for (dim, &source) in perm.iter().enumerate() {
        dims[dim] = if source < 0 {
            1
        } else if (source as usize) < RANK {
            shape[source as usize]
        } else {
            return Err(ShapeError::PreconditionViolation(
                "permutation entry is out of range",
            ));
        };
    }
    Ok(Shape::new(dims))
}
