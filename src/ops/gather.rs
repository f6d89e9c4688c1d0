use crate::errors::ShapeError;
use crate::shape::{resolve_axis, Shape};

/// Compute the output shape of gathering elements along `axis`.
///
/// The first shape describes the data tensor and the second the indices
/// tensor; the gathered axis takes the indices' element count. The fixed
/// rank means the indices' own layout is irrelevant beyond its size.
pub fn gather(shapes: &[Shape], axis: i32) -> Result<Shape, ShapeError> {
    let [data, indices] = shapes else {
        return Err(ShapeError::PreconditionViolation(
            "gather requires a data shape and an indices shape",
        ));
    };
    let axis = resolve_axis(axis)?;

    Ok(data.with_size(axis, indices.len()))
}
