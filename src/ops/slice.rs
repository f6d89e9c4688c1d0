use crate::errors::ShapeError;
use crate::nhwc::normalize_params;
use crate::shape::{Shape, RANK};

/// Resolve a possibly-negative range endpoint against an axis of `size`
/// elements.
///
/// Negative values count backwards from the end of the axis, following
/// NumPy-style slicing. The result is clamped to `[0, size]`; `size` itself
/// is kept as-is so ranges can express an open upper bound.
fn wrap_index(index: i32, size: i32) -> i32 {
    let index = if index < 0 { index + size } else { index };
    index.clamp(0, size)
}

/// Compute the output shape of a strided slice.
///
/// `starts`, `ends` and `strides` may each use the 4-axis or 8-axis
/// convention; 4-entry arrays are promoted with defaults 0, 1 and 1
/// respectively, so filler axes pass through unchanged.
///
/// Per axis:
///
/// - `starts[i] == ends[i]` is the no-slicing sentinel and keeps the
///   current axis size (so `start=0, end=0, stride=1` selects the full
///   axis).
/// - Otherwise the selected interval is `wrap(ends[i]) - wrap(starts[i])`.
/// - A nonzero stride smaller than the axis size then divides the interval;
///   a stride of 0, or one at least as large as the axis, collapses the
///   axis to a single element regardless of the start position.
///
/// Negative strides (reverse traversal) are not supported and fail rather
/// than guessing.
pub fn strided_slice(
    shape: Shape,
    starts: &[i32],
    ends: &[i32],
    strides: &[i32],
) -> Result<Shape, ShapeError> {
    let starts = normalize_params(starts, shape, 0)?;
    let ends = normalize_params(ends, shape, 1)?;
    let strides = normalize_params(strides, shape, 1)?;

    let mut dims = [0; RANK];
    for i in 0..RANK {
        let size = shape[i] as i32;
        let stride = strides[i];
        if stride < 0 {
            return Err(ShapeError::UnsupportedFeature(
                "negative slice strides are not supported",
            ));
        }

        let start = wrap_index(starts[i], size);
        if start >= size {
            return Err(ShapeError::PreconditionViolation(
                "slice start is beyond the end of the axis",
            ));
        }

        let mut sliced = if starts[i] == ends[i] {
            size
        } else {
            wrap_index(ends[i], size) - start
        };

        if stride != 0 && stride < size {
            sliced /= stride;
        } else {
            // Degenerate stride: shrink to a single element. The start
            // offset is deliberately ignored here, matching the reference
            // operator.
            sliced = 1;
        }

        if sliced < 0 {
            sliced += size;
        }
        dims[i] = sliced.max(0) as usize;
    }

    Ok(Shape::new(dims))
}
