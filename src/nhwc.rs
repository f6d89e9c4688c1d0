//! Conversion between the 4-axis (batch, height, width, channel) parameter
//! convention and the fixed 8-axis representation.
//!
//! Many operator parameters are written against the 4-axis view of a shape.
//! Whether a parameter array uses the 4-axis or 8-axis convention is
//! detected from its length, and that detection happens only here:
//! operators call [`normalize_params`] once at their boundary and work with
//! 8-entry arrays from then on.

use crate::errors::ShapeError;
use crate::shape::{Axis, Shape, RANK};

/// Number of axes in the legacy (batch, height, width, channel) convention.
pub const NHWC_RANK: usize = 4;

/// Positions of the 4-axis convention's entries within the 8-axis layout.
const NHWC_AXES: [usize; NHWC_RANK] = [
    Axis::Batch as usize,
    Axis::Height as usize,
    Axis::Width as usize,
    Axis::Channel as usize,
];

/// Expand a 4-entry parameter array to the 8-axis layout.
///
/// The four values land in the batch/height/width/channel positions and the
/// remaining axes take `fill`. Fails if `shape` has no 4-axis view, since
/// the parameters would then apply to axes the caller never saw.
pub fn promote_params(
    values: &[i32],
    shape: Shape,
    fill: i32,
) -> Result<[i32; RANK], ShapeError> {
    if values.len() != NHWC_RANK {
        return Err(ShapeError::PreconditionViolation(
            "expected 4 parameter entries",
        ));
    }
    if !shape.is_nhwc_compatible() {
        return Err(ShapeError::PreconditionViolation(
            "shape has no 4-axis view; cannot apply 4-axis parameters",
        ));
    }

    let mut out = [fill; RANK];
    for (slot, &value) in NHWC_AXES.iter().zip(values) {
        out[*slot] = value;
    }
    Ok(out)
}

/// Extract the 4-axis view of an 8-entry parameter array.
///
/// The inverse of [`promote_params`]; the same shape-compatibility rule
/// applies.
pub fn demote_params(values: &[i32], shape: Shape) -> Result<[i32; NHWC_RANK], ShapeError> {
    if values.len() != RANK {
        return Err(ShapeError::PreconditionViolation(
            "expected 8 parameter entries",
        ));
    }
    if !shape.is_nhwc_compatible() {
        return Err(ShapeError::PreconditionViolation(
            "shape has no 4-axis view; cannot extract 4-axis parameters",
        ));
    }

    let mut out = [0; NHWC_RANK];
    for (value, slot) in out.iter_mut().zip(NHWC_AXES) {
        *value = values[slot];
    }
    Ok(out)
}

/// Normalize a parameter array given in either convention to the 8-axis
/// layout, promoting 4-entry arrays with `fill` for the introduced axes.
pub fn normalize_params(
    values: &[i32],
    shape: Shape,
    fill: i32,
) -> Result<[i32; RANK], ShapeError> {
    match values.len() {
        RANK => {
            let mut out = [0; RANK];
            out.copy_from_slice(values);
            Ok(out)
        }
        NHWC_RANK => promote_params(values, shape, fill),
        _ => Err(ShapeError::PreconditionViolation(
            "parameter list must have 4 or 8 entries",
        )),
    }
}

/// Convert an axis index from the 4-axis convention to the 8-axis layout.
///
/// Negative (backward) indices are rank-agnostic and pass through
/// unchanged. Axis 0 maps to the batch position and axes 1-3 map to
/// height/width/channel.
pub fn promote_axis(axis: i32) -> Result<i32, ShapeError> {
    if axis < 0 {
        return Ok(axis);
    }
    match axis as usize {
        0..=3 => Ok(NHWC_AXES[axis as usize] as i32),
        _ => Err(ShapeError::PreconditionViolation(
            "axis is out of range for the 4-axis convention",
        )),
    }
}

/// Convert an 8-axis index back to the 4-axis convention.
///
/// Only the batch axis and the trailing height/width/channel block have a
/// 4-axis equivalent; converting any other axis (eg. sequence or depth)
/// fails. Negative indices pass through unchanged.
pub fn demote_axis(axis: i32) -> Result<i32, ShapeError> {
    if axis < 0 {
        return Ok(axis);
    }
    match axis as usize {
        a if a == Axis::Batch as usize => Ok(0),
        a if (Axis::Height as usize..=Axis::Channel as usize).contains(&a) => {
            Ok(axis - Axis::Height as i32 + 1)
        }
        _ => Err(ShapeError::PreconditionViolation(
            "axis has no equivalent in the 4-axis convention",
        )),
    }
}

/// Expand a 4-entry permutation to the 8-axis layout.
///
/// Each source entry is converted through [`promote_axis`] and spliced into
/// the batch/height/width/channel positions; the four filler axes map to
/// themselves. Negative entries (new size-1 axes) pass through unchanged.
pub fn promote_permutation(perm: &[i32]) -> Result<[i32; RANK], ShapeError> {
    if perm.len() != NHWC_RANK {
        return Err(ShapeError::PreconditionViolation(
            "expected 4 permutation entries",
        ));
    }

    let mut out = [
        Axis::Sequence as i32,
        Axis::Direction as i32,
        0,
        Axis::Extra as i32,
        Axis::Depth as i32,
        0,
        0,
        0,
    ];
    for (slot, &source) in NHWC_AXES.iter().zip(perm) {
        out[*slot] = promote_axis(source)?;
    }
    Ok(out)
}
