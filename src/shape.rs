use std::fmt;
use std::ops::Index;

use crate::errors::ShapeError;

/// Number of axes in every shape.
///
/// Shapes always carry the full set of axes. Operators that only care about
/// a subset (typically the batch/height/width/channel block) treat the
/// remaining axes as size-1 placeholders.
pub const RANK: usize = 8;

/// Semantic role of each of the eight fixed axis positions.
///
/// The ordering is part of the runtime's memory layout contract: the channel
/// axis is always last, which reductions over "the last dimension" rely on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Sequence length, for recurrent inputs.
    Sequence = 0,
    /// Number of directions of a recurrent layer.
    Direction = 1,
    Batch = 2,
    /// Extra/time dimension.
    Extra = 3,
    Depth = 4,
    Height = 5,
    Width = 6,
    Channel = 7,
}

/// Resolve an axis given as a value in `[-RANK, RANK-1]` to a zero-based
/// axis position.
///
/// Negative axis values count backwards from the last (channel) axis, so
/// `-1` is the channel axis regardless of how many leading axes are in use.
pub fn resolve_axis(axis: i32) -> Result<usize, ShapeError> {
    let resolved = if axis >= 0 { axis } else { RANK as i32 + axis };
    if (0..RANK as i32).contains(&resolved) {
        Ok(resolved as usize)
    } else {
        Err(ShapeError::PreconditionViolation("axis is out of range"))
    }
}

/// Dimensions of a tensor in the runtime's fixed 8-axis layout.
///
/// `Shape` is an immutable value type: every transform in this crate returns
/// a new shape rather than mutating in place. See [`Axis`] for the meaning
/// of each position.
///
/// A shape doubles as the description of convolution weights. In that role
/// the height and width axes hold the kernel's spatial extents and the
/// channel axis holds the number of kernels (output channels); see
/// [`Shape::kernel_height`] and friends.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: [usize; RANK],
}

impl Shape {
    /// Create a shape from explicit sizes for all eight axes.
    pub fn new(dims: [usize; RANK]) -> Shape {
        Shape { dims }
    }

    /// Create a shape from the 4-axis (batch, height, width, channel)
    /// convention. The other four axes are set to 1.
    pub fn nhwc(batch: usize, height: usize, width: usize, channels: usize) -> Shape {
        let mut dims = [1; RANK];
        dims[Axis::Batch as usize] = batch;
        dims[Axis::Height as usize] = height;
        dims[Axis::Width as usize] = width;
        dims[Axis::Channel as usize] = channels;
        Shape { dims }
    }

    /// Sizes of all eight axes in canonical order.
    pub fn dims(&self) -> [usize; RANK] {
        self.dims
    }

    /// Number of elements in a tensor with this shape.
    pub fn len(&self) -> usize {
        self.dims.iter().product()
    }

    /// Return true if a tensor with this shape holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return a copy of this shape with one axis set to `size`.
    pub fn with_size(&self, axis: usize, size: usize) -> Shape {
        let mut dims = self.dims;
        dims[axis] = size;
        Shape { dims }
    }

    /// Return true if this shape has a valid 4-axis (batch, height, width,
    /// channel) view, ie. all other axes are exactly 1.
    ///
    /// Operator parameters given in the 4-axis convention may only be
    /// applied to compatible shapes.
    pub fn is_nhwc_compatible(&self) -> bool {
        self.dims[Axis::Sequence as usize] == 1
            && self.dims[Axis::Direction as usize] == 1
            && self.dims[Axis::Extra as usize] == 1
            && self.dims[Axis::Depth as usize] == 1
    }

    pub fn batch(&self) -> usize {
        self.dims[Axis::Batch as usize]
    }

    pub fn height(&self) -> usize {
        self.dims[Axis::Height as usize]
    }

    pub fn width(&self) -> usize {
        self.dims[Axis::Width as usize]
    }

    pub fn channels(&self) -> usize {
        self.dims[Axis::Channel as usize]
    }

    /// Spatial extent of a kernel shape along the height axis.
    pub fn kernel_height(&self) -> usize {
        self.height()
    }

    /// Spatial extent of a kernel shape along the width axis.
    pub fn kernel_width(&self) -> usize {
        self.width()
    }

    /// Number of kernels (output channels) of a kernel shape.
    pub fn kernel_count(&self) -> usize {
        self.channels()
    }
}

impl Index<usize> for Shape {
    type Output = usize;

    fn index(&self, axis: usize) -> &usize {
        &self.dims[axis]
    }
}

impl Index<Axis> for Shape {
    type Output = usize;

    fn index(&self, axis: Axis) -> &usize {
        &self.dims[axis as usize]
    }
}

impl From<[usize; RANK]> for Shape {
    fn from(dims: [usize; RANK]) -> Shape {
        Shape { dims }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, size) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", size)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::ShapeError;

    use super::{resolve_axis, Axis, Shape, RANK};

    #[test]
    fn test_resolve_axis() {
        #[derive(Debug)]
        struct Case {
            axis: i32,
            expected: Result<usize, ShapeError>,
        }

        let cases = [
            Case {
                axis: 0,
                expected: Ok(0),
            },
            Case {
                axis: 7,
                expected: Ok(7),
            },
            Case {
                axis: -1,
                expected: Ok(7),
            },
            Case {
                axis: -8,
                expected: Ok(0),
            },
            Case {
                axis: 8,
                expected: Err(ShapeError::PreconditionViolation("axis is out of range")),
            },
            Case {
                axis: -9,
                expected: Err(ShapeError::PreconditionViolation("axis is out of range")),
            },
        ];

        for Case { axis, expected } in cases {
            assert_eq!(resolve_axis(axis), expected, "axis {}", axis);
        }
    }

    #[test]
    fn test_len() {
        let shape = Shape::new([1, 1, 4, 1, 1, 8, 8, 3]);
        assert_eq!(shape.len(), 4 * 8 * 8 * 3);
        assert!(!shape.is_empty());

        assert_eq!(Shape::default().len(), 0);
        assert!(Shape::default().is_empty());
    }

    #[test]
    fn test_nhwc_accessors() {
        let shape = Shape::nhwc(2, 8, 16, 3);
        assert_eq!(shape.batch(), 2);
        assert_eq!(shape.height(), 8);
        assert_eq!(shape.width(), 16);
        assert_eq!(shape.channels(), 3);
        assert_eq!(shape[Axis::Sequence], 1);
        assert_eq!(shape[Axis::Depth], 1);
        assert_eq!(shape.len(), 2 * 8 * 16 * 3);
    }

    #[test]
    fn test_is_nhwc_compatible() {
        assert!(Shape::nhwc(2, 8, 16, 3).is_nhwc_compatible());
        assert!(!Shape::new([2, 1, 1, 1, 1, 8, 16, 3]).is_nhwc_compatible());
        assert!(!Shape::new([1, 1, 2, 1, 4, 8, 16, 3]).is_nhwc_compatible());
    }

    #[test]
    fn test_with_size_returns_new_value() {
        let shape = Shape::nhwc(2, 8, 16, 3);
        let reduced = shape.with_size(Axis::Channel as usize, 1);
        assert_eq!(reduced.channels(), 1);
        // The source shape is unchanged.
        assert_eq!(shape.channels(), 3);
    }

    #[test]
    fn test_kernel_accessors() {
        let kernel = Shape::nhwc(1, 3, 3, 16);
        assert_eq!(kernel.kernel_height(), 3);
        assert_eq!(kernel.kernel_width(), 3);
        assert_eq!(kernel.kernel_count(), 16);
    }

    #[test]
    fn test_display() {
        let shape = Shape::nhwc(2, 8, 16, 3);
        assert_eq!(shape.to_string(), "(1, 1, 2, 1, 1, 8, 16, 3)");
    }

    #[test]
    fn test_channel_axis_is_last() {
        assert_eq!(Axis::Channel as usize, RANK - 1);
    }
}
