use crate::errors::ShapeError;
use crate::shape::{Axis, Shape};

/// Selector for the "same, larger half last" auto-padding mode, recognized
/// in the first entry of a raw pad array.
const SAME_UPPER: i32 = -1;

/// Selector for the "same, larger half first" auto-padding mode.
const SAME_LOWER: i32 = -2;

/// Padding mode of a pooling or convolution operator.
///
/// Raw pad arrays overload their first entry: a negative value there is an
/// auto-padding selector rather than a pad amount. [`Padding::from_pads`]
/// decodes that encoding once, so the arithmetic below only ever sees
/// explicit pad values.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Padding {
    /// Explicit padding as `[left, top, right, bottom]`.
    Fixed([i32; 4]),

    /// Pad so that each spatial output size is `ceil(input / stride)`,
    /// with the larger half of the padding after the input (right/bottom).
    SameUpper,

    /// As [`Padding::SameUpper`], but with the larger half before the
    /// input (left/top).
    SameLower,
}

impl Padding {
    /// Decode a raw 4-entry pad array.
    ///
    /// A non-negative first entry means the array is explicit padding; the
    /// recognized negative selectors map to the "same" modes and any other
    /// selector fails.
    pub fn from_pads(pads: &[i32]) -> Result<Padding, ShapeError> {
        if pads.len() != 4 {
            return Err(ShapeError::PreconditionViolation(
                "expected 4 pad entries",
            ));
        }
        if pads[0] >= 0 {
            let mut fixed = [0; 4];
            fixed.copy_from_slice(pads);
            Ok(Padding::Fixed(fixed))
        } else {
            match pads[0] {
                SAME_UPPER => Ok(Padding::SameUpper),
                SAME_LOWER => Ok(Padding::SameLower),
                other => Err(ShapeError::UnsupportedAutoPad(other)),
            }
        }
    }

    /// Resolve this padding to explicit `[left, top, right, bottom]` values
    /// for the given input and pool geometry.
    fn resolve(&self, shape: Shape, pool: [i32; 2], stride: [i32; 2]) -> Result<[i32; 4], ShapeError> {
        match *self {
            Padding::Fixed(pads) => Ok(pads),
            Padding::SameUpper | Padding::SameLower => {
                let (small_h, large_h) = same_padding(shape.height() as i32, pool[0], stride[0])?;
                let (small_w, large_w) = same_padding(shape.width() as i32, pool[1], stride[1])?;
                if *self == Padding::SameUpper {
                    Ok([small_w, small_h, large_w, large_h])
                } else {
                    Ok([large_w, large_h, small_w, small_h])
                }
            }
        }
    }
}

/// Total "same" padding along one spatial axis, split into its smaller and
/// larger halves.
///
/// The total is whatever makes the output size `ceil(input / stride)` for
/// the forward formula in [`pool_output_size`].
fn same_padding(input: i32, pool: i32, stride: i32) -> Result<(i32, i32), ShapeError> {
    if stride <= 0 {
        return Err(ShapeError::PreconditionViolation("stride must be positive"));
    }
    let mut rem = input % stride;
    if rem == 0 {
        rem = stride;
    }
    let total = (pool - rem).max(0);
    let small = total / 2;
    Ok((small, total - small))
}

/// Forward output size along one spatial axis.
fn pool_output_size(
    input: i32,
    pool: i32,
    stride: i32,
    total_pad: i32,
    ceil_mode: bool,
) -> Result<usize, ShapeError> {
    if stride <= 0 {
        return Err(ShapeError::PreconditionViolation("stride must be positive"));
    }
    let padded = input + total_pad - pool;
    let out = if ceil_mode {
        (padded + stride - 1) / stride + 1
    } else {
        padded / stride + 1
    };
    if out < 0 {
        return Err(ShapeError::PreconditionViolation(
            "pool window is larger than the padded input",
        ));
    }
    Ok(out as usize)
}

fn check_pool_params(pool: &[i32], stride: &[i32]) -> Result<([i32; 2], [i32; 2]), ShapeError> {
    let Ok(pool) = <[i32; 2]>::try_from(pool) else {
        return Err(ShapeError::PreconditionViolation(
            "expected 2 pool entries",
        ));
    };
    let Ok(stride) = <[i32; 2]>::try_from(stride) else {
        return Err(ShapeError::PreconditionViolation(
            "expected 2 stride entries",
        ));
    };
    Ok((pool, stride))
}

/// Resolve a possibly-auto pad array to explicit `[left, top, right,
/// bottom]` padding for a pooling window.
///
/// Explicit pads pass through unchanged; the "same" selectors compute the
/// padding that makes each spatial output `ceil(input / stride)`, with the
/// odd pad cell placed per the selected mode. `pool` and `stride` are
/// `[height, width]` pairs.
pub fn adjust_pad_to_pool(
    shape: Shape,
    pool: &[i32],
    stride: &[i32],
    pads: &[i32],
) -> Result<[i32; 4], ShapeError> {
    let (pool, stride) = check_pool_params(pool, stride)?;
    Padding::from_pads(pads)?.resolve(shape, pool, stride)
}

/// [`adjust_pad_to_pool`] with the window taken from a kernel shape's
/// spatial extents.
pub fn adjust_pad_to_kernel(
    shape: Shape,
    kernel: Shape,
    stride: &[i32],
    pads: &[i32],
) -> Result<[i32; 4], ShapeError> {
    let pool = [kernel.kernel_height() as i32, kernel.kernel_width() as i32];
    adjust_pad_to_pool(shape, &pool, stride, pads)
}

/// Compute the output shape of pooling `shape` with a `[height, width]`
/// window.
///
/// The height and width axes become `(input + pad_before + pad_after -
/// pool) / stride + 1`, truncating; with `ceil_mode` the division rounds
/// up instead, so a partial window at the end of the axis still produces an
/// output. Auto-pad selectors in `pads` are resolved first. All other axes
/// are unchanged.
pub fn apply_pool(
    shape: Shape,
    pool: &[i32],
    stride: &[i32],
    pads: &[i32],
    ceil_mode: bool,
) -> Result<Shape, ShapeError> {
    let (pool, stride) = check_pool_params(pool, stride)?;
    let pads = Padding::from_pads(pads)?.resolve(shape, pool, stride)?;

    let out_h = pool_output_size(
        shape.height() as i32,
        pool[0],
        stride[0],
        pads[1] + pads[3],
        ceil_mode,
    )?;
    let out_w = pool_output_size(
        shape.width() as i32,
        pool[1],
        stride[1],
        pads[0] + pads[2],
        ceil_mode,
    )?;

    Ok(shape
        .with_size(Axis::Height as usize, out_h)
        .with_size(Axis::Width as usize, out_w))
}

/// Compute the output shape of convolving `shape` with `kernel`.
///
/// This is [`apply_pool`] with the kernel's spatial extents as the window,
/// after which the channel axis takes the kernel's output-channel count.
pub fn apply_kernel(
    shape: Shape,
    kernel: Shape,
    stride: &[i32],
    pads: &[i32],
) -> Result<Shape, ShapeError> {
    let pool = [kernel.kernel_height() as i32, kernel.kernel_width() as i32];
    let pooled = apply_pool(shape, &pool, stride, pads, false)?;
    Ok(pooled.with_size(Axis::Channel as usize, kernel.kernel_count()))
}

/// Compute the output shape of a transposed convolution.
///
/// The spatial rank is `stride.len()` (1 or 2; more is unsupported) and
/// `pads` holds `[begin..., end...]` with one begin/end pair per spatial
/// axis, ordered height then width. Forward pooling loses the remainder of
/// its integer division, so the inverse takes an explicit per-axis output
/// adjustment to pick among the possible sizes; when `output_adjustment`
/// is empty it is derived as `(input + total_pad - kernel_extent) mod
/// stride`. Each spatial axis becomes `(input - 1) * stride - total_pad +
/// kernel_extent + adjustment` and the channel axis takes the kernel's
/// output-channel count.
pub fn apply_kernel_inverse(
    shape: Shape,
    kernel: Shape,
    stride: &[i32],
    pads: &[i32],
    output_adjustment: &[i32],
) -> Result<Shape, ShapeError> {
    let rank = stride.len();
    if rank == 0 {
        return Err(ShapeError::PreconditionViolation(
            "stride must have at least one entry",
        ));
    }
    if rank > 2 {
        return Err(ShapeError::UnsupportedFeature(
            "more than 2 spatial axes are not supported",
        ));
    }
    if pads.len() != 2 * rank {
        return Err(ShapeError::PreconditionViolation(
            "expected one begin and one end pad entry per spatial axis",
        ));
    }
    if !output_adjustment.is_empty() && output_adjustment.len() < rank {
        return Err(ShapeError::PreconditionViolation(
            "output adjustment must cover every spatial axis",
        ));
    }

    let mut result = shape;
    for i in 0..rank {
        if stride[i] <= 0 {
            return Err(ShapeError::PreconditionViolation("stride must be positive"));
        }

        let axis = Axis::Height as usize + i;
        let input = shape[axis] as i32;
        let kernel_extent = kernel[axis] as i32;
        let total_pad = pads[i] + pads[rank + i];

        let adjustment = if output_adjustment.is_empty() {
            (input + total_pad - kernel_extent) % stride[i]
        } else {
            output_adjustment[i]
        };

        let out = (input - 1) * stride[i] - total_pad + kernel_extent + adjustment;
        if out < 0 {
            return Err(ShapeError::PreconditionViolation(
                "transposed output size is negative",
            ));
        }
        result = result.with_size(axis, out as usize);
    }

    Ok(result.with_size(Axis::Channel as usize, kernel.kernel_count()))
}

#[cfg(test)]
mod tests {
    use crate::errors::ShapeError;
    use crate::shape::Shape;

    use super::{
        adjust_pad_to_kernel, adjust_pad_to_pool, apply_kernel, apply_kernel_inverse, apply_pool,
        Padding,
    };

    #[test]
    fn test_padding_from_pads() {
        assert_eq!(
            Padding::from_pads(&[1, 2, 3, 4]).unwrap(),
            Padding::Fixed([1, 2, 3, 4])
        );
        assert_eq!(
            Padding::from_pads(&[-1, 0, 0, 0]).unwrap(),
            Padding::SameUpper
        );
        assert_eq!(
            Padding::from_pads(&[-2, 0, 0, 0]).unwrap(),
            Padding::SameLower
        );
        assert_eq!(
            Padding::from_pads(&[-3, 0, 0, 0]),
            Err(ShapeError::UnsupportedAutoPad(-3))
        );
        assert!(matches!(
            Padding::from_pads(&[0, 0]),
            Err(ShapeError::PreconditionViolation(_))
        ));
    }

    #[test]
    fn test_apply_pool_identity() {
        // A 1x1 window with unit stride and no padding leaves height and
        // width unchanged.
        let shape = Shape::nhwc(2, 8, 16, 3);
        let result = apply_pool(shape, &[1, 1], &[1, 1], &[0, 0, 0, 0], false).unwrap();
        assert_eq!(result, shape);
    }

    #[test]
    fn test_apply_pool() {
        let shape = Shape::nhwc(1, 10, 10, 4);

        // floor: (10 - 3) / 2 + 1 = 4
        let result = apply_pool(shape, &[3, 3], &[2, 2], &[0, 0, 0, 0], false).unwrap();
        assert_eq!(result, Shape::nhwc(1, 4, 4, 4));

        // ceil: (10 - 3 + 1) / 2 + 1 = 5
        let result = apply_pool(shape, &[3, 3], &[2, 2], &[0, 0, 0, 0], true).unwrap();
        assert_eq!(result, Shape::nhwc(1, 5, 5, 4));

        // Asymmetric explicit pads pair left/right for width and top/bottom
        // for height.
        let result = apply_pool(shape, &[3, 3], &[1, 1], &[1, 0, 0, 0], false).unwrap();
        assert_eq!(result, Shape::nhwc(1, 8, 9, 4));
    }

    #[test]
    fn test_apply_pool_param_lengths() {
        let shape = Shape::nhwc(1, 10, 10, 4);
        assert!(matches!(
            apply_pool(shape, &[3, 3], &[2], &[0, 0, 0, 0], false),
            Err(ShapeError::PreconditionViolation(_))
        ));
        assert!(matches!(
            apply_pool(shape, &[3, 3], &[2, 2], &[0, 0, 0], false),
            Err(ShapeError::PreconditionViolation(_))
        ));
        assert!(matches!(
            apply_pool(shape, &[3], &[2, 2], &[0, 0, 0, 0], false),
            Err(ShapeError::PreconditionViolation(_))
        ));
    }

    #[test]
    fn test_apply_pool_window_too_large() {
        let shape = Shape::nhwc(1, 5, 5, 4);
        assert!(matches!(
            apply_pool(shape, &[7, 7], &[1, 1], &[0, 0, 0, 0], false),
            Err(ShapeError::PreconditionViolation(_))
        ));
    }

    #[test]
    fn test_adjust_pad_to_pool() {
        // input 7, stride 2, pool 3: 7 mod 2 = 1, total = max(3 - 1, 0) = 2,
        // split evenly.
        let shape = Shape::nhwc(1, 7, 7, 4);
        let pads = adjust_pad_to_pool(shape, &[3, 3], &[2, 2], &[-1, 0, 0, 0]).unwrap();
        assert_eq!(pads, [1, 1, 1, 1]);

        // input 8, stride 2, pool 3: the zero remainder is replaced by the
        // stride, total = max(3 - 2, 0) = 1, so the halves are 0 and 1.
        let shape = Shape::nhwc(1, 8, 8, 4);
        let pads = adjust_pad_to_pool(shape, &[3, 3], &[2, 2], &[-1, 0, 0, 0]).unwrap();
        assert_eq!(pads, [0, 0, 1, 1]);
        let pads = adjust_pad_to_pool(shape, &[3, 3], &[2, 2], &[-2, 0, 0, 0]).unwrap();
        assert_eq!(pads, [1, 1, 0, 0]);

        // Explicit pads pass through unchanged.
        let pads = adjust_pad_to_pool(shape, &[3, 3], &[2, 2], &[1, 2, 3, 4]).unwrap();
        assert_eq!(pads, [1, 2, 3, 4]);
    }

    #[test]
    fn test_same_padding_gives_ceil_output() {
        // With "same" padding the output is ceil(input / stride), for both
        // remainder cases.
        for input in [7, 8] {
            let shape = Shape::nhwc(1, input, input, 4);
            let result =
                apply_pool(shape, &[3, 3], &[2, 2], &[-1, 0, 0, 0], false).unwrap();
            let expected = input.div_ceil(2);
            assert_eq!(result, Shape::nhwc(1, expected, expected, 4), "input {}", input);
        }
    }

    #[test]
    fn test_apply_kernel() {
        let shape = Shape::nhwc(1, 7, 7, 4);
        let kernel = Shape::nhwc(1, 3, 3, 16);

        let result = apply_kernel(shape, kernel, &[1, 1], &[0, 0, 0, 0]).unwrap();
        assert_eq!(result, Shape::nhwc(1, 5, 5, 16));

        // The kernel's own pads selector works here too.
        let result = apply_kernel(shape, kernel, &[2, 2], &[-1, 0, 0, 0]).unwrap();
        assert_eq!(result, Shape::nhwc(1, 4, 4, 16));
    }

    #[test]
    fn test_adjust_pad_to_kernel() {
        let shape = Shape::nhwc(1, 7, 7, 4);
        let kernel = Shape::nhwc(1, 3, 3, 16);
        let pads = adjust_pad_to_kernel(shape, kernel, &[2, 2], &[-1, 0, 0, 0]).unwrap();
        assert_eq!(pads, [1, 1, 1, 1]);
    }

    #[test]
    fn test_apply_kernel_inverse() {
        let kernel = Shape::nhwc(1, 3, 3, 16);

        // No padding: (3 - 1) * 2 + 3 = 7, derived adjustment 0.
        let shape = Shape::nhwc(1, 3, 3, 4);
        let result = apply_kernel_inverse(shape, kernel, &[2, 2], &[0, 0, 0, 0], &[]).unwrap();
        assert_eq!(result, Shape::nhwc(1, 7, 7, 16));

        // With padding and an explicit adjustment of zero:
        // (4 - 1) * 2 - 2 + 3 = 7.
        let shape = Shape::nhwc(1, 4, 4, 4);
        let result =
            apply_kernel_inverse(shape, kernel, &[2, 2], &[1, 1, 1, 1], &[0, 0]).unwrap();
        assert_eq!(result, Shape::nhwc(1, 7, 7, 16));

        // The derived adjustment is (input + pads - kernel) mod stride,
        // which picks the larger of the sizes the forward pass folds
        // together: (4 + 2 - 3) mod 2 = 1, so 8 rather than 7.
        let result = apply_kernel_inverse(shape, kernel, &[2, 2], &[1, 1, 1, 1], &[]).unwrap();
        assert_eq!(result, Shape::nhwc(1, 8, 8, 16));
    }

    #[test]
    fn test_apply_kernel_inverse_1d() {
        // A single stride entry transposes only the height axis.
        let shape = Shape::nhwc(1, 5, 1, 4);
        let kernel = Shape::nhwc(1, 3, 1, 16);
        let result = apply_kernel_inverse(shape, kernel, &[2], &[0, 0], &[]).unwrap();
        assert_eq!(result, Shape::nhwc(1, 11, 1, 16));
    }

    #[test]
    fn test_apply_kernel_inverse_invalid() {
        let shape = Shape::nhwc(1, 5, 5, 4);
        let kernel = Shape::nhwc(1, 3, 3, 16);

        // More than two spatial axes is unsupported.
        assert!(matches!(
            apply_kernel_inverse(shape, kernel, &[2, 2, 2], &[0, 0, 0, 0, 0, 0], &[]),
            Err(ShapeError::UnsupportedFeature(_))
        ));

        // Pads must hold a begin/end pair per spatial axis.
        assert!(matches!(
            apply_kernel_inverse(shape, kernel, &[2, 2], &[0, 0], &[]),
            Err(ShapeError::PreconditionViolation(_))
        ));

        // A supplied adjustment must cover every axis.
        assert!(matches!(
            apply_kernel_inverse(shape, kernel, &[2, 2], &[0, 0, 0, 0], &[1]),
            Err(ShapeError::PreconditionViolation(_))
        ));
    }
}
