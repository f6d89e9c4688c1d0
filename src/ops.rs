//! Shape-inference operations, grouped by operator family.

mod concat;
mod conv_pool;
mod gather;
mod layout;
mod reduce;
mod slice;

pub use concat::{concat, max_shape, max_tensor_shape};
pub use conv_pool::{
    adjust_pad_to_kernel, adjust_pad_to_pool, apply_kernel, apply_kernel_inverse, apply_pool,
    Padding,
};
pub use gather::gather;
pub use layout::{permute, reshape, scale};
pub use reduce::{arg_max, reduce};
pub use slice::strided_slice;
