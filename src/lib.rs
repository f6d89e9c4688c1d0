//! Shape inference for the Octen tensor runtime.
//!
//! # About shape inference
//!
//! Every tensor in the runtime carries a fixed-rank shape: eight axes with
//! reserved semantic roles (sequence, directions, batch, extra, depth,
//! height, width, channel; see [`Axis`]). Before an operator executes, the
//! runtime computes its output shape from the input shapes and the
//! operator's parameters alone, without touching tensor data. The functions
//! in this crate are that computation.
//!
//! Because the execution engine sizes its output buffers from these
//! results, the rules here must agree exactly with the reference operator
//! semantics (reshape with one inferred dimension, "same" auto-padding,
//! transposed-convolution inverse arithmetic, Python-style negative
//! indexing), so that a pipeline of chained operators never diverges from
//! the memory layout the kernels actually produce.
//!
//! # Crate overview
//!
//! [`Shape`] is an immutable value type; the operations in [`ops`] are pure
//! functions from shapes and parameter arrays to new shapes. Parameters may
//! be written against either the legacy 4-axis (batch, height, width,
//! channel) convention or the full 8-axis layout; the [`nhwc`] module owns
//! the conversion between the two, and operators normalize at their
//! boundary.
//!
//! Failures ([`ShapeError`]) indicate a malformed model graph and surface
//! synchronously; no operation ever returns a guessed shape.
//!
//! The runtime's tensors appear here only through the minimal read-only
//! [`Tensor`] trait. Storage, execution kernels and diagnostics live
//! elsewhere.

mod errors;
pub mod nhwc;
pub mod ops;
mod shape;
mod tensor;

pub use errors::ShapeError;
pub use shape::{resolve_axis, Axis, Shape, RANK};
pub use tensor::Tensor;
