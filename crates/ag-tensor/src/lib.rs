//! `ag-tensor` - Tensor shapes and pluggable sgemm backends for affine-gemm.
//!
//! This crate provides:
//! - A `Tensor` type holding dense row-major f32 data
//! - Shape utilities, including transposed matrix views
//! - A `GemmBackend` trait for pluggable sgemm primitives
//! - A reference `CpuBackend` and a blocked `MatrixMultiplyBackend`
//! - Data type definitions (F32, F16)

pub mod backend;
pub mod blocked;
pub mod cpu;
pub mod dtype;
pub mod shape;
pub mod tensor;

// Re-export primary types at the crate root for convenience.
pub use backend::{GemmBackend, GemmLayout, GemmStatus};
pub use blocked::MatrixMultiplyBackend;
pub use cpu::CpuBackend;
pub use dtype::DType;
pub use shape::Shape;
pub use tensor::Tensor;
