//! `ag-kernel` - The gemm operator for affine-gemm.
//!
//! Computes `Y = alpha * op(A) * op(B) + beta * C`, where `op` optionally
//! transposes its operand and the bias `C` is broadcast into the `[M, N]`
//! output as a scalar, a row vector, a column vector or a full matrix.
//!
//! - `resolve` validates shapes and classifies the bias broadcast
//! - `AffineMatMulKernel` seeds the bias and drives the sgemm primitive
//! - `compute_gemm` and `Provider` are the entry points for a host runtime

pub mod error;
pub mod kernel;
pub mod op;
pub mod params;
pub mod provider;
pub mod resolve;

pub use error::{GemmError, Result};
pub use kernel::AffineMatMulKernel;
pub use op::compute_gemm;
pub use params::{AffineParams, AttributeValue};
pub use provider::{BackendKind, KernelDef, Provider, GEMM_KERNEL_DEF};
pub use resolve::{classify_bias, resolve, BiasBroadcast, MatMulDims};
