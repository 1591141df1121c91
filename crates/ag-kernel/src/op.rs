use ag_tensor::{GemmBackend, Tensor};

use crate::error::{GemmError, Result};
use crate::kernel::AffineMatMulKernel;
use crate::params::AffineParams;

/// Gemm operator entry point: `inputs` are `[A, B, C]`, the result is the
/// freshly allocated `[M, N]` output `Y`.
pub fn compute_gemm(
    inputs: &[&Tensor],
    params: &AffineParams,
    backend: &dyn GemmBackend,
) -> Result<Tensor> {
    let &[a, b, c] = inputs else {
        return Err(GemmError::InvalidInputCount(inputs.len()));
    };
    AffineMatMulKernel::new(*params).run(backend, a, b, c)
}
