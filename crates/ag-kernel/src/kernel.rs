use ag_tensor::{GemmBackend, GemmLayout, Shape, Tensor};
use tracing::{debug, warn};

use crate::error::{GemmError, Result};
use crate::params::AffineParams;
use crate::resolve::{resolve, BiasBroadcast, MatMulDims};

/// Computes `Y = alpha * op(A) * op(B) + beta * C` for one operator instance.
///
/// The kernel first writes `beta * C`, broadcast to `m x n`, into the output
/// and then has the sgemm primitive accumulate `alpha * op(A) * op(B)` on top
/// of it. With `beta == 0` the bias is never read and the primitive
/// overwrites the output instead. The kernel keeps no state between calls.
#[derive(Debug, Clone, Copy)]
pub struct AffineMatMulKernel {
    params: AffineParams,
}

impl AffineMatMulKernel {
    pub fn new(params: AffineParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &AffineParams {
        &self.params
    }

    /// Resolve shapes, allocate the `[m, n]` output and compute into it.
    pub fn run(&self, backend: &dyn GemmBackend, a: &Tensor, b: &Tensor, c: &Tensor) -> Result<Tensor> {
        let (dims, pattern) = resolve(
            a.shape(),
            self.params.trans_a,
            b.shape(),
            self.params.trans_b,
            c.shape(),
        )?;
        debug!(
            a = %a.shape(),
            b = %b.shape(),
            c = %c.shape(),
            m = dims.m,
            n = dims.n,
            k = dims.k,
            ?pattern,
            backend = backend.name(),
            "gemm resolved"
        );

        let y_len = expected_len(dims.m, dims.n);
        if y_len == usize::MAX {
            return Err(GemmError::BufferLength {
                buffer: "Y",
                expected: y_len,
                got: 0,
            });
        }
        let mut y = Tensor::zeros(Shape::new(vec![dims.m, dims.n]));
        self.compute(backend, a.data(), b.data(), c.data(), &dims, pattern, y.data_mut())?;
        Ok(y)
    }

    /// Compute into a caller-owned, row-major `m x n` output buffer.
    ///
    /// `dims` and `pattern` must come from [`resolve`] on the shapes of the
    /// given buffers. A and B are tightly packed row-major as stored (before
    /// any transpose). Empty dimensions and buffer lengths are checked before
    /// anything is written.
    #[allow(clippy::too_many_arguments)]
    pub fn compute(
        &self,
        backend: &dyn GemmBackend,
        a: &[f32],
        b: &[f32],
        c: &[f32],
        dims: &MatMulDims,
        pattern: BiasBroadcast,
        output: &mut [f32],
    ) -> Result<()> {
        let MatMulDims { m, n, k } = *dims;
        if m == 0 || n == 0 || k == 0 {
            return Err(GemmError::EmptyOperand { m, n, k });
        }
        check_len("A", a, expected_len(m, k))?;
        check_len("B", b, expected_len(k, n))?;
        check_len("Y", output, expected_len(m, n))?;

        let accumulate = self.params.beta != 0.0;
        if accumulate {
            check_len("C", c, pattern.bias_len(dims))?;
            seed_bias(output, c, self.params.beta, n, pattern);
        }

        let layout = GemmLayout::packed(self.params.trans_a, self.params.trans_b, m, n, k);
        let primitive_beta = if accumulate { 1.0 } else { 0.0 };
        let status = backend.sgemm(&layout, self.params.alpha, a, b, primitive_beta, output);
        if !status.is_success() {
            warn!(
                backend = backend.name(),
                %status,
                m,
                n,
                k,
                "sgemm primitive failed"
            );
            return Err(GemmError::ComputeFailed {
                status: status.code(),
            });
        }
        Ok(())
    }
}

/// `rows * cols`, or `usize::MAX` on overflow, which no f32 slice can match.
fn expected_len(rows: usize, cols: usize) -> usize {
    rows.checked_mul(cols).unwrap_or(usize::MAX)
}

fn check_len(buffer: &'static str, data: &[f32], expected: usize) -> Result<()> {
    if data.len() != expected {
        return Err(GemmError::BufferLength {
            buffer,
            expected,
            got: data.len(),
        });
    }
    Ok(())
}

/// Write `beta * C`, broadcast to `output.len() / n` rows of `n`, into `output`.
fn seed_bias(output: &mut [f32], c: &[f32], beta: f32, n: usize, pattern: BiasBroadcast) {
    match pattern {
        BiasBroadcast::Scalar => output.fill(beta * c[0]),
        BiasBroadcast::RowVector => {
            for row in output.chunks_exact_mut(n) {
                for (out, &bias) in row.iter_mut().zip(c) {
                    *out = beta * bias;
                }
            }
        }
        BiasBroadcast::ColumnVector => {
            for (row, &bias) in output.chunks_exact_mut(n).zip(c) {
                row.fill(beta * bias);
            }
        }
        BiasBroadcast::Full => {
            for (out, &bias) in output.iter_mut().zip(c) {
                *out = beta * bias;
            }
        }
    }
}
