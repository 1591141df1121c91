use tracing::debug;

use crate::backend::{GemmBackend, GemmLayout, GemmStatus};
use crate::cpu::matmul::check_layout;

/// Cache-blocked sgemm backend built on the `matrixmultiply` crate.
///
/// Row-major operands with leading dimensions map onto `matrixmultiply`'s
/// arbitrary row/column strides; a transposed operand just swaps its two
/// strides, so nothing is copied. With `beta == 0` the output is not read.
#[derive(Debug, Clone, Default)]
pub struct MatrixMultiplyBackend;

impl MatrixMultiplyBackend {
    pub fn new() -> Self {
        MatrixMultiplyBackend
    }
}

/// `(row_stride, col_stride)` of `op(X)` for X stored row-major with `ld`.
fn strides(transposed: bool, ld: usize) -> (isize, isize) {
    if transposed {
        (1, ld as isize)
    } else {
        (ld as isize, 1)
    }
}

impl GemmBackend for MatrixMultiplyBackend {
    fn name(&self) -> &str {
        "matrixmultiply"
    }

    fn sgemm(
        &self,
        layout: &GemmLayout,
        alpha: f32,
        a: &[f32],
        b: &[f32],
        beta: f32,
        c: &mut [f32],
    ) -> GemmStatus {
        let strides_fit = layout.lda.max(layout.ldb).max(layout.ldc) <= isize::MAX as usize;
        if !strides_fit || !check_layout(layout, a, b, c) {
            debug!(
                ?layout,
                a_len = a.len(),
                b_len = b.len(),
                c_len = c.len(),
                "matrixmultiply sgemm: layout does not fit the buffers"
            );
            return GemmStatus::INVALID_ARGUMENTS;
        }

        let (rsa, csa) = strides(layout.trans_a, layout.lda);
        let (rsb, csb) = strides(layout.trans_b, layout.ldb);
        let (rsc, csc) = strides(false, layout.ldc);

        // SAFETY: check_layout guarantees every element addressed through
        // these strides lies inside the corresponding slice.
        unsafe {
            matrixmultiply::sgemm(
                layout.m,
                layout.k,
                layout.n,
                alpha,
                a.as_ptr(),
                rsa,
                csa,
                b.as_ptr(),
                rsb,
                csb,
                beta,
                c.as_mut_ptr(),
                rsc,
                csc,
            );
        }
        GemmStatus::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::CpuBackend;
    use approx::assert_relative_eq;

    fn filled(len: usize, seed: f32) -> Vec<f32> {
        (0..len).map(|i| ((i as f32 + seed) * 0.37).sin()).collect()
    }

    #[test]
    fn test_matches_reference_for_all_transposes() {
        let (m, n, k) = (5, 7, 9);
        let reference = CpuBackend::new();
        let blocked = MatrixMultiplyBackend::new();

        for (trans_a, trans_b) in [(false, false), (true, false), (false, true), (true, true)] {
            let layout = GemmLayout::packed(trans_a, trans_b, m, n, k);
            let a = filled(m * k, 1.0);
            let b = filled(k * n, 2.0);
            let c = filled(m * n, 3.0);

            let mut want = c.clone();
            let mut got = c.clone();
            assert!(reference.sgemm(&layout, 1.5, &a, &b, 0.5, &mut want).is_success());
            assert!(blocked.sgemm(&layout, 1.5, &a, &b, 0.5, &mut got).is_success());

            for (g, w) in got.iter().zip(&want) {
                assert_relative_eq!(*g, *w, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_beta_zero_overwrites_nan() {
        let be = MatrixMultiplyBackend::new();
        let mut c = vec![f32::NAN; 4];
        let status = be.sgemm(
            &GemmLayout::packed(false, false, 2, 2, 2),
            1.0,
            &[1.0, 2.0, 3.0, 4.0],
            &[5.0, 6.0, 7.0, 8.0],
            0.0,
            &mut c,
        );
        assert!(status.is_success());
        assert_eq!(c, vec![19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn test_accumulates_with_beta_one() {
        let be = MatrixMultiplyBackend::new();
        // A stored 3x2 so op(A) = A^T is 2x3
        let a = vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0];
        let b = vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0];
        let mut c = vec![1.0; 4];
        be.sgemm(&GemmLayout::packed(true, false, 2, 2, 3), 1.0, &a, &b, 1.0, &mut c);
        assert_eq!(c, vec![59.0, 65.0, 140.0, 155.0]);
    }

    #[test]
    fn test_padded_leading_dimension() {
        let be = MatrixMultiplyBackend::new();
        // A is 2x2 stored with a row pitch of 3
        let a = vec![1.0, 2.0, -99.0, 3.0, 4.0];
        let mut layout = GemmLayout::packed(false, false, 2, 2, 2);
        layout.lda = 3;
        let mut c = vec![0.0; 4];
        be.sgemm(&layout, 1.0, &a, &[5.0, 6.0, 7.0, 8.0], 0.0, &mut c);
        assert_eq!(c, vec![19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn test_invalid_arguments() {
        let be = MatrixMultiplyBackend::new();
        let mut c = vec![0.0; 4];
        let status = be.sgemm(
            &GemmLayout::packed(false, false, 2, 2, 2),
            1.0,
            &[1.0, 2.0, 3.0, 4.0],
            &[5.0, 6.0],
            0.0,
            &mut c,
        );
        assert_eq!(status, GemmStatus::INVALID_ARGUMENTS);
        assert_eq!(c, vec![0.0; 4]);
    }
}
