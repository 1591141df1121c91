// Reference sgemm loops for the CPU backend.
//
// Straightforward triple loop over row-major strided operands. Correctness
// over speed: there is no blocking or SIMD here.

use crate::backend::GemmLayout;

/// Minimum slice length that holds `rows` rows of `cols` elements with the
/// given leading dimension.
fn required_len(rows: usize, cols: usize, ld: usize) -> usize {
    if rows == 0 || cols == 0 {
        0
    } else {
        (rows - 1) * ld + cols
    }
}

/// Checks leading dimensions and slice lengths against the layout.
pub(crate) fn check_layout(layout: &GemmLayout, a: &[f32], b: &[f32], c: &[f32]) -> bool {
    let (a_rows, a_cols) = layout.a_stored();
    let (b_rows, b_cols) = layout.b_stored();

    layout.lda >= a_cols.max(1)
        && layout.ldb >= b_cols.max(1)
        && layout.ldc >= layout.n.max(1)
        && a.len() >= required_len(a_rows, a_cols, layout.lda)
        && b.len() >= required_len(b_rows, b_cols, layout.ldb)
        && c.len() >= required_len(layout.m, layout.n, layout.ldc)
}

/// C = alpha * op(A) * op(B) + beta * C, with `beta == 0` never reading C.
///
/// The caller must have validated the layout with [`check_layout`].
pub(crate) fn sgemm_reference(
    layout: &GemmLayout,
    alpha: f32,
    a: &[f32],
    b: &[f32],
    beta: f32,
    c: &mut [f32],
) {
    let GemmLayout {
        trans_a,
        trans_b,
        m,
        n,
        k,
        lda,
        ldb,
        ldc,
    } = *layout;

    let a_at = |row: usize, col: usize| -> f32 {
        if trans_a {
            a[col * lda + row]
        } else {
            a[row * lda + col]
        }
    };
    let b_at = |row: usize, col: usize| -> f32 {
        if trans_b {
            b[col * ldb + row]
        } else {
            b[row * ldb + col]
        }
    };

    for i in 0..m {
        for j in 0..n {
            let mut sum = 0.0f32;
            for p in 0..k {
                sum += a_at(i, p) * b_at(p, j);
            }
            let idx = i * ldc + j;
            c[idx] = if beta == 0.0 {
                alpha * sum
            } else {
                alpha * sum + beta * c[idx]
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_len() {
        assert_eq!(required_len(0, 4, 4), 0);
        assert_eq!(required_len(2, 3, 3), 6);
        // padded rows: the last row does not need trailing padding
        assert_eq!(required_len(2, 3, 5), 8);
    }

    #[test]
    fn test_check_layout_rejects_short_lda() {
        let mut layout = GemmLayout::packed(false, false, 2, 2, 3);
        layout.lda = 2;
        assert!(!check_layout(&layout, &[0.0; 6], &[0.0; 6], &[0.0; 4]));
    }

    #[test]
    fn test_check_layout_rejects_short_buffer() {
        let layout = GemmLayout::packed(false, false, 2, 2, 3);
        assert!(check_layout(&layout, &[0.0; 6], &[0.0; 6], &[0.0; 4]));
        assert!(!check_layout(&layout, &[0.0; 5], &[0.0; 6], &[0.0; 4]));
        assert!(!check_layout(&layout, &[0.0; 6], &[0.0; 6], &[0.0; 3]));
    }

    #[test]
    fn test_padded_rows() {
        // A is 2x2 stored with a row pitch of 3; the padding column is ignored
        let a = vec![1.0, 2.0, -99.0, 3.0, 4.0];
        let b = vec![5.0, 6.0, 7.0, 8.0];
        let mut c = vec![0.0; 4];
        let mut layout = GemmLayout::packed(false, false, 2, 2, 2);
        layout.lda = 3;
        assert!(check_layout(&layout, &a, &b, &c));
        sgemm_reference(&layout, 1.0, &a, &b, 0.0, &mut c);
        assert_eq!(c, vec![19.0, 22.0, 43.0, 50.0]);
    }
}
