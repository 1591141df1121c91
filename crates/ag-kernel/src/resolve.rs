use ag_tensor::Shape;

use crate::error::{GemmError, Result};

/// Output rows `m`, output columns `n` and the shared inner dimension `k`.
///
/// op(A) is `m x k` and op(B) is `k x n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatMulDims {
    pub m: usize,
    pub n: usize,
    pub k: usize,
}

/// How the bias C expands into the `m x n` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiasBroadcast {
    /// A single element added everywhere.
    Scalar,
    /// `n` elements, one per output column, repeated for every row.
    RowVector,
    /// `m` elements, one per output row, repeated for every column.
    ColumnVector,
    /// A full `m x n` matrix.
    Full,
}

impl BiasBroadcast {
    /// Number of elements a bias of this pattern holds for the given dims.
    pub fn bias_len(&self, dims: &MatMulDims) -> usize {
        match self {
            BiasBroadcast::Scalar => 1,
            BiasBroadcast::RowVector => dims.n,
            BiasBroadcast::ColumnVector => dims.m,
            BiasBroadcast::Full => dims.m * dims.n,
        }
    }
}

/// Validates the operand shapes of a gemm and derives its dimensions and
/// bias broadcast pattern.
///
/// Checks run in a fixed order: operand rank, inner dimension agreement,
/// non-empty dimensions, then the bias shape.
pub fn resolve(
    shape_a: &Shape,
    trans_a: bool,
    shape_b: &Shape,
    trans_b: bool,
    shape_c: &Shape,
) -> Result<(MatMulDims, BiasBroadcast)> {
    let (m, k) = shape_a
        .matrix_dims(trans_a)
        .ok_or(GemmError::RankMismatch {
            operand: "A",
            rank: shape_a.ndim(),
        })?;
    let (k2, n) = shape_b
        .matrix_dims(trans_b)
        .ok_or(GemmError::RankMismatch {
            operand: "B",
            rank: shape_b.ndim(),
        })?;

    if k != k2 {
        return Err(GemmError::DimensionMismatch { m, k, k2, n });
    }
    if m == 0 || n == 0 || k == 0 {
        return Err(GemmError::EmptyOperand { m, n, k });
    }

    let dims = MatMulDims { m, n, k };
    let pattern = classify_bias(shape_c, &dims)?;
    Ok((dims, pattern))
}

/// Classifies the bias shape against the output `m x n`.
///
/// A single-element bias is a scalar whatever its rank, so `(1, 1)` never
/// reaches the vector checks.
pub fn classify_bias(shape_c: &Shape, dims: &MatMulDims) -> Result<BiasBroadcast> {
    let MatMulDims { m, n, .. } = *dims;
    let mismatch = || GemmError::BroadcastShapeMismatch {
        bias: shape_c.dims().to_vec(),
        m,
        n,
    };

    if shape_c.numel() == 1 {
        return Ok(BiasBroadcast::Scalar);
    }
    match *shape_c.dims() {
        [len] if len == n => Ok(BiasBroadcast::RowVector),
        [rows, 1] if rows == m => Ok(BiasBroadcast::ColumnVector),
        [_, 1] => Err(mismatch()),
        [1, cols] if cols == n => Ok(BiasBroadcast::RowVector),
        [1, _] => Err(mismatch()),
        [rows, cols] if rows == m && cols == n => Ok(BiasBroadcast::Full),
        _ => Err(mismatch()),
    }
}
