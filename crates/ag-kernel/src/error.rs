use ag_tensor::DType;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GemmError {
    #[error("{operand} must be a 2D tensor, got rank {rank}")]
    RankMismatch { operand: &'static str, rank: usize },
    #[error("gemm dimension mismatch: op(A) is [{m}x{k}] but op(B) is [{k2}x{n}]")]
    DimensionMismatch {
        m: usize,
        k: usize,
        k2: usize,
        n: usize,
    },
    #[error("gemm not implemented for empty tensors (M={m}, N={n}, K={k})")]
    EmptyOperand { m: usize, n: usize, k: usize },
    #[error("bias shape {bias:?} cannot be broadcast to [{m}, {n}]")]
    BroadcastShapeMismatch { bias: Vec<usize>, m: usize, n: usize },
    #[error("sgemm primitive failed with status: {status}")]
    ComputeFailed { status: i32 },
    #[error("{buffer} buffer holds {got} elements, expected {expected}")]
    BufferLength {
        buffer: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("gemm expects 3 inputs (A, B, C), got {0}")]
    InvalidInputCount(usize),
    #[error("invalid attribute '{name}': {reason}")]
    InvalidAttribute { name: String, reason: String },
    #[error("unsupported dtype {0} (gemm supports f32 only)")]
    UnsupportedDType(DType),
}

pub type Result<T> = std::result::Result<T, GemmError>;
