use ag_kernel::{AffineParams, BackendKind, GemmError};

/// Status codes returned by all FFI functions.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AGStatus {
    Ok = 0,
    ErrorInvalidArgument = 1,
    ErrorInvalidShape = 2,
    ErrorNotImplemented = 3,
    ErrorUnsupportedType = 4,
    ErrorCompute = 5,
    ErrorInternal = 6,
}

impl From<&GemmError> for AGStatus {
    fn from(err: &GemmError) -> Self {
        match err {
            GemmError::RankMismatch { .. }
            | GemmError::DimensionMismatch { .. }
            | GemmError::BroadcastShapeMismatch { .. } => AGStatus::ErrorInvalidShape,
            GemmError::EmptyOperand { .. } => AGStatus::ErrorNotImplemented,
            GemmError::UnsupportedDType(_) => AGStatus::ErrorUnsupportedType,
            GemmError::ComputeFailed { .. } => AGStatus::ErrorCompute,
            GemmError::BufferLength { .. }
            | GemmError::InvalidInputCount(_)
            | GemmError::InvalidAttribute { .. } => AGStatus::ErrorInvalidArgument,
        }
    }
}

/// Compute backend type selector.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub enum AGBackendType {
    Cpu = 0,
    MatrixMultiply = 1,
}

impl From<AGBackendType> for BackendKind {
    fn from(backend: AGBackendType) -> Self {
        match backend {
            AGBackendType::Cpu => BackendKind::Cpu,
            AGBackendType::MatrixMultiply => BackendKind::MatrixMultiply,
        }
    }
}

/// Gemm node attributes.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct AGGemmParams {
    pub alpha: f32,
    pub beta: f32,
    pub trans_a: bool,
    pub trans_b: bool,
}

impl Default for AGGemmParams {
    fn default() -> Self {
        let p = AffineParams::default();
        Self {
            alpha: p.alpha,
            beta: p.beta,
            trans_a: p.trans_a,
            trans_b: p.trans_b,
        }
    }
}

impl From<AGGemmParams> for AffineParams {
    fn from(p: AGGemmParams) -> Self {
        AffineParams::new(p.alpha, p.beta, p.trans_a, p.trans_b)
    }
}

/// A borrowed, row-major tensor owned by the caller.
///
/// `dims` points at `rank` dimension sizes and may be null only when `rank`
/// is 0. `data` points at the product of `dims` elements and may be null only
/// when that product is 0. `dtype` is an ONNX `TensorProto.DataType` id
/// (1 = float).
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct AGTensorView {
    pub data: *const f32,
    pub dims: *const usize,
    pub rank: usize,
    pub dtype: i32,
}
