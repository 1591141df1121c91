use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use ag_tensor::{CpuBackend, DType, GemmBackend, MatrixMultiplyBackend, Tensor};
use tracing::debug;

use crate::error::{GemmError, Result};
use crate::op::compute_gemm;
use crate::params::{AffineParams, AttributeValue};

/// Registration metadata a host runtime needs to route a node to this kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelDef {
    pub op_type: &'static str,
    /// Operator domain; the empty string is the default ONNX domain.
    pub domain: &'static str,
    pub since_version: u32,
    /// Element type accepted for `T` (A, B, C and Y).
    pub type_constraint: DType,
}

/// The gemm kernel: ONNX `Gemm`, opset 7 and later, f32 only.
pub const GEMM_KERNEL_DEF: KernelDef = KernelDef {
    op_type: "Gemm",
    domain: "",
    since_version: 7,
    type_constraint: DType::F32,
};

impl KernelDef {
    pub fn supports(&self, dtype: DType) -> bool {
        dtype == self.type_constraint
    }

    pub fn check_dtype(&self, dtype: DType) -> Result<()> {
        if self.supports(dtype) {
            Ok(())
        } else {
            Err(GemmError::UnsupportedDType(dtype))
        }
    }
}

/// Which sgemm backend a provider is created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// Reference loops.
    #[default]
    Cpu,
    /// Cache-blocked kernels from the `matrixmultiply` crate.
    MatrixMultiply,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Cpu => write!(f, "cpu"),
            BackendKind::MatrixMultiply => write!(f, "matrixmultiply"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = GemmError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cpu" => Ok(BackendKind::Cpu),
            "matrixmultiply" => Ok(BackendKind::MatrixMultiply),
            other => Err(GemmError::InvalidAttribute {
                name: "backend".to_string(),
                reason: format!("unknown backend '{}'", other),
            }),
        }
    }
}

/// Hands out the gemm kernel on a backend fixed at construction.
///
/// A provider is immutable and may be shared between threads; concurrent
/// calls only need disjoint input and output buffers.
#[derive(Debug, Clone)]
pub struct Provider {
    backend: Arc<dyn GemmBackend>,
}

impl Provider {
    pub fn new(kind: BackendKind) -> Self {
        let backend: Arc<dyn GemmBackend> = match kind {
            BackendKind::Cpu => Arc::new(CpuBackend::new()),
            BackendKind::MatrixMultiply => Arc::new(MatrixMultiplyBackend::new()),
        };
        debug!(backend = %kind, "gemm provider created");
        Self { backend }
    }

    /// Create a provider around an externally supplied backend.
    pub fn with_backend(backend: Arc<dyn GemmBackend>) -> Self {
        debug!(backend = backend.name(), "gemm provider created");
        Self { backend }
    }

    pub fn backend(&self) -> &dyn GemmBackend {
        self.backend.as_ref()
    }

    pub fn kernel_def(&self) -> &'static KernelDef {
        &GEMM_KERNEL_DEF
    }

    /// Run one gemm node: parse its attributes and compute `Y` from
    /// `[A, B, C]`.
    pub fn compute(
        &self,
        inputs: &[&Tensor],
        attributes: &HashMap<String, AttributeValue>,
    ) -> Result<Tensor> {
        let params = AffineParams::from_attributes(attributes)?;
        self.compute_with_params(inputs, &params)
    }

    /// Like [`Provider::compute`] with already parsed parameters.
    pub fn compute_with_params(&self, inputs: &[&Tensor], params: &AffineParams) -> Result<Tensor> {
        compute_gemm(inputs, params, self.backend())
    }
}

impl Default for Provider {
    fn default() -> Self {
        Self::new(BackendKind::default())
    }
}
