use ag_kernel::{BackendKind, Provider};

/// Opaque context handle that owns the gemm provider.
pub struct AGContext {
    pub provider: Provider,
}

impl Default for AGContext {
    fn default() -> Self {
        Self::new(BackendKind::default())
    }
}

impl AGContext {
    pub fn new(backend: BackendKind) -> Self {
        Self {
            provider: Provider::new(backend),
        }
    }
}
