pub mod matmul;

use tracing::debug;

use crate::backend::{GemmBackend, GemmLayout, GemmStatus};

/// Pure-Rust CPU sgemm backend.
///
/// Implements the primitive with straightforward loops optimized for
/// correctness rather than peak performance. Intended as a reference
/// implementation and fallback.
#[derive(Debug, Clone)]
pub struct CpuBackend;

impl CpuBackend {
    pub fn new() -> Self {
        CpuBackend
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl GemmBackend for CpuBackend {
    fn name(&self) -> &str {
        "cpu"
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
        if !matmul::check_layout(layout, a, b, c) {
            debug!(
                ?layout,
                a_len = a.len(),
                b_len = b.len(),
                c_len = c.len(),
                "cpu sgemm: layout does not fit the buffers"
            );
            return GemmStatus::INVALID_ARGUMENTS;
        }
        matmul::sgemm_reference(layout, alpha, a, b, beta, c);
        GemmStatus::SUCCESS
    }
}
