use std::fmt::{self, Debug};

/// Dimensions, transposes and leading dimensions of one sgemm call.
///
/// All matrices are row-major. `op(A)` is `m x k`, `op(B)` is `k x n` and C
/// is `m x n`. The leading dimension of a matrix is the distance between the
/// starts of consecutive stored rows, so for a tightly packed operand:
/// - `lda` = `k`, or `m` when `trans_a` (A is stored as `k x m`)
/// - `ldb` = `n`, or `k` when `trans_b` (B is stored as `n x k`)
/// - `ldc` = `n`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GemmLayout {
    pub trans_a: bool,
    pub trans_b: bool,
    pub m: usize,
    pub n: usize,
    pub k: usize,
    pub lda: usize,
    pub ldb: usize,
    pub ldc: usize,
}

impl GemmLayout {
    /// Layout for tightly packed row-major operands.
    pub fn packed(trans_a: bool, trans_b: bool, m: usize, n: usize, k: usize) -> Self {
        GemmLayout {
            trans_a,
            trans_b,
            m,
            n,
            k,
            lda: if trans_a { m } else { k },
            ldb: if trans_b { k } else { n },
            ldc: n,
        }
    }

    /// `(rows, cols)` of A as stored in memory.
    pub fn a_stored(&self) -> (usize, usize) {
        if self.trans_a {
            (self.k, self.m)
        } else {
            (self.m, self.k)
        }
    }

    /// `(rows, cols)` of B as stored in memory.
    pub fn b_stored(&self) -> (usize, usize) {
        if self.trans_b {
            (self.n, self.k)
        } else {
            (self.k, self.n)
        }
    }
}

/// Status code reported by an sgemm primitive.
///
/// Codes follow the oneDNN `dnnl_status_t` numbering so that statuses from a
/// native library can be passed through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GemmStatus(i32);

impl GemmStatus {
    pub const SUCCESS: GemmStatus = GemmStatus(0);
    pub const OUT_OF_MEMORY: GemmStatus = GemmStatus(1);
    pub const INVALID_ARGUMENTS: GemmStatus = GemmStatus(2);
    pub const UNIMPLEMENTED: GemmStatus = GemmStatus(3);

    /// Wrap a raw status code.
    pub fn from_code(code: i32) -> Self {
        GemmStatus(code)
    }

    /// The raw status code.
    pub fn code(&self) -> i32 {
        self.0
    }

    pub fn is_success(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for GemmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            GemmStatus::SUCCESS => write!(f, "success"),
            GemmStatus::OUT_OF_MEMORY => write!(f, "out of memory"),
            GemmStatus::INVALID_ARGUMENTS => write!(f, "invalid arguments"),
            GemmStatus::UNIMPLEMENTED => write!(f, "unimplemented"),
            GemmStatus(code) => write!(f, "status {}", code),
        }
    }
}

/// Trait for pluggable sgemm primitives.
///
/// Implementations compute
///
/// ```text
/// C = alpha * op(A) * op(B) + beta * C
/// ```
///
/// over row-major f32 buffers described by a [`GemmLayout`]. When `beta` is
/// zero the previous contents of `c` must not be read, so NaN or Inf already
/// in the buffer never reach the result. Any other `beta` scales the existing
/// contents, and `beta == 1` accumulates onto them.
///
/// Implementations must be safe to call concurrently on disjoint buffers.
pub trait GemmBackend: Send + Sync + Debug {
    /// Returns the name of this backend (e.g., "cpu").
    fn name(&self) -> &str;

    /// Run one sgemm call. Returns [`GemmStatus::SUCCESS`] or a failure code;
    /// on failure the contents of `c` are unspecified.
    fn sgemm(
        &self,
        layout: &GemmLayout,
        alpha: f32,
        a: &[f32],
        b: &[f32],
        beta: f32,
        c: &mut [f32],
    ) -> GemmStatus;
}
