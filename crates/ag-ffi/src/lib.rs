mod context;
mod error;
mod types;

pub use context::*;
pub use error::*;
pub use types::*;

use std::ffi::CString;
use std::os::raw::c_char;
use std::panic::AssertUnwindSafe;

use ag_kernel::{resolve, AffineMatMulKernel, AffineParams, GemmError};
use ag_tensor::{DType, Shape};

/// Execute a closure that returns an `AGStatus`, catching any panics
/// and converting them into `AGStatus::ErrorInternal`.
fn catch_panic<F: FnOnce() -> AGStatus>(f: F) -> AGStatus {
    match std::panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(status) => status,
        Err(_) => fail(AGStatus::ErrorInternal, "internal panic".to_string()),
    }
}

/// A caller-owned tensor whose pointers have been checked.
struct BorrowedTensor<'a> {
    shape: Shape,
    dtype: DType,
    data: &'a [f32],
}

/// Validate the raw parts of a view and borrow it.
///
/// # Safety
/// Non-null `dims` must point at `rank` readable sizes and non-null `data`
/// at the product of those sizes readable f32 values, valid for `'a`.
unsafe fn borrow_view<'a>(
    name: &str,
    view: &AGTensorView,
) -> Result<BorrowedTensor<'a>, (AGStatus, String)> {
    let invalid = |msg: &str| (AGStatus::ErrorInvalidArgument, format!("{}: {}", name, msg));

    let dims: &[usize] = if view.rank == 0 {
        &[]
    } else if view.dims.is_null() {
        return Err(invalid("dims is null"));
    } else {
        std::slice::from_raw_parts(view.dims, view.rank)
    };
    let dtype = DType::from_onnx_type(view.dtype)
        .ok_or_else(|| invalid(&format!("unknown dtype id {}", view.dtype)))?;
    let numel = dims
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(|| invalid("element count overflows"))?;

    let data: &[f32] = if numel == 0 {
        &[]
    } else if view.data.is_null() {
        return Err(invalid("data is null"));
    } else {
        std::slice::from_raw_parts(view.data, numel)
    };

    Ok(BorrowedTensor {
        shape: Shape::from_slice(dims),
        dtype,
        data,
    })
}

/// Resolve shapes and compute into the caller's output buffer.
///
/// # Safety
/// `y` must point at `y_len` writable f32 values that do not alias the inputs.
unsafe fn gemm_into(
    ctx: &AGContext,
    params: AffineParams,
    inputs: [&BorrowedTensor<'_>; 3],
    y: *mut f32,
    y_len: usize,
) -> Result<(), GemmError> {
    let def = ctx.provider.kernel_def();
    for input in inputs {
        def.check_dtype(input.dtype)?;
    }
    let [a, b, c] = inputs;

    let (dims, pattern) = resolve(&a.shape, params.trans_a, &b.shape, params.trans_b, &c.shape)?;
    let expected = dims.m.checked_mul(dims.n).unwrap_or(usize::MAX);
    if y_len != expected {
        return Err(GemmError::BufferLength {
            buffer: "Y",
            expected,
            got: y_len,
        });
    }

    let output = std::slice::from_raw_parts_mut(y, y_len);
    AffineMatMulKernel::new(params).compute(
        ctx.provider.backend(),
        a.data,
        b.data,
        c.data,
        &dims,
        pattern,
        output,
    )
}

/// Create a new gemm context.
///
/// On success, writes a heap-allocated `AGContext` pointer into `*ctx_out`
/// and returns `AGStatus::Ok`. The caller must later call `ag_context_destroy`
/// to free the context.
#[no_mangle]
pub extern "C" fn ag_context_create(
    backend: AGBackendType,
    ctx_out: *mut *mut AGContext,
) -> AGStatus {
    catch_panic(|| {
        if ctx_out.is_null() {
            return fail(AGStatus::ErrorInvalidArgument, "ctx_out is null".to_string());
        }
        let ctx = Box::new(AGContext::new(backend.into()));
        unsafe {
            *ctx_out = Box::into_raw(ctx);
        }
        AGStatus::Ok
    })
}

/// Destroy a context previously created by `ag_context_create`.
///
/// Passing a null pointer is a no-op and returns `AGStatus::Ok`.
#[no_mangle]
pub unsafe extern "C" fn ag_context_destroy(ctx: *mut AGContext) -> AGStatus {
    if ctx.is_null() {
        return AGStatus::Ok;
    }
    drop(Box::from_raw(ctx));
    AGStatus::Ok
}

/// Compute `Y = alpha * op(A) * op(B) + beta * C` into a caller-owned buffer.
///
/// `y` must hold exactly `M * N` elements, written row-major. C may be a
/// scalar, an `[N]` or `[1, N]` row, an `[M, 1]` column or a full `[M, N]`
/// matrix. `y` must not overlap the data of A, B or C. On failure the
/// contents of `y` are unspecified and the reason is available from
/// `ag_last_error`.
///
/// # Safety
/// Each view must satisfy the `AGTensorView` contract, and `y` must point at
/// `y_len` writable f32 values that no other pointer passed here aliases.
#[no_mangle]
pub unsafe extern "C" fn ag_gemm(
    ctx: *const AGContext,
    params: AGGemmParams,
    a: *const AGTensorView,
    b: *const AGTensorView,
    c: *const AGTensorView,
    y: *mut f32,
    y_len: usize,
) -> AGStatus {
    catch_panic(|| {
        clear_last_error();
        if ctx.is_null() || a.is_null() || b.is_null() || c.is_null() || y.is_null() {
            return fail(AGStatus::ErrorInvalidArgument, "null argument".to_string());
        }
        let ctx = unsafe { &*ctx };

        let views = unsafe { [("A", &*a), ("B", &*b), ("C", &*c)] };
        let mut borrowed = Vec::with_capacity(views.len());
        for (name, view) in views {
            match unsafe { borrow_view(name, view) } {
                Ok(t) => borrowed.push(t),
                Err((status, msg)) => return fail(status, msg),
            }
        }

        let inputs = [&borrowed[0], &borrowed[1], &borrowed[2]];
        match unsafe { gemm_into(ctx, params.into(), inputs, y, y_len) } {
            Ok(()) => AGStatus::Ok,
            Err(e) => fail_with(&e),
        }
    })
}

/// Status of the most recent failed call on this thread, or `Ok`.
#[no_mangle]
pub extern "C" fn ag_last_status() -> AGStatus {
    last_status()
}

/// Retrieve the last error message.
///
/// Returns a pointer to a C string describing the most recent error, or
/// null if no error has occurred. The caller must free the returned string
/// with `ag_free_string`.
#[no_mangle]
pub extern "C" fn ag_last_error() -> *const c_char {
    match take_last_message() {
        Some(e) => e.into_raw(),
        None => std::ptr::null(),
    }
}

/// Free a string previously returned by `ag_last_error`.
#[no_mangle]
pub unsafe extern "C" fn ag_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
