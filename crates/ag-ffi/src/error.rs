use std::cell::RefCell;
use std::ffi::CString;

use ag_kernel::GemmError;
use tracing::debug;

use crate::types::AGStatus;

/// The most recent failure on this thread.
struct LastError {
    status: AGStatus,
    message: Option<CString>,
}

thread_local! {
    static LAST_ERROR: RefCell<Option<LastError>> = const { RefCell::new(None) };
}

/// Remember a failure for `ag_last_error` / `ag_last_status` and return its
/// status so callers can `return fail(..)`.
pub fn fail(status: AGStatus, msg: String) -> AGStatus {
    debug!(?status, %msg, "ffi call failed");
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = Some(LastError {
            status,
            // interior NULs cannot cross the boundary
            message: CString::new(msg).ok(),
        });
    });
    status
}

/// Record a kernel error under the status it maps to.
pub fn fail_with(err: &GemmError) -> AGStatus {
    fail(AGStatus::from(err), err.to_string())
}

/// Take the last error message, leaving the status in place.
pub fn take_last_message() -> Option<CString> {
    LAST_ERROR.with(|e| e.borrow_mut().as_mut().and_then(|last| last.message.take()))
}

/// Status of the last failure on this thread, `Ok` if there was none.
pub fn last_status() -> AGStatus {
    LAST_ERROR.with(|e| {
        e.borrow()
            .as_ref()
            .map_or(AGStatus::Ok, |last| last.status)
    })
}

/// Forget the last failure.
pub fn clear_last_error() {
    LAST_ERROR.with(|e| *e.borrow_mut() = None);
}
