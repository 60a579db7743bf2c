use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use firewatch_core::SpreadError;

/// Common interface for FFI error types.
///
/// Provides a unified way to carry both the error code passed across the
/// boundary and the diagnostic message stored thread-locally.
pub(crate) trait FirewatchError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> FirewatchErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `FirewatchError` for common FFI error cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultFirewatchError {
    code: FirewatchErrorCode,
    msg: String,
}

impl DefaultFirewatchError {
    /// Create error for null pointer passed where non-null required.
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: FirewatchErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for a poisoned lock.
    pub fn lock_poisoned(lock_name: &str) -> Self {
        Self {
            code: FirewatchErrorCode::LockPoisoned,
            msg: format!("Lock '{lock_name}' was poisoned by a panic in another thread"),
        }
    }

    /// Create error for an invalid parameter.
    pub fn invalid_parameter(message: String) -> Self {
        Self {
            code: FirewatchErrorCode::InvalidParameter,
            msg: message,
        }
    }
}

impl From<SpreadError> for DefaultFirewatchError {
    fn from(error: SpreadError) -> Self {
        let code = match error {
            SpreadError::InvalidOrigin { .. } => FirewatchErrorCode::InvalidOrigin,
            SpreadError::InvalidHorizon(_) => FirewatchErrorCode::InvalidHorizon,
            SpreadError::Computation { .. } => FirewatchErrorCode::ComputationFailed,
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

impl FirewatchError for DefaultFirewatchError {
    fn code(&self) -> FirewatchErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by engine functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirewatchErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Null pointer passed where non-null required.
    NullPointer = 1,

    /// Internal synchronization primitive was poisoned by a panic.
    LockPoisoned = 2,

    /// The requested ignition origin lies outside the grid.
    InvalidOrigin = 3,

    /// The requested horizon is negative or not finite.
    InvalidHorizon = 4,

    /// Some other parameter failed validation.
    InvalidParameter = 5,

    /// The spread computation aborted on an internal inconsistency; the
    /// previously published field is still in place.
    ComputationFailed = 6,
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, code).
    /// The `CString` is stored so the pointer returned to callers stays
    /// valid until the next error on this thread.
    static LAST_ERROR: RefCell<(Option<CString>, FirewatchErrorCode)> =
        const { RefCell::new((None, FirewatchErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage.
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, FirewatchErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage.
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, FirewatchErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns a borrowed pointer to the message, or null if no error has
/// occurred on this thread. The pointer is valid until the next FFI call on
/// this thread that records an error. **DO NOT FREE THIS POINTER.**
#[no_mangle]
pub extern "C" fn firewatch_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code for this thread.
///
/// Returns `FirewatchErrorCode::Ok` (0) if no error has occurred.
#[no_mangle]
pub extern "C" fn firewatch_get_last_error_code() -> FirewatchErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
