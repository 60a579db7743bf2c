use std::ffi::CString;

use firewatch_core::Session;

use crate::error::{with_last_error_mut, DefaultFirewatchError, FirewatchError, FirewatchErrorCode};
use crate::instance::FirewatchInstance;

/// Set the thread-local error message and code.
pub(crate) fn set_last_error(error: &impl FirewatchError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its
/// code.
#[inline]
pub(crate) fn track_error(error: &impl FirewatchError) -> FirewatchErrorCode {
    set_last_error(error);
    error.code()
}

/// Record any error from a result in thread-local storage, converting the
/// error side to its code.
pub(crate) fn track_result<T>(
    result: Result<T, DefaultFirewatchError>,
) -> Result<T, FirewatchErrorCode> {
    result.map_err(|error| track_error(&error))
}

/// Run a fallible FFI body and fold it into an error code, recording any
/// failure in thread-local storage.
pub(crate) fn handle_ffi_result<F>(f: F) -> FirewatchErrorCode
where
    F: FnOnce() -> Result<(), DefaultFirewatchError>,
{
    match f() {
        Ok(()) => FirewatchErrorCode::Ok,
        Err(error) => track_error(&error),
    }
}

/// Borrow an instance from a raw pointer.
///
/// # Safety
/// The pointer must be null or a valid pointer returned by
/// `firewatch_new`/`firewatch_new_custom` that has not been destroyed.
pub(crate) unsafe fn instance_from_ptr<'a>(
    ptr: *const FirewatchInstance,
) -> Result<&'a FirewatchInstance, DefaultFirewatchError> {
    unsafe { ptr.as_ref() }.ok_or_else(|| DefaultFirewatchError::null_pointer("instance"))
}

/// Run a closure with a shared borrow of the session state.
pub(crate) fn with_session_read<F, T>(
    instance: &FirewatchInstance,
    f: F,
) -> Result<T, DefaultFirewatchError>
where
    F: FnOnce(&Session) -> T,
{
    let session = instance
        .session
        .read()
        .map_err(|_| DefaultFirewatchError::lock_poisoned("session RwLock"))?;
    Ok(f(&session))
}

/// Run a closure with an exclusive borrow of the session state.
pub(crate) fn with_session_write<F, T>(
    instance: &FirewatchInstance,
    f: F,
) -> Result<T, DefaultFirewatchError>
where
    F: FnOnce(&mut Session) -> T,
{
    let mut session = instance
        .session
        .write()
        .map_err(|_| DefaultFirewatchError::lock_poisoned("session RwLock"))?;
    Ok(f(&mut session))
}
