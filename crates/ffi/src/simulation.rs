use std::ffi::CStr;
use std::os::raw::c_char;

use firewatch_core::{CellCoord, WindVector};

use crate::error::{DefaultFirewatchError, FirewatchErrorCode};
use crate::helpers::{handle_ffi_result, instance_from_ptr, track_error, with_session_write};
use crate::instance::FirewatchInstance;

/// Scrub the simulation horizon, recomputing the published field.
///
/// On failure the previously published field stays in place and the error
/// is reported; consumers never observe a partial field.
///
/// # Safety
/// `ptr` must be null or a valid pointer from the constructors.
#[no_mangle]
pub unsafe extern "C" fn firewatch_set_horizon(
    ptr: *const FirewatchInstance,
    horizon_hours: f32,
) -> FirewatchErrorCode {
    handle_ffi_result(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_session_write(instance, |session| session.set_horizon(horizon_hours))?
            .map_err(DefaultFirewatchError::from)
    })
}

/// Select a new ignition origin, recomputing the published field.
///
/// # Safety
/// `ptr` must be null or a valid pointer from the constructors.
#[no_mangle]
pub unsafe extern "C" fn firewatch_set_origin(
    ptr: *const FirewatchInstance,
    row: usize,
    col: usize,
) -> FirewatchErrorCode {
    handle_ffi_result(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_session_write(instance, |session| {
            session.set_origin(CellCoord::new(row, col))
        })?
        .map_err(DefaultFirewatchError::from)
    })
}

/// Change the wind forcing, recomputing the published field.
///
/// `direction_degrees` is the bearing the wind pushes the fire toward
/// (north = 0, east = 90); `speed_kmh` must be non-negative and is clamped
/// at zero otherwise.
///
/// # Safety
/// `ptr` must be null or a valid pointer from the constructors.
#[no_mangle]
pub unsafe extern "C" fn firewatch_set_wind(
    ptr: *const FirewatchInstance,
    direction_degrees: f32,
    speed_kmh: f32,
) -> FirewatchErrorCode {
    handle_ffi_result(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        if !direction_degrees.is_finite() || !speed_kmh.is_finite() {
            return Err(DefaultFirewatchError::invalid_parameter(format!(
                "wind parameters must be finite, got direction {direction_degrees} speed {speed_kmh}"
            )));
        }
        with_session_write(instance, |session| {
            session.set_wind(WindVector::new(direction_degrees, speed_kmh))
        })?
        .map_err(DefaultFirewatchError::from)
    })
}

/// Post a cross-screen origin-selection payload into the handoff slot.
///
/// The payload is the JSON the selection screen emits:
/// `{"startCell":{"row":R,"col":C},"cellData":{...}}`. Posting replaces any
/// unconsumed payload. The payload is validated when adopted, not here;
/// a malformed one makes the adopting screen fall back to its default
/// origin rather than fail.
///
/// # Safety
/// `ptr` must be null or a valid instance pointer; `payload_json` must be
/// null or a valid null-terminated string.
#[no_mangle]
pub unsafe extern "C" fn firewatch_post_handoff(
    ptr: *const FirewatchInstance,
    payload_json: *const c_char,
) -> FirewatchErrorCode {
    handle_ffi_result(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        if payload_json.is_null() {
            return Err(DefaultFirewatchError::null_pointer("payload_json"));
        }
        let raw = unsafe { CStr::from_ptr(payload_json) }
            .to_str()
            .map_err(|_| {
                DefaultFirewatchError::invalid_parameter(
                    "payload_json is not valid UTF-8".to_owned(),
                )
            })?;

        let mut slot = instance
            .handoff
            .lock()
            .map_err(|_| DefaultFirewatchError::lock_poisoned("handoff Mutex"))?;
        slot.post(raw);
        Ok(())
    })
}

/// Consume the pending handoff payload (exactly once) and adopt its origin,
/// falling back to the scenario's default origin when the payload is
/// malformed or out of bounds. Writes the origin now in effect to
/// `out_row`/`out_col`.
///
/// # Safety
/// `ptr` must be null or a valid instance pointer; `out_row` and `out_col`
/// must be valid, non-null pointers to writable memory.
#[no_mangle]
pub unsafe extern "C" fn firewatch_adopt_handoff(
    ptr: *const FirewatchInstance,
    out_row: *mut usize,
    out_col: *mut usize,
) -> FirewatchErrorCode {
    if out_row.is_null() {
        return track_error(&DefaultFirewatchError::null_pointer("out_row"));
    }
    if out_col.is_null() {
        return track_error(&DefaultFirewatchError::null_pointer("out_col"));
    }

    handle_ffi_result(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let mut slot = instance
            .handoff
            .lock()
            .map_err(|_| DefaultFirewatchError::lock_poisoned("handoff Mutex"))?;

        let origin = with_session_write(instance, |session| session.adopt_handoff(&mut slot))?
            .map_err(DefaultFirewatchError::from)?;

        unsafe {
            *out_row = origin.row;
            *out_col = origin.col;
        }
        Ok(())
    })
}
