use std::os::raw::c_char;
use std::ptr;

use firewatch_core::viz::{self, CellShade};
use firewatch_core::{
    AlertLevel, BurnStats, CellCoord, EvacuationStatus, FieldEntry, VillageStatus,
};

use crate::error::{DefaultFirewatchError, FirewatchErrorCode};
use crate::helpers::{handle_ffi_result, instance_from_ptr, track_error, with_session_read, with_session_write};
use crate::instance::FirewatchInstance;

/// FFI-friendly row of the ignition field.
/// Keep this layout stable for C/C++/C# consumers.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FieldEntryC {
    /// Cell row.
    pub row: usize,
    /// Cell column.
    pub col: usize,
    /// Hours since the origin ignited.
    pub ignition_hour: f32,
    /// Burn intensity in [0.3, 1.0].
    pub intensity: f32,
}

impl From<FieldEntry> for FieldEntryC {
    fn from(entry: FieldEntry) -> Self {
        Self {
            row: entry.row,
            col: entry.col,
            ignition_hour: entry.ignition_hour,
            intensity: entry.intensity,
        }
    }
}

/// FFI-friendly cell shade: hex color string plus fill opacity.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct CellShadeC {
    /// Null-terminated CSS hex color, e.g. "#ea580c".
    pub color_hex: [c_char; 8],
    /// Fill opacity in [0, 1].
    pub opacity: f32,
}

impl From<CellShade> for CellShadeC {
    fn from(shade: CellShade) -> Self {
        let mut color_hex = [0; 8];
        copy_str(shade.color, &mut color_hex);
        Self {
            color_hex,
            opacity: shade.opacity,
        }
    }
}

/// FFI-friendly village status snapshot.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct VillageStatusC {
    /// Null-terminated village name, truncated to fit.
    pub name: [c_char; 32],
    /// Resident population.
    pub population: u32,
    /// Great-circle distance from the fire origin, km.
    pub distance_km: f64,
    /// Hours until the fire front reaches the village.
    pub eta_hours: f32,
    /// Alert bucket: 0 = HIGH, 1 = MODERATE, 2 = LOW.
    pub alert_level: u8,
    /// Evacuation stage: 0 = MONITORING, 1 = ALERTED, 2 = EVACUATING.
    pub status: u8,
}

impl From<&VillageStatus> for VillageStatusC {
    fn from(status: &VillageStatus) -> Self {
        let mut name = [0; 32];
        copy_str(&status.name, &mut name);
        Self {
            name,
            population: status.population,
            distance_km: status.distance_km,
            eta_hours: status.eta_hours,
            alert_level: match status.alert_level {
                AlertLevel::High => 0,
                AlertLevel::Moderate => 1,
                AlertLevel::Low => 2,
            },
            status: match status.status {
                EvacuationStatus::Monitoring => 0,
                EvacuationStatus::Alerted => 1,
                EvacuationStatus::Evacuating => 2,
            },
        }
    }
}

/// FFI-friendly aggregate burn statistics.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct BurnStatsC {
    /// Cells already ignited at the elapsed time.
    pub active_cells: usize,
    /// Mean cells ignited per hour.
    pub burn_rate_per_hour: f32,
    /// Ground covered by the active cells, km².
    pub burned_area_km2: f32,
    /// Progress through the computed horizon, [0, 100].
    pub containment_pct: f32,
}

impl From<BurnStats> for BurnStatsC {
    fn from(stats: BurnStats) -> Self {
        Self {
            active_cells: stats.active_cells,
            burn_rate_per_hour: stats.burn_rate_per_hour,
            burned_area_km2: stats.burned_area_km2,
            containment_pct: stats.containment_pct,
        }
    }
}

/// Copy a string into a fixed null-terminated C buffer, truncating if
/// needed.
fn copy_str(src: &str, dst: &mut [c_char]) {
    let take = src.len().min(dst.len() - 1);
    for (slot, byte) in dst.iter_mut().zip(src.as_bytes()[..take].iter()) {
        *slot = *byte as c_char;
    }
    dst[take] = 0;
}

/// Read one cell's ignition record from the published field.
///
/// `out_found` reports whether the cell is in the field (i.e. ignites
/// within the current horizon); when false, `out_entry` is untouched.
///
/// # Safety
/// `ptr` must be null or a valid instance pointer; `out_entry` and
/// `out_found` must be valid, non-null pointers to writable memory.
#[no_mangle]
pub unsafe extern "C" fn firewatch_get_cell_record(
    ptr: *const FirewatchInstance,
    row: usize,
    col: usize,
    out_entry: *mut FieldEntryC,
    out_found: *mut bool,
) -> FirewatchErrorCode {
    if out_entry.is_null() {
        return track_error(&DefaultFirewatchError::null_pointer("out_entry"));
    }
    if out_found.is_null() {
        return track_error(&DefaultFirewatchError::null_pointer("out_found"));
    }

    handle_ffi_result(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_session_read(instance, |session| {
            let coord = CellCoord::new(row, col);
            match session.field().get(coord) {
                Some(record) => unsafe {
                    *out_entry = FieldEntryC {
                        row,
                        col,
                        ignition_hour: record.ignition_hour,
                        intensity: record.intensity,
                    };
                    *out_found = true;
                },
                None => unsafe {
                    *out_found = false;
                },
            }
        })
    })
}

/// Borrow the whole published field as an array ordered by ignition hour.
///
/// The returned pointer reuses an internal buffer: it is valid until the
/// next call to this function or any state-changing call on the same
/// instance, and must not be freed.
///
/// # Safety
/// `ptr` must be null or a valid instance pointer; `out_len` and
/// `out_array` must be valid, non-null pointers to writable memory.
#[no_mangle]
pub unsafe extern "C" fn firewatch_get_field(
    ptr: *const FirewatchInstance,
    out_len: *mut usize,
    out_array: *mut *const FieldEntryC,
) -> FirewatchErrorCode {
    if out_len.is_null() {
        return track_error(&DefaultFirewatchError::null_pointer("out_len"));
    }
    if out_array.is_null() {
        return track_error(&DefaultFirewatchError::null_pointer("out_array"));
    }

    let result = handle_ffi_result(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let mut snapshot = instance
            .field_snapshot
            .lock()
            .map_err(|_| DefaultFirewatchError::lock_poisoned("field_snapshot Mutex"))?;
        snapshot.clear();

        with_session_read(instance, |session| {
            snapshot.extend(session.field().entries().into_iter().map(FieldEntryC::from));
        })?;

        unsafe {
            *out_len = snapshot.len();
            *out_array = snapshot.as_ptr();
        }
        Ok(())
    });

    if result != FirewatchErrorCode::Ok {
        unsafe {
            *out_len = 0;
            *out_array = ptr::null();
        }
    }
    result
}

/// Read the display shade for one burning cell.
///
/// `out_found` is false for cells absent from the field; `out_shade` is
/// untouched in that case.
///
/// # Safety
/// `ptr` must be null or a valid instance pointer; `out_shade` and
/// `out_found` must be valid, non-null pointers to writable memory.
#[no_mangle]
pub unsafe extern "C" fn firewatch_get_shade(
    ptr: *const FirewatchInstance,
    row: usize,
    col: usize,
    out_shade: *mut CellShadeC,
    out_found: *mut bool,
) -> FirewatchErrorCode {
    if out_shade.is_null() {
        return track_error(&DefaultFirewatchError::null_pointer("out_shade"));
    }
    if out_found.is_null() {
        return track_error(&DefaultFirewatchError::null_pointer("out_found"));
    }

    handle_ffi_result(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_session_read(instance, |session| {
            match session.field().get(CellCoord::new(row, col)) {
                Some(record) => unsafe {
                    *out_shade = CellShadeC::from(viz::shade(&record));
                    *out_found = true;
                },
                None => unsafe {
                    *out_found = false;
                },
            }
        })
    })
}

/// Assess the village roster at `elapsed_hours` into the event and borrow
/// the result as an array.
///
/// Escalation state is held inside the instance, so evacuation stages never
/// de-escalate across calls. The returned pointer reuses an internal
/// buffer with the same lifetime rules as `firewatch_get_field`.
///
/// # Safety
/// `ptr` must be null or a valid instance pointer; `out_len` and
/// `out_array` must be valid, non-null pointers to writable memory.
#[no_mangle]
pub unsafe extern "C" fn firewatch_assess_villages(
    ptr: *const FirewatchInstance,
    elapsed_hours: f32,
    out_len: *mut usize,
    out_array: *mut *const VillageStatusC,
) -> FirewatchErrorCode {
    if out_len.is_null() {
        return track_error(&DefaultFirewatchError::null_pointer("out_len"));
    }
    if out_array.is_null() {
        return track_error(&DefaultFirewatchError::null_pointer("out_array"));
    }

    let result = handle_ffi_result(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let mut snapshot = instance
            .village_snapshot
            .lock()
            .map_err(|_| DefaultFirewatchError::lock_poisoned("village_snapshot Mutex"))?;
        snapshot.clear();

        with_session_write(instance, |session| {
            let statuses = session.assess_villages(elapsed_hours);
            snapshot.extend(statuses.iter().map(VillageStatusC::from));
        })?;

        unsafe {
            *out_len = snapshot.len();
            *out_array = snapshot.as_ptr();
        }
        Ok(())
    });

    if result != FirewatchErrorCode::Ok {
        unsafe {
            *out_len = 0;
            *out_array = ptr::null();
        }
    }
    result
}

/// Read aggregate burn statistics at `elapsed_hours` into the event.
///
/// # Safety
/// `ptr` must be null or a valid instance pointer; `out_stats` must be a
/// valid, non-null pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn firewatch_get_stats(
    ptr: *const FirewatchInstance,
    elapsed_hours: f32,
    out_stats: *mut BurnStatsC,
) -> FirewatchErrorCode {
    if out_stats.is_null() {
        return track_error(&DefaultFirewatchError::null_pointer("out_stats"));
    }

    handle_ffi_result(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_session_read(instance, |session| {
            let stats = session.burn_stats(elapsed_hours);
            unsafe {
                *out_stats = BurnStatsC::from(stats);
            }
        })
    })
}
