use std::ptr;
use std::sync::{Mutex, RwLock};

use firewatch_core::{CellCoord, HandoffSlot, LatLng, ScenarioConfig, Session};

use crate::error::{DefaultFirewatchError, FirewatchErrorCode};
use crate::helpers::{track_error, track_result};
use crate::queries::{FieldEntryC, VillageStatusC};

/// The main prediction-engine context.
///
/// Holds one deployment session behind an `RwLock` so presentation layers
/// can query concurrently while horizon scrubs and origin changes take the
/// write lock briefly. The snapshot buffers back the borrowed arrays handed
/// out by the query functions and are reused across calls.
pub struct FirewatchInstance {
    pub(crate) session: RwLock<Session>,
    /// Pending cross-screen origin selection, consumed exactly once.
    pub(crate) handoff: Mutex<HandoffSlot>,
    /// Cached snapshot for `firewatch_get_field`.
    pub(crate) field_snapshot: Mutex<Vec<FieldEntryC>>,
    /// Cached snapshot for `firewatch_assess_villages`.
    pub(crate) village_snapshot: Mutex<Vec<VillageStatusC>>,
}

impl FirewatchInstance {
    pub(crate) fn create(
        config: ScenarioConfig,
        seed: u64,
    ) -> Result<Box<Self>, DefaultFirewatchError> {
        let cells = config.grid_size * config.grid_size;
        let session = Session::new(config, seed)?;

        Ok(Box::new(Self {
            session: RwLock::new(session),
            handoff: Mutex::new(HandoffSlot::default()),
            field_snapshot: Mutex::new(Vec::with_capacity(cells)),
            village_snapshot: Mutex::new(Vec::new()),
        }))
    }
}

/// Create an engine instance for the default deployment scenario.
///
/// Returns `FirewatchErrorCode::Ok` with a valid instance in
/// `out_instance`, or a non-zero code with `out_instance` set to null. The
/// caller owns the instance and must destroy it exactly once with
/// `firewatch_destroy`.
///
/// # Safety
/// `out_instance` must be a valid, non-null pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn firewatch_new(
    seed: u64,
    out_instance: *mut *mut FirewatchInstance,
) -> FirewatchErrorCode {
    unsafe { firewatch_new_with(ScenarioConfig::chamoli(), seed, out_instance) }
}

/// Create an engine instance for a custom square lattice.
///
/// `grid_size` is the number of cells per side (must be positive);
/// `cell_size_km` the side length of one cell; `reference_lat`/
/// `reference_lng` the geographic center the lattice is anchored to. All
/// other scenario parameters keep their deployment defaults.
///
/// # Safety
/// `out_instance` must be a valid, non-null pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn firewatch_new_custom(
    grid_size: u32,
    cell_size_km: f32,
    reference_lat: f64,
    reference_lng: f64,
    seed: u64,
    out_instance: *mut *mut FirewatchInstance,
) -> FirewatchErrorCode {
    if grid_size == 0 {
        let error =
            DefaultFirewatchError::invalid_parameter("grid_size must be positive".to_owned());
        unsafe {
            if !out_instance.is_null() {
                *out_instance = ptr::null_mut();
            }
        }
        return track_error(&error);
    }
    if !(cell_size_km.is_finite() && cell_size_km > 0.0) {
        let error = DefaultFirewatchError::invalid_parameter(format!(
            "cell_size_km must be finite and positive, got {cell_size_km}"
        ));
        unsafe {
            if !out_instance.is_null() {
                *out_instance = ptr::null_mut();
            }
        }
        return track_error(&error);
    }

    let base = ScenarioConfig::chamoli();
    let size = grid_size as usize;
    let config = ScenarioConfig {
        grid_size: size,
        cell_size_km,
        reference: LatLng::new(reference_lat, reference_lng),
        // Keep the default origin centered on lattices too small for the
        // deployment default.
        default_origin: CellCoord::new(size / 2, size / 2),
        ..base
    };

    unsafe { firewatch_new_with(config, seed, out_instance) }
}

unsafe fn firewatch_new_with(
    config: ScenarioConfig,
    seed: u64,
    out_instance: *mut *mut FirewatchInstance,
) -> FirewatchErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultFirewatchError::null_pointer("out_instance"));
    }

    match track_result(FirewatchInstance::create(config, seed)) {
        Ok(instance) => {
            unsafe {
                *out_instance = Box::into_raw(instance);
            }
            FirewatchErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                *out_instance = ptr::null_mut();
            }
            code
        }
    }
}

/// Destroy an instance previously created by `firewatch_new` or
/// `firewatch_new_custom`. A null pointer is a no-op.
///
/// # Safety
/// The pointer must have been created by this library's constructors, must
/// not have been destroyed already, and must not be used again afterwards.
#[no_mangle]
pub unsafe extern "C" fn firewatch_destroy(ptr: *mut FirewatchInstance) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: the pointer came from Box::into_raw in firewatch_new_with and
    // the contract above rules out double-free and use-after-free.
    unsafe {
        drop(Box::from_raw(ptr));
    }
}
