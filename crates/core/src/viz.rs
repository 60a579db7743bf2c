//! Display contract for the ignition field and the static overlays.
//!
//! The hour-bucket shading table here is the authoritative rendering
//! contract: presentation layers color cells from it and never derive
//! their own buckets.

use serde::Serialize;

use crate::core_types::{IgnitionRecord, RiskBucket, SlopeClass, VegetationClass};

/// Color and fill opacity for one burning cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellShade {
    /// CSS hex color.
    pub color: &'static str,
    /// Fill opacity in `[0, 1]`.
    pub opacity: f32,
}

/// Shade for an ignition record.
///
/// Cells are bucketed by ignition hour; within a bucket the fill fades
/// with the frozen intensity through `base = max(0.3, intensity x 0.8)`.
pub fn shade(record: &IgnitionRecord) -> CellShade {
    let base = (record.intensity * 0.8).max(0.3);
    let hour = record.ignition_hour;

    if hour == 0.0 {
        CellShade {
            color: "#e11d48", // red: the origin
            opacity: 0.9,
        }
    } else if hour <= 1.0 {
        CellShade {
            color: "#ea580c", // orange
            opacity: base * 0.8,
        }
    } else if hour <= 2.0 {
        CellShade {
            color: "#f59e0b", // amber
            opacity: base * 0.7,
        }
    } else if hour <= 3.0 {
        CellShade {
            color: "#eab308", // yellow
            opacity: base * 0.6,
        }
    } else if hour <= 4.0 {
        CellShade {
            color: "#84cc16", // lime
            opacity: base * 0.5,
        }
    } else {
        CellShade {
            color: "#10b981", // emerald
            opacity: base * 0.4,
        }
    }
}

/// Badge color for a risk bucket.
pub const fn risk_color(bucket: RiskBucket) -> &'static str {
    match bucket {
        RiskBucket::High => "#e11d48",
        RiskBucket::Moderate => "#f59e0b",
        RiskBucket::Low => "#eab308",
    }
}

/// Overlay color for a vegetation class.
pub const fn vegetation_color(vegetation: VegetationClass) -> &'static str {
    match vegetation {
        VegetationClass::Pine => "#059669",
        VegetationClass::Oak => "#16a34a",
        VegetationClass::Mixed => "#65a30d",
    }
}

/// Overlay color for a slope class.
pub const fn slope_color(slope: SlopeClass) -> &'static str {
    match slope {
        SlopeClass::Steep => "#dc2626",
        SlopeClass::Moderate => "#ea580c",
        SlopeClass::Gentle => "#eab308",
    }
}
