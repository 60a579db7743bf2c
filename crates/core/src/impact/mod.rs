//! Village impact assessment.
//!
//! Maps the current ignition field onto the fixed village roster. The
//! field is authoritative: a village whose nearest grid cell is frozen
//! inherits that cell's ignition hour as its ETA. Villages the field has
//! not reached fall back to a geometric estimate from the great-circle
//! distance to the origin and the assumed front speed.

use tracing::debug;

use crate::core_types::{
    AlertLevel, CellCoord, EvacuationStatus, IgnitionField, Village, VillageStatus,
};
use crate::grid::Grid;

/// Stateful assessor for a fixed village roster.
///
/// Holds the escalate-only evacuation stage per village across calls: once
/// a village is `Alerted` or `Evacuating` it never drops back, even if a
/// later field pushes its ETA out again.
#[derive(Debug, Clone)]
pub struct ImpactAssessor {
    villages: Vec<Village>,
    assumed_spread_speed_kmh: f32,
    stages: Vec<EvacuationStatus>,
}

impl ImpactAssessor {
    /// Create an assessor for a roster and fallback front speed.
    pub fn new(villages: Vec<Village>, assumed_spread_speed_kmh: f32) -> Self {
        let stages = vec![EvacuationStatus::Monitoring; villages.len()];
        Self {
            villages,
            assumed_spread_speed_kmh,
            stages,
        }
    }

    /// The roster under assessment.
    pub fn villages(&self) -> &[Village] {
        &self.villages
    }

    /// Assess every village against the field at `elapsed_hours` into the
    /// event. Statuses only ever escalate.
    pub fn assess(
        &mut self,
        grid: &Grid,
        field: &IgnitionField,
        elapsed_hours: f32,
    ) -> Vec<VillageStatus> {
        let origin_location = grid
            .cell(field.origin())
            .map_or_else(|| grid.reference(), |cell| cell.location);

        let mut statuses = Vec::with_capacity(self.villages.len());
        for (village, stage) in self.villages.iter().zip(self.stages.iter_mut()) {
            let distance_km = origin_location.distance_km(village.location);

            let nearest = grid.nearest_cell(village.location);
            let eta_hours = match field.get(CellCoord::new(nearest.row, nearest.col)) {
                Some(record) => record.ignition_hour,
                None => distance_km as f32 / self.assumed_spread_speed_kmh,
            };

            *stage = (*stage).max(EvacuationStatus::demanded(elapsed_hours, eta_hours));
            debug!(
                village = %village.name,
                eta_hours,
                stage = stage.label(),
                "village assessed"
            );

            statuses.push(VillageStatus {
                name: village.name.clone(),
                population: village.population,
                distance_km,
                eta_hours,
                alert_level: AlertLevel::from_eta_hours(eta_hours),
                status: *stage,
            });
        }
        statuses
    }

    /// Forget escalation history (used when a fresh event starts).
    pub fn reset(&mut self) {
        self.stages.fill(EvacuationStatus::Monitoring);
    }
}
