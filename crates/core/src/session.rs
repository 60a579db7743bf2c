//! Deployment session: the grid, the live configuration and the last
//! published ignition field.
//!
//! A session owns the read-only grid for its lifetime and recomputes the
//! ignition field in full whenever origin, wind or horizon change. The
//! recompute is all-or-nothing: on failure the previously published field
//! stays in place and the error is surfaced, so consumers never observe a
//! partial field. Changing origin or wind supersedes any earlier
//! configuration entirely (last write wins).

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::ScenarioConfig;
use crate::core_types::{
    BurnStats, CellCoord, IgnitionField, Village, VillageStatus, WindVector,
};
use crate::error::{HandoffError, SpreadError};
use crate::grid::Grid;
use crate::impact::ImpactAssessor;
use crate::spread::SpreadModel;

/// Cross-screen origin handoff payload.
///
/// The risk-map screen posts this when the operator picks an ignition cell;
/// the simulation screen consumes it exactly once. The derived cell
/// attributes ride along for display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandoffPayload {
    /// The selected origin cell.
    #[serde(rename = "startCell")]
    pub start_cell: CellCoord,
    /// Derived attributes of the selected cell, display only.
    #[serde(rename = "cellData", default, skip_serializing_if = "Option::is_none")]
    pub cell_data: Option<serde_json::Value>,
}

/// Transient, session-scoped slot for the handoff payload.
///
/// Holds at most one raw payload; taking it clears the slot whether or not
/// the payload parses, so a payload is consumed exactly once.
#[derive(Debug, Default)]
pub struct HandoffSlot {
    payload: Option<String>,
}

impl HandoffSlot {
    /// Post a raw JSON payload, replacing any unconsumed one.
    pub fn post(&mut self, raw: impl Into<String>) {
        self.payload = Some(raw.into());
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.payload.is_none()
    }

    /// Take and parse the pending payload, clearing the slot.
    ///
    /// # Errors
    /// `HandoffError::Empty` if nothing was posted,
    /// `HandoffError::Malformed` if the payload is not valid JSON of the
    /// expected shape.
    pub fn take(&mut self) -> Result<HandoffPayload, HandoffError> {
        let raw = self.payload.take().ok_or(HandoffError::Empty)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// One deployment run of the prediction engine.
pub struct Session {
    config: ScenarioConfig,
    seed: u64,
    grid: Grid,
    model: SpreadModel,
    origin: CellCoord,
    wind: WindVector,
    horizon_hours: f32,
    field: IgnitionField,
    assessor: ImpactAssessor,
}

impl Session {
    /// Start a session: generate the grid from the seed and publish the
    /// initial field (horizon 0, configured defaults).
    ///
    /// # Errors
    /// Propagates `SpreadError` if the configured default origin is invalid
    /// for the configured grid.
    pub fn new(config: ScenarioConfig, seed: u64) -> Result<Self, SpreadError> {
        let grid = Grid::generate(&config, seed);
        let model = SpreadModel::default();
        let origin = config.default_origin;
        let wind = config.default_wind;
        let field = model.compute(&grid, origin, &wind, 0.0, seed)?;
        let assessor =
            ImpactAssessor::new(Village::chamoli_roster(), config.assumed_spread_speed_kmh);

        info!(region = %config.name, size = grid.size(), seed, "session started");

        Ok(Self {
            config,
            seed,
            grid,
            model,
            origin,
            wind,
            horizon_hours: 0.0,
            field,
            assessor,
        })
    }

    /// Replace the village roster (deployment-specific rosters).
    pub fn with_villages(mut self, villages: Vec<Village>) -> Self {
        self.assessor = ImpactAssessor::new(villages, self.config.assumed_spread_speed_kmh);
        self
    }

    /// The scenario configuration.
    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    /// The session's immutable grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The last successfully published field.
    pub fn field(&self) -> &IgnitionField {
        &self.field
    }

    /// The current ignition origin.
    pub fn origin(&self) -> CellCoord {
        self.origin
    }

    /// The current wind.
    pub fn wind(&self) -> WindVector {
        self.wind
    }

    /// The current horizon in hours.
    pub fn horizon_hours(&self) -> f32 {
        self.horizon_hours
    }

    /// Move the scrubber: recompute the field up to a new horizon.
    ///
    /// # Errors
    /// On failure the previous horizon and field remain published.
    pub fn set_horizon(&mut self, horizon_hours: f32) -> Result<(), SpreadError> {
        let previous = self.horizon_hours;
        self.horizon_hours = horizon_hours;
        let result = self.republish();
        if result.is_err() {
            self.horizon_hours = previous;
        }
        result
    }

    /// Select a new ignition origin and recompute.
    ///
    /// # Errors
    /// On failure the previous origin and field remain published.
    pub fn set_origin(&mut self, origin: CellCoord) -> Result<(), SpreadError> {
        let previous = self.origin;
        self.origin = origin;
        let result = self.republish();
        if result.is_err() {
            self.origin = previous;
        }
        result
    }

    /// Change the wind and recompute.
    ///
    /// # Errors
    /// On failure the previous wind and field remain published.
    pub fn set_wind(&mut self, wind: WindVector) -> Result<(), SpreadError> {
        let previous = self.wind;
        self.wind = wind;
        let result = self.republish();
        if result.is_err() {
            self.wind = previous;
        }
        result
    }

    /// Consume a posted cross-screen origin selection.
    ///
    /// A malformed payload or one pointing outside the grid falls back to
    /// the configured default origin; an empty slot leaves the current
    /// origin untouched. Returns the origin in effect afterwards.
    ///
    /// # Errors
    /// Propagates `SpreadError` only if the resulting recompute fails.
    pub fn adopt_handoff(&mut self, slot: &mut HandoffSlot) -> Result<CellCoord, SpreadError> {
        let target = match slot.take() {
            Ok(payload) => payload.start_cell,
            Err(HandoffError::Empty) => return Ok(self.origin),
            Err(error) => {
                warn!(%error, "malformed handoff payload; using default origin");
                self.config.default_origin
            }
        };
        let target = if self.grid.contains(target) {
            target
        } else {
            warn!(
                row = target.row,
                col = target.col,
                "handoff origin out of bounds; using default origin"
            );
            self.config.default_origin
        };
        self.set_origin(target)?;
        Ok(self.origin)
    }

    /// Assess the village roster at `elapsed_hours` into the event.
    pub fn assess_villages(&mut self, elapsed_hours: f32) -> Vec<VillageStatus> {
        self.assessor.assess(&self.grid, &self.field, elapsed_hours)
    }

    /// Aggregate burn statistics at `elapsed_hours` into the event.
    pub fn burn_stats(&self, elapsed_hours: f32) -> BurnStats {
        self.field.stats(elapsed_hours, self.grid.cell_area_km2())
    }

    /// Recompute and publish the field for the current configuration.
    fn republish(&mut self) -> Result<(), SpreadError> {
        match self
            .model
            .compute(&self.grid, self.origin, &self.wind, self.horizon_hours, self.seed)
        {
            Ok(field) => {
                self.field = field;
                Ok(())
            }
            Err(error) => {
                warn!(%error, "recompute failed; keeping last published field");
                Err(error)
            }
        }
    }
}
