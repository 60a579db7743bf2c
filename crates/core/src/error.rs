//! Error taxonomy for the prediction engine.
//!
//! Input validation failures are recoverable: the caller keeps the last
//! published field and surfaces the message. A `Computation` failure is
//! fatal for that recompute; the partially built field is discarded.

use thiserror::Error;

/// Errors surfaced by ignition-field computation.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SpreadError {
    /// The requested ignition origin lies outside the grid.
    #[error("ignition origin ({row}, {col}) is outside the {size}x{size} grid")]
    InvalidOrigin {
        /// Requested origin row.
        row: usize,
        /// Requested origin column.
        col: usize,
        /// Cells per side of the rejecting grid.
        size: usize,
    },

    /// The requested horizon is negative or not a finite number of hours.
    #[error("invalid simulation horizon: {0} hours")]
    InvalidHorizon(f32),

    /// An edge weight came out non-positive or non-finite. This violates the
    /// model contract, so the whole recompute is abandoned rather than
    /// publishing a corrupt field.
    #[error(
        "spread computation failed: delay {delay} from ({from_row}, {from_col}) \
         to ({to_row}, {to_col}) is not a positive finite number"
    )]
    Computation {
        /// The offending edge delay in hours.
        delay: f32,
        /// Source cell row.
        from_row: usize,
        /// Source cell column.
        from_col: usize,
        /// Target cell row.
        to_row: usize,
        /// Target cell column.
        to_col: usize,
    },
}

/// Errors raised while consuming a cross-screen origin handoff.
///
/// All variants are recoverable; the session falls back to its configured
/// default origin instead of crashing the receiving screen.
#[derive(Debug, Error)]
pub enum HandoffError {
    /// Nothing is pending in the slot (never posted, or already consumed).
    #[error("no pending handoff payload")]
    Empty,

    /// The payload was present but is not valid JSON of the expected shape.
    #[error("malformed handoff payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Errors raised by the scenario configuration layer.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a scenario file.
    #[error("failed to load scenario: {0}")]
    Load(String),

    /// Failed to parse scenario file contents.
    #[error("failed to parse scenario: {0}")]
    Parse(String),

    /// Failed to serialize or write a scenario file.
    #[error("failed to save scenario: {0}")]
    Save(String),
}
