//! The ignition field: the spread engine's output.

use std::collections::BTreeMap;
use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Integer grid coordinate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CellCoord {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
}

impl CellCoord {
    /// Create a coordinate.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// Ignition time and burn intensity frozen for a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IgnitionRecord {
    /// Hours since the origin ignited, `>= 0`.
    pub ignition_hour: f32,
    /// Burn intensity in `[0.3, 1.0]`, 1.0 at the origin.
    pub intensity: f32,
}

/// One row of the ordered-list serialization of a field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldEntry {
    /// Cell row.
    pub row: usize,
    /// Cell column.
    pub col: usize,
    /// Hours since the origin ignited.
    pub ignition_hour: f32,
    /// Burn intensity in `[0.3, 1.0]`.
    pub intensity: f32,
}

/// Aggregate burn statistics for a field at a given elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BurnStats {
    /// Cells already ignited at the elapsed time.
    pub active_cells: usize,
    /// Mean cells ignited per hour since the origin ignition.
    pub burn_rate_per_hour: f32,
    /// Ground covered by the active cells, km².
    pub burned_area_km2: f32,
    /// How far through the computed horizon the clock has run, `[0, 100]`.
    pub containment_pct: f32,
}

/// Sparse mapping from cell coordinate to ignition record.
///
/// A cell is present iff it ignites within the horizon the field was
/// computed for; absence means "not yet burning". Fields are immutable once
/// published and recomputed in full whenever origin, wind or horizon change.
#[derive(Debug, Clone, PartialEq)]
pub struct IgnitionField {
    origin: CellCoord,
    horizon_hours: f32,
    records: FxHashMap<CellCoord, IgnitionRecord>,
}

impl IgnitionField {
    /// Empty field for the given origin and horizon. Only the spread engine
    /// builds fields; consumers receive them read-only.
    pub(crate) fn new(origin: CellCoord, horizon_hours: f32) -> Self {
        Self {
            origin,
            horizon_hours,
            records: FxHashMap::default(),
        }
    }

    /// Freeze a record for a cell. First freeze wins; the engine never
    /// revisits a frozen cell.
    pub(crate) fn freeze(&mut self, coord: CellCoord, record: IgnitionRecord) {
        self.records.entry(coord).or_insert(record);
    }

    /// The origin cell the field was computed from.
    pub fn origin(&self) -> CellCoord {
        self.origin
    }

    /// The horizon the field was computed up to, in hours.
    pub fn horizon_hours(&self) -> f32 {
        self.horizon_hours
    }

    /// Record for a cell, if it ignites within the horizon.
    pub fn get(&self, coord: CellCoord) -> Option<IgnitionRecord> {
        self.records.get(&coord).copied()
    }

    /// Whether a cell ignites within the horizon.
    pub fn contains(&self, coord: CellCoord) -> bool {
        self.records.contains_key(&coord)
    }

    /// Number of cells in the field.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the field holds no cells at all (never true for a published
    /// field: the origin is always present).
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over all frozen cells in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, IgnitionRecord)> + '_ {
        self.records.iter().map(|(coord, record)| (*coord, *record))
    }

    /// Serializable entry list, ordered by ignition hour, then row, then
    /// column.
    pub fn entries(&self) -> Vec<FieldEntry> {
        let mut entries: Vec<FieldEntry> = self
            .records
            .iter()
            .map(|(coord, record)| FieldEntry {
                row: coord.row,
                col: coord.col,
                ignition_hour: record.ignition_hour,
                intensity: record.intensity,
            })
            .collect();
        entries.sort_by(|a, b| {
            a.ignition_hour
                .total_cmp(&b.ignition_hour)
                .then_with(|| (a.row, a.col).cmp(&(b.row, b.col)))
        });
        entries
    }

    /// Serializable sparse map keyed `"row,col"`.
    pub fn sparse_map(&self) -> BTreeMap<String, IgnitionRecord> {
        self.records
            .iter()
            .map(|(coord, record)| (coord.to_string(), *record))
            .collect()
    }

    /// Aggregate statistics at `elapsed_hours` into the event.
    pub fn stats(&self, elapsed_hours: f32, cell_area_km2: f32) -> BurnStats {
        let active_cells = self
            .records
            .values()
            .filter(|record| record.ignition_hour <= elapsed_hours)
            .count();
        let burn_rate_per_hour = if elapsed_hours > 0.0 {
            active_cells as f32 / elapsed_hours
        } else {
            0.0
        };
        let containment_pct = if self.horizon_hours <= 0.0 {
            100.0
        } else {
            (elapsed_hours / self.horizon_hours * 100.0).min(100.0)
        };

        BurnStats {
            active_cells,
            burn_rate_per_hour,
            burned_area_km2: active_cells as f32 * cell_area_km2,
            containment_pct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_field() -> IgnitionField {
        let mut field = IgnitionField::new(CellCoord::new(1, 1), 3.0);
        field.freeze(
            CellCoord::new(1, 1),
            IgnitionRecord {
                ignition_hour: 0.0,
                intensity: 1.0,
            },
        );
        field.freeze(
            CellCoord::new(1, 2),
            IgnitionRecord {
                ignition_hour: 0.9,
                intensity: 0.91,
            },
        );
        field.freeze(
            CellCoord::new(0, 1),
            IgnitionRecord {
                ignition_hour: 2.4,
                intensity: 0.76,
            },
        );
        field
    }

    #[test]
    fn test_first_freeze_wins() {
        let mut field = IgnitionField::new(CellCoord::new(0, 0), 1.0);
        let coord = CellCoord::new(0, 1);
        field.freeze(
            coord,
            IgnitionRecord {
                ignition_hour: 0.5,
                intensity: 0.95,
            },
        );
        field.freeze(
            coord,
            IgnitionRecord {
                ignition_hour: 0.9,
                intensity: 0.91,
            },
        );
        assert_eq!(field.get(coord).unwrap().ignition_hour, 0.5);
    }

    #[test]
    fn test_entries_ordered_by_hour() {
        let entries = sample_field().entries();
        assert_eq!(entries.len(), 3);
        assert!(entries.windows(2).all(|w| w[0].ignition_hour <= w[1].ignition_hour));
        assert_eq!((entries[0].row, entries[0].col), (1, 1));
    }

    #[test]
    fn test_sparse_map_keys() {
        let map = sample_field().sparse_map();
        assert!(map.contains_key("1,1"));
        assert!(map.contains_key("0,1"));
        assert!(!map.contains_key("9,9"));
    }

    #[test]
    fn test_stats_counts_active_cells() {
        let field = sample_field();
        let stats = field.stats(1.0, 4.0);
        assert_eq!(stats.active_cells, 2);
        assert_eq!(stats.burn_rate_per_hour, 2.0);
        assert_eq!(stats.burned_area_km2, 8.0);
        assert!((stats.containment_pct - 100.0 / 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_stats_at_time_zero() {
        let field = sample_field();
        let stats = field.stats(0.0, 4.0);
        assert_eq!(stats.active_cells, 1);
        assert_eq!(stats.burn_rate_per_hour, 0.0);
        assert_eq!(stats.containment_pct, 0.0);
    }
}
