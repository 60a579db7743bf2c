//! Deterministic per-edge spread variance.
//!
//! Spread delays carry a small pseudo-random factor so the burn front is
//! irregular rather than a perfect diamond. The draw is a pure function of
//! `(seed, edge)`, so an edge's weight never depends on the order in which
//! the engine relaxes it and identical inputs reproduce identical fields.

use crate::core_types::CellCoord;

/// Seed values for deterministic hashing.
/// Using prime numbers for better distribution.
const SEED_FROM_ROW: u64 = 1619;
const SEED_FROM_COL: u64 = 31337;
const SEED_TO_ROW: u64 = 6971;
const SEED_TO_COL: u64 = 1013;

/// Integer hash of one directed edge, folded to `[0, 1]`.
#[inline]
fn edge_unit(seed: u64, from: CellCoord, to: CellCoord) -> f32 {
    let mut n = (from.row as u64)
        .wrapping_mul(SEED_FROM_ROW)
        .wrapping_add((from.col as u64).wrapping_mul(SEED_FROM_COL))
        .wrapping_add((to.row as u64).wrapping_mul(SEED_TO_ROW))
        .wrapping_add((to.col as u64).wrapping_mul(SEED_TO_COL))
        .wrapping_add(seed);
    n = (n << 13) ^ n;
    n = n
        .wrapping_mul(n.wrapping_mul(n).wrapping_mul(15731).wrapping_add(789_221))
        .wrapping_add(1_376_312_589);
    ((n & 0x7fff_ffff) as f64 / f64::from(0x7fff_ffff_u32)) as f32
}

/// Variance multiplier for the directed edge `from -> to`, linearly mapped
/// into `[lo, hi]`.
#[inline]
pub(crate) fn edge_variance(seed: u64, from: CellCoord, to: CellCoord, lo: f32, hi: f32) -> f32 {
    lo + edge_unit(seed, from, to) * (hi - lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variance_in_range() {
        for row in 0..20 {
            for col in 0..20 {
                let from = CellCoord::new(row, col);
                let to = CellCoord::new(row + 1, col);
                let v = edge_variance(42, from, to, 0.8, 1.2);
                assert!((0.8..=1.2).contains(&v), "variance {v} out of range");
            }
        }
    }

    #[test]
    fn test_variance_deterministic() {
        let from = CellCoord::new(3, 4);
        let to = CellCoord::new(4, 5);
        assert_eq!(
            edge_variance(9, from, to, 0.8, 1.2).to_bits(),
            edge_variance(9, from, to, 0.8, 1.2).to_bits()
        );
    }

    #[test]
    fn test_variance_depends_on_seed_and_edge() {
        let from = CellCoord::new(3, 4);
        let to = CellCoord::new(4, 5);
        assert_ne!(
            edge_variance(1, from, to, 0.8, 1.2),
            edge_variance(2, from, to, 0.8, 1.2)
        );
        assert_ne!(
            edge_variance(1, from, to, 0.8, 1.2),
            edge_variance(1, to, from, 0.8, 1.2)
        );
    }

    #[test]
    fn test_degenerate_range_collapses() {
        let from = CellCoord::new(0, 0);
        let to = CellCoord::new(0, 1);
        assert_eq!(edge_variance(5, from, to, 1.0, 1.0), 1.0);
    }
}
