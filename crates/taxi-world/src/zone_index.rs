//! The zone-to-taxi spatial index: a flat hash map keyed by grid cell.
//!
//! A city-scale fleet lives on a coarse 0.01° grid, not a road network, so a
//! hash map keyed by `(i32, i32)` zone pairs does the job a more general
//! spatial tree would — no tree balancing, no bounding-volume overhead, O(1)
//! amortized membership updates as taxis cross cell boundaries.

use std::collections::HashMap;

use taxi_core::{TaxiId, Zone};

#[cfg(feature = "fx-hash")]
type Map<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
type Map<K, V> = HashMap<K, V>;

/// Maps each occupied [`Zone`] to the taxis currently inside it.
///
/// Every taxi appears in exactly one zone's list at all times while the
/// index is kept in sync via [`ZoneIndex::relocate`].
#[derive(Clone, Debug, Default)]
pub struct ZoneIndex {
    cells: Map<Zone, Vec<TaxiId>>,
}

impl ZoneIndex {
    pub fn new() -> Self {
        Self { cells: Map::default() }
    }

    pub fn insert(&mut self, zone: Zone, taxi: TaxiId) {
        self.cells.entry(zone).or_default().push(taxi);
    }

    pub fn remove(&mut self, zone: Zone, taxi: TaxiId) {
        if let Some(list) = self.cells.get_mut(&zone) {
            list.retain(|&id| id != taxi);
            if list.is_empty() {
                self.cells.remove(&zone);
            }
        }
    }

    /// Move `taxi` from `from` to `to`. No-op if `from == to`.
    pub fn relocate(&mut self, taxi: TaxiId, from: Zone, to: Zone) {
        if from == to {
            return;
        }
        self.remove(from, taxi);
        self.insert(to, taxi);
    }

    /// Taxis occupying exactly `zone`, in insertion order.
    pub fn in_zone(&self, zone: Zone) -> &[TaxiId] {
        self.cells.get(&zone).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Taxis occupying `zone` or one of its eight grid neighbours, own zone
    /// first — the fixed 9-cell neighbourhood the dispatch search scans.
    pub fn in_neighbourhood(&self, zone: Zone) -> Vec<TaxiId> {
        zone.neighbours()
            .into_iter()
            .flat_map(|z| self.in_zone(z).to_vec())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn occupied_zone_count(&self) -> usize {
        self.cells.len()
    }
}
