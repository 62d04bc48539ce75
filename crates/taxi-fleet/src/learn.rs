//! The per-taxi reinforcement-learning tables.
//!
//! `QTable` drives seating-capacity decisions; `STable` is a parallel
//! Monte-Carlo running mean of observed reward per capacity, kept purely as
//! a diagnostic baseline — it never feeds back into `choose_action`.

use std::collections::HashMap;

/// Tabular Q-values for the three capacity actions `[-1, 0, +1]`, keyed by
/// current seating capacity.
///
/// Boundary sizes are seeded so the invalid action at each edge never wins
/// the argmax: capacity 1 cannot decrease further (`[-1, 0, 0]`), and
/// `maxsize` cannot increase further (`[0, 0, -1]`). Every other size
/// starts at `[0, 0, 0]` the first time it is looked up.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QTable {
    maxsize: u32,
    table: HashMap<u32, [f64; 3]>,
}

impl QTable {
    pub fn new(maxsize: u32) -> Self {
        let mut table = HashMap::new();
        table.insert(1, [-1.0, 0.0, 0.0]);
        table.insert(maxsize, [0.0, 0.0, -1.0]);
        Self { maxsize, table }
    }

    #[inline]
    pub fn maxsize(&self) -> u32 {
        self.maxsize
    }

    /// The Q-values for `size`, inserting the zero default if this is the
    /// first time `size` has been seen.
    pub fn get(&mut self, size: u32) -> [f64; 3] {
        *self.table.entry(size).or_insert([0.0, 0.0, 0.0])
    }

    /// The Q-values for `size` without mutating the table — used for the
    /// "best next state" lookahead in the Bellman update, where inserting a
    /// size the taxi never actually reaches would be misleading.
    pub fn peek(&self, size: u32) -> [f64; 3] {
        *self.table.get(&size).unwrap_or(&[0.0, 0.0, 0.0])
    }

    pub fn set(&mut self, size: u32, action_index: usize, value: f64) {
        let entry = self.table.entry(size).or_insert([0.0, 0.0, 0.0]);
        entry[action_index] = value;
    }
}

/// Running mean of observed reward per capacity, updated incrementally:
/// `mean += (reward - mean) / count`.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct STable {
    table: HashMap<u32, (u64, f64)>,
}

impl STable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, size: u32, reward: f64) {
        let entry = self.table.entry(size).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += (reward - entry.1) / entry.0 as f64;
    }

    pub fn mean(&self, size: u32) -> Option<f64> {
        self.table.get(&size).map(|&(_, mean)| mean)
    }

    pub fn count(&self, size: u32) -> u64 {
        self.table.get(&size).map(|&(n, _)| n).unwrap_or(0)
    }
}
