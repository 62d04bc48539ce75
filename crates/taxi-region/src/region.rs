//! A static, weighted table of candidate request-origin zones, plus a
//! bounding-box membership test.
//!
//! The reference implementation built this table by aggregating a year of
//! historical pickup coordinates per zone and normalizing counts into
//! weights (see the offline filtering step this crate does not perform —
//! ingesting raw trip records is out of scope here). What follows is a
//! compact, representative table of Manhattan-area zone centers standing in
//! for that larger historical table; swapping in a full dataset only
//! requires constructing a `ManhattanRegion` with different `locations`/
//! `weights` vectors.

use taxi_core::{Position, TaxiRng, Zone};

use crate::error::{RegionError, RegionResult};

/// South-west and north-east corners of the Manhattan bounding box used for
/// `in_manhattan`.
const BOUNDS_MIN: Position = Position {
    lat: 40.680,
    long: -74.020,
};
const BOUNDS_MAX: Position = Position {
    lat: 40.880,
    long: -73.907,
};

/// `(lat, long, weight)` for a representative spread of Manhattan zones,
/// denser downtown and midtown where historical pickup volume concentrates.
const SEED_ZONES: &[(f64, f64, f64)] = &[
    (40.705, -74.010, 6.0),  // Financial District
    (40.718, -74.005, 8.0),  // Tribeca
    (40.722, -73.998, 10.0), // SoHo
    (40.730, -73.990, 9.0),  // Greenwich Village
    (40.735, -73.985, 7.0),  // Union Square
    (40.741, -73.989, 6.0),  // Chelsea
    (40.748, -73.985, 12.0), // Midtown (Penn Station / Herald Sq)
    (40.753, -73.983, 14.0), // Times Square
    (40.758, -73.978, 11.0), // Midtown East
    (40.764, -73.973, 9.0),  // Central Park South
    (40.775, -73.965, 7.0),  // Upper East Side
    (40.783, -73.975, 6.0),  // Upper West Side
    (40.792, -73.972, 5.0),  // Manhattan Valley
    (40.803, -73.963, 4.0),  // Morningside Heights
    (40.815, -73.958, 3.0),  // Hamilton Heights
    (40.830, -73.944, 3.0),  // Washington Heights
    (40.848, -73.935, 2.0),  // Inwood
    (40.712, -73.998, 7.0),  // Chinatown
    (40.725, -73.981, 5.0),  // East Village
    (40.745, -73.999, 6.0),  // Meatpacking District
];

/// Manhattan bounding region and its weighted request-origin sampler.
#[derive(Clone, Debug)]
pub struct ManhattanRegion {
    locations: Vec<Position>,
    weights: Vec<f64>,
    cum_weights: Vec<f64>,
}

impl ManhattanRegion {
    /// Build the region from the built-in seed table.
    pub fn new() -> Self {
        Self::from_weighted(
            SEED_ZONES
                .iter()
                .map(|&(lat, long, w)| (Position::new(lat, long), w))
                .collect(),
        )
        .expect("built-in seed table is non-empty")
    }

    /// Build a region from caller-supplied `(position, weight)` pairs —
    /// used to plug in a real historical-frequency table in place of the
    /// built-in seed.
    pub fn from_weighted(entries: Vec<(Position, f64)>) -> RegionResult<Self> {
        if entries.is_empty() {
            return Err(RegionError::EmptyTable);
        }
        let mut locations = Vec::with_capacity(entries.len());
        let mut weights = Vec::with_capacity(entries.len());
        let mut cum_weights = Vec::with_capacity(entries.len());
        let mut running = 0.0;
        for (pos, w) in entries {
            locations.push(pos);
            weights.push(w);
            running += w;
            cum_weights.push(running);
        }
        Ok(Self {
            locations,
            weights,
            cum_weights,
        })
    }

    /// `true` if `pos` falls within the Manhattan bounding box.
    pub fn in_manhattan(&self, pos: Position) -> bool {
        pos.in_box(BOUNDS_MIN, BOUNDS_MAX)
    }

    /// Sample a random position under the zone-weighted distribution: pick
    /// a zone proportionally to its weight, then return a uniformly random
    /// point inside that zone's grid cell.
    pub fn get_rand_pos(&self, rng: &mut TaxiRng) -> Position {
        let total = *self.cum_weights.last().expect("non-empty by construction");
        let roll = rng.gen_range(0.0..total);
        let idx = self
            .cum_weights
            .partition_point(|&cw| cw <= roll)
            .min(self.locations.len() - 1);

        let zone = self.locations[idx].zone();
        jitter_within_zone(zone, rng)
    }

    /// The underlying `(position, weight)` table, in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (Position, f64)> + '_ {
        self.locations.iter().copied().zip(self.weights.iter().copied())
    }
}

impl Default for ManhattanRegion {
    fn default() -> Self {
        Self::new()
    }
}

fn jitter_within_zone(zone: Zone, rng: &mut TaxiRng) -> Position {
    let lat0 = zone.0 as f64 / 100.0;
    let long0 = zone.1 as f64 / 100.0;
    Position::new(
        rng.gen_range(lat0..lat0 + 0.01),
        rng.gen_range(long0..long0 + 0.01),
    )
}
