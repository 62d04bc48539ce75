//! Geographic coordinate type, great-circle utilities, and the zone grid.
//!
//! `Position` uses `f64` (double precision), not the `f32` a digital-twin
//! framework normally reaches for: zone membership is `floor(coord * 100)`,
//! and `f32` rounding near a 0.01-degree cell boundary can flip a position
//! into the wrong zone. The extra precision buys an exact
//! `zone.center().zone() == zone` round trip.

use rand::seq::index;

use crate::rng::TaxiRng;

/// Mean Earth radius in metres, matching the reference request corpus this
/// simulator's zone grid was built against.
const EARTH_RADIUS_M: f64 = 6_371_009.0;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub lat: f64,
    pub long: f64,
}

impl Position {
    #[inline]
    pub fn new(lat: f64, long: f64) -> Self {
        Self { lat, long }
    }

    /// Haversine great-circle distance in metres.
    pub fn distance(self, other: Position) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_long = (other.long - self.long).to_radians();
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_long * 0.5).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Walk `dist` metres from `self` toward `other` along the great circle
    /// joining them.
    ///
    /// Does not clamp at `other` — calling with `dist > self.distance(other)`
    /// overshoots past it along the same bearing. Callers that need
    /// "arrive, don't overshoot" semantics compare `dist` against
    /// `self.distance(other)` first.
    pub fn interpolate_toward(self, other: Position, dist: f64) -> Position {
        let lat1 = self.lat.to_radians();
        let long1 = self.long.to_radians();
        let lat2 = other.lat.to_radians();
        let long2 = other.long.to_radians();

        let d_long = long2 - long1;
        let bearing = (d_long.sin() * lat2.cos())
            .atan2(lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_long.cos());

        let ang_dist = dist / EARTH_RADIUS_M;
        let lat_i =
            (lat1.sin() * ang_dist.cos() + lat1.cos() * ang_dist.sin() * bearing.cos()).asin();
        let long_i = long1
            + (bearing.sin() * ang_dist.sin() * lat1.cos())
                .atan2(ang_dist.cos() - lat1.sin() * lat_i.sin());

        // Normalize into (-180, 180].
        let long_deg = (long_i.to_degrees() + 540.0) % 360.0 - 180.0;

        Position {
            lat: lat_i.to_degrees(),
            long: long_deg,
        }
    }

    /// The zone grid cell containing this position.
    #[inline]
    pub fn zone(self) -> Zone {
        Zone(
            (self.lat * 100.0).floor() as i32,
            (self.long * 100.0).floor() as i32,
        )
    }

    /// Inclusive bounding-box test.
    #[inline]
    pub fn in_box(self, min: Position, max: Position) -> bool {
        self.lat >= min.lat && self.lat <= max.lat && self.long >= min.long && self.long <= max.long
    }
}

/// Sum of consecutive great-circle distances through a path of positions.
pub fn total_distance(positions: &[Position]) -> f64 {
    positions.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// A 0.01° × 0.01° grid cell, identified by `(floor(lat*100), floor(long*100))`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zone(pub i32, pub i32);

impl Zone {
    /// The midpoint of this cell.
    #[inline]
    pub fn center(self) -> Position {
        Position {
            lat: (self.0 as f64 + 0.5) / 100.0,
            long: (self.1 as f64 + 0.5) / 100.0,
        }
    }

    /// This zone, followed by its eight grid neighbours. Own zone is always
    /// first; the rest follow row-major `(di, dj)` order.
    pub fn neighbours(self) -> Vec<Zone> {
        let mut out = Vec::with_capacity(9);
        out.push(self);
        for di in [-1, 0, 1] {
            for dj in [-1, 0, 1] {
                if di == 0 && dj == 0 {
                    continue;
                }
                out.push(Zone(self.0 + di, self.1 + dj));
            }
        }
        out
    }
}

/// Sample `k` elements from `population` without replacement.
///
/// If `k >= population.len()`, returns the whole population, in its
/// original order, rather than shuffling it — matching the original
/// "sample if large enough, otherwise take everything" behaviour.
pub fn sample<T: Clone>(population: &[T], k: usize, rng: &mut TaxiRng) -> Vec<T> {
    if k >= population.len() {
        return population.to_vec();
    }
    index::sample(rng.inner(), population.len(), k)
        .iter()
        .map(|i| population[i].clone())
        .collect()
}
