//! `taxi-fleet` — passenger groups and the per-taxi state machine.
//!
//! | Module    | Contents                                             |
//! |-----------|---------------------------------------------------------|
//! | [`group`] | `PassengerGroup`                                         |
//! | [`task`]  | `Status`, `TaskKind`, `Task`, `Choice`                    |
//! | [`learn`] | `QTable`, `STable`                                        |
//! | [`taxi`]  | `Taxi`, `TickEvents`, `PathLog`                           |
//! | [`error`] | `FleetError`, `FleetResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types — needed |
//!          | for `taxi-output`'s fleet snapshot format.                 |

pub mod error;
pub mod group;
pub mod learn;
pub mod task;
pub mod taxi;

#[cfg(test)]
mod tests;

pub use error::{FleetError, FleetResult};
pub use group::PassengerGroup;
pub use learn::{QTable, STable};
pub use task::{Choice, Status, Task, TaskKind};
pub use taxi::{PathLog, TickEvents, Taxi};

/// Build a fleet of `n` taxis seeded at random positions within `region`.
///
/// Mirrors the original factory's role (`make_taxis`): every taxi starts
/// idle, with seating capacity `size`, and an RNG derived from `seed` and
/// its own [`taxi_core::TaxiId`].
pub fn make_taxis(
    n: u32,
    size: u32,
    maxsize: u32,
    region: &taxi_region::ManhattanRegion,
    seed: u64,
) -> Vec<Taxi> {
    let mut placing_rng = taxi_core::TaxiRng::new(seed, taxi_core::TaxiId::INVALID);
    (0..n)
        .map(|i| {
            let id = taxi_core::TaxiId(i);
            let position = region.get_rand_pos(&mut placing_rng);
            Taxi::new(id, position, size, maxsize, seed)
        })
        .collect()
}
