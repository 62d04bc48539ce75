//! `taxi-world` — the fleet, the dispatch loop, and the metrics they
//! produce, wired together into one simulated city.
//!
//! | Module        | Contents                                          |
//! |----------------|---------------------------------------------------|
//! | [`zone_index`] | `ZoneIndex`, the taxi spatial index                |
//! | [`group_ids`]  | `GroupIdGen`                                        |
//! | [`outcome`]    | `DispatchOutcome`                                   |
//! | [`metrics`]    | `Metrics`                                            |
//! | [`dispatch`]   | the no-ridesharing / ridesharing candidate searches |
//! | [`world`]      | `World` itself                                       |
//! | [`error`]      | `WorldError`, `WorldResult`                          |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                   |
//! |-----------|---------------------------------------------------------|
//! | `fx-hash` | Backs `ZoneIndex` with `rustc_hash::FxHashMap` instead of |
//! |           | the standard library's `HashMap`.                         |
//! | `serde`   | Derives `Serialize`/`Deserialize` on `Metrics`.            |

pub mod dispatch;
pub mod error;
pub mod group_ids;
pub mod metrics;
pub mod outcome;
pub mod world;
pub mod zone_index;

#[cfg(test)]
mod tests;

pub use error::{WorldError, WorldResult};
pub use group_ids::GroupIdGen;
pub use metrics::Metrics;
pub use outcome::DispatchOutcome;
pub use world::World;
pub use zone_index::ZoneIndex;
