//! `taxi-core` — foundational types for the taxi fleet simulator.
//!
//! This crate is a dependency of every other crate in the workspace. It
//! intentionally has no sibling-crate dependencies and a minimal external
//! footprint (`rand`, `thiserror`, `chrono`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                              |
//! |------------|---------------------------------------------------------|
//! | [`ids`]    | `TaxiId`, `GroupId`                                      |
//! | [`geo`]    | `Position`, `Zone`, great-circle utilities, `sample`     |
//! | [`time`]   | `SimTime` (wall-clock)                                   |
//! | [`params`] | `Parameters` — tunable simulation constants              |
//! | [`request`]| `Request` — the external trip-request shape              |
//! | [`rng`]    | `TaxiRng` — per-taxi deterministic RNG                   |
//! | [`error`]  | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.    |
//!          | Required by `taxi-output`'s fleet snapshot format.     |

pub mod error;
pub mod geo;
pub mod ids;
pub mod params;
pub mod request;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{sample, Position, Zone};
pub use ids::{GroupId, TaxiId};
pub use params::Parameters;
pub use request::Request;
pub use rng::TaxiRng;
pub use time::SimTime;
