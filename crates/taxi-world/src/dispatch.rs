//! Nearest-taxi search: the two dispatch policies.
//!
//! Both policies scan the fixed nine-cell neighbourhood around a group's
//! pickup zone ([`Zone::neighbours`]) rather than growing the search radius
//! until something is found. A request whose neighbourhood is empty of
//! eligible taxis simply waits for the next tick (or times out) — the
//! search never falls back to scanning the whole map.
//!
//! Both also implement the same "instant dispatch" fast path: a candidate
//! within `instant_dispatch_range_m()` is taken immediately rather than
//! compared against the rest of the neighbourhood. This is deliberately not
//! distance-minimizing — a closer taxi discovered later in the same scan is
//! never considered once an instant match has fired. Reproduced exactly
//! rather than "fixed", since plenty of real dispatch systems make the same
//! trade for latency.

use taxi_core::geo::total_distance;
use taxi_core::{Parameters, TaxiId};
use taxi_fleet::{PassengerGroup, Status, Taxi};

use crate::zone_index::ZoneIndex;

/// Closest available taxi for a group, when ridesharing is disabled.
///
/// A taxi is eligible while idle or mid-reposition (a reposition is
/// abandoned in favor of an actual fare) and large enough to take the
/// whole group in one ride.
pub fn get_zone_candidate_no_rs(
    taxis: &[Taxi],
    zones: &ZoneIndex,
    group: &PassengerGroup,
    params: &Parameters,
) -> Option<TaxiId> {
    let neighbourhood = zones.in_neighbourhood(group.src.zone());
    let instant_range = params.instant_dispatch_range_m();

    let mut best: Option<(TaxiId, f64)> = None;
    for id in neighbourhood {
        let taxi = &taxis[id.index()];
        let eligible = matches!(taxi.status, Status::Idle | Status::Repositioning);
        if !eligible || taxi.capacity() < group.size {
            continue;
        }
        let dist = taxi.position.distance(group.src);
        if dist <= instant_range {
            return Some(id);
        }
        if best.is_none_or(|(_, best_dist)| dist < best_dist) {
            best = Some((id, dist));
        }
    }
    best.map(|(id, _)| id)
}

/// Closest available taxi for a group under ridesharing: idle, repositioning,
/// and dropoff-status taxis are all eligible, as long as there is room for
/// `group.size` more riders.
///
/// A dropoff-status taxi qualifies only if diverting to pick up `group`
/// doesn't lengthen its remaining trip by more than `RIDESHARE_MULTIPLIER`,
/// and the resulting combined route fits under `group.rs_distance_limit`.
///
/// The instant-dispatch check here only ever looks at the candidate most
/// recently appended to the running candidate list, not the whole list
/// built so far — so an earlier, closer candidate can lose to a later,
/// merely-close-enough one if the later one happens to land inside the
/// instant range first. Reproduced exactly, per the same reasoning as the
/// no-ridesharing search above.
pub fn get_zone_candidate_rs(
    taxis: &[Taxi],
    zones: &ZoneIndex,
    group: &PassengerGroup,
    params: &Parameters,
) -> Option<TaxiId> {
    let neighbourhood = zones.in_neighbourhood(group.src.zone());
    let instant_range = params.instant_dispatch_range_m();

    let mut candidates: Vec<(TaxiId, f64)> = Vec::new();
    for id in neighbourhood {
        let taxi = &taxis[id.index()];
        let eligible = matches!(taxi.status, Status::Idle | Status::Repositioning | Status::Dropoff);
        let committed = taxi.num_passengers + taxi.num_pending_pickups;
        if !eligible || taxi.capacity() < committed + group.size {
            continue;
        }

        let dist_to_taxi = taxi.position.distance(group.src);

        if taxi.status == Status::Dropoff {
            let Some(destination) = taxi.destination() else {
                continue;
            };
            let d1 = taxi.position.distance(destination);
            let d2 = dist_to_taxi + group.src.distance(destination);
            if d2 > d1 * params.rideshare_multiplier {
                continue;
            }
            let mut route = vec![group.src];
            route.extend(taxi.destinations());
            route.push(group.dst);
            let rs_dist = total_distance(&route);
            if group.rs_distance_limit.is_none_or(|limit| rs_dist > limit) {
                continue;
            }
        }

        candidates.push((id, dist_to_taxi));

        if candidates.last().is_some_and(|&(_, dist)| dist <= instant_range) {
            return Some(id);
        }
    }

    candidates
        .into_iter()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}
