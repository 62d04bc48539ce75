//! Unit and small-scale integration tests for taxi-world.

use chrono::NaiveDate;

use taxi_core::{GroupId, Parameters, Position, Request, SimTime, TaxiId};
use taxi_fleet::{PassengerGroup, Taxi};
use taxi_region::ManhattanRegion;

use crate::dispatch::{get_zone_candidate_no_rs, get_zone_candidate_rs};
use crate::world::World;
use crate::zone_index::ZoneIndex;

fn start_time() -> SimTime {
    SimTime::new(
        NaiveDate::from_ymd_opt(2016, 2, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap(),
    )
}

fn taxi_at(id: u32, pos: Position) -> Taxi {
    Taxi::new(TaxiId(id), pos, 4, 16, 42)
}

fn group_at(id: u64, size: u32, src: Position, dst: Position) -> PassengerGroup {
    PassengerGroup::new(GroupId(id), size, src, dst, start_time())
}

mod dispatch_search {
    use super::*;

    #[test]
    fn no_rs_returns_first_in_range_not_closest() {
        let params = Parameters::default();
        let src = Position::new(40.75, -73.98);
        // Both taxis sit in the same zone as `src` and both fall within the
        // instant-dispatch range; the farther one was inserted first, so it
        // wins even though the second taxi is objectively closer.
        let far = taxi_at(0, Position::new(40.7505, -73.98));
        let near = taxi_at(1, Position::new(40.7501, -73.98));
        let taxis = vec![far, near];

        let mut zones = ZoneIndex::new();
        zones.insert(taxis[0].zone(), taxis[0].id);
        zones.insert(taxis[1].zone(), taxis[1].id);

        let group = group_at(1, 1, src, Position::new(40.8, -73.9));
        let picked = get_zone_candidate_no_rs(&taxis, &zones, &group, &params).unwrap();
        assert_eq!(picked, TaxiId(0));
    }

    #[test]
    fn no_rs_skips_full_and_busy_taxis() {
        let params = Parameters::default();
        let src = Position::new(40.75, -73.98);
        let mut busy = taxi_at(0, Position::new(40.7501, -73.98));
        busy.status = taxi_fleet::Status::Pickup;
        let idle = taxi_at(1, Position::new(40.76, -73.98));
        let taxis = vec![busy, idle];

        let mut zones = ZoneIndex::new();
        zones.insert(taxis[0].zone(), taxis[0].id);
        zones.insert(taxis[1].zone(), taxis[1].id);

        let group = group_at(1, 1, src, Position::new(40.8, -73.9));
        let picked = get_zone_candidate_no_rs(&taxis, &zones, &group, &params).unwrap();
        assert_eq!(picked, TaxiId(1));
    }

    #[test]
    fn rs_allows_taxis_with_spare_seats() {
        let params = Parameters::default();
        let src = Position::new(40.75, -73.98);
        let mut partly_full = taxi_at(0, Position::new(40.7502, -73.98));
        partly_full.num_passengers = 2;
        let taxis = vec![partly_full];

        let mut zones = ZoneIndex::new();
        zones.insert(taxis[0].zone(), taxis[0].id);

        let group = group_at(1, 2, src, Position::new(40.8, -73.9));
        let picked = get_zone_candidate_rs(&taxis, &zones, &group, &params);
        assert_eq!(picked, Some(TaxiId(0)));
    }

    #[test]
    fn rs_rejects_taxi_without_enough_spare_seats() {
        let params = Parameters::default();
        let src = Position::new(40.75, -73.98);
        let mut nearly_full = taxi_at(0, Position::new(40.7502, -73.98));
        nearly_full.num_passengers = 3;
        let taxis = vec![nearly_full];

        let mut zones = ZoneIndex::new();
        zones.insert(taxis[0].zone(), taxis[0].id);

        let group = group_at(1, 2, src, Position::new(40.8, -73.9));
        assert_eq!(get_zone_candidate_rs(&taxis, &zones, &group, &params), None);
    }

    #[test]
    fn rs_dropoff_taxi_detour_bound_is_inclusive_at_the_limit() {
        // The taxi's current destination is 1000m away (d1); the default
        // rideshare_multiplier (1.1) allows a detour of up to d1 * 1.1 =
        // 1100m (d2) before a dropoff-status taxi stops being a candidate.
        // `eligible_src` sits exactly on that boundary; `ineligible_src` is
        // one metre past it.
        let params = Parameters::default();
        let taxi_pos = Position::new(0.0, 0.0);
        let destination = Position::new(0.0, 0.008993203354928916);

        let mut taxi = taxi_at(0, taxi_pos);
        taxi.status = taxi_fleet::Status::Dropoff;
        taxi.tasks.push_back(taxi_fleet::Task::dropoff(destination, GroupId(99)));
        let mut zones = ZoneIndex::new();
        zones.insert(taxi.zone(), taxi.id);
        let taxis = vec![taxi];

        let eligible_src = Position::new(0.0008584421387309083, 0.0);
        let mut group = group_at(1, 1, eligible_src, destination);
        group.rs_distance_limit = Some(f64::MAX);
        assert_eq!(get_zone_candidate_rs(&taxis, &zones, &group, &params), Some(TaxiId(0)));

        let ineligible_src = Position::new(0.0008666515648524666, 0.0);
        let mut group = group_at(2, 1, ineligible_src, destination);
        group.rs_distance_limit = Some(f64::MAX);
        assert_eq!(get_zone_candidate_rs(&taxis, &zones, &group, &params), None);
    }
}

mod world_integration {
    use super::*;

    fn world(sharing: bool) -> World {
        World::new(ManhattanRegion::new(), Parameters::default(), sharing, start_time())
    }

    #[test]
    fn a_request_next_to_an_idle_taxi_gets_dropped_off() {
        let mut w = world(false);
        let pos = Position::new(40.75, -73.98);
        w.add_taxi(Taxi::new(TaxiId(0), pos, 4, 16, 7));
        w.add_request(Request::new(start_time(), 1, pos, Position::new(40.751, -73.981)));

        w.run(Some(200));

        assert_eq!(w.metrics.num_requests, 1);
        assert_eq!(w.metrics.num_dropoffs, 1);
        assert_eq!(w.metrics.num_timeouts, 0);
    }

    #[test]
    fn an_unreachable_request_times_out() {
        let mut params = Parameters::default();
        params.timeout = 1.0; // minutes
        let mut w = World::new(ManhattanRegion::new(), params, false, start_time());
        // No taxis in the fleet at all: nothing can ever be dispatched.
        w.add_request(Request::new(
            start_time(),
            1,
            Position::new(40.75, -73.98),
            Position::new(40.751, -73.981),
        ));

        w.run(Some(10));

        assert_eq!(w.metrics.num_timeouts, 1);
        assert_eq!(w.metrics.num_dropoffs, 0);
    }

    #[test]
    fn reset_metrics_clears_in_flight_state_but_keeps_the_fleet() {
        let mut w = world(false);
        let pos = Position::new(40.75, -73.98);
        w.add_taxi(Taxi::new(TaxiId(0), pos, 4, 16, 7));
        w.add_request(Request::new(start_time(), 1, pos, Position::new(40.751, -73.981)));
        w.run(Some(200));
        assert_eq!(w.metrics.num_dropoffs, 1);

        w.reset_metrics();
        assert_eq!(w.metrics.num_dropoffs, 0);
        assert!(w.groups.is_empty());
        assert_eq!(w.taxis.len(), 1);
    }

    #[test]
    fn oversized_group_splits_once_its_waited_long_enough() {
        // One taxi (3 seats) can't take a party of 4 at once. Size alone
        // (4 >= split_size) isn't enough to split; the group has to sit
        // unmatched until it's also waited `split_time`. It then splits in
        // half (4 -> 2 + 2), sharing a `group_id`. Neither half individually
        // exceeds the taxi's capacity, so both eventually ride — the second
        // only once the first has been dropped off and freed the seats back
        // up. A generous timeout keeps the wait from racing the clock.
        let mut params = Parameters::default();
        params.timeout = 60.0;
        let mut w = World::new(ManhattanRegion::new(), params, false, start_time());
        let pos = Position::new(40.75, -73.98);
        w.add_taxi(Taxi::new(TaxiId(0), pos, 3, 16, 1));
        w.add_request(Request::new(start_time(), 4, pos, Position::new(40.751, -73.981)));

        w.run(Some(500));

        assert_eq!(w.metrics.num_requests, 2);
        assert_eq!(w.metrics.num_dropoffs, 2);
        assert_eq!(w.metrics.num_timeouts, 0);
    }
}

mod metrics {
    use crate::metrics::Metrics;
    use crate::outcome::DispatchOutcome;
    use taxi_core::SimTime;

    use super::start_time;

    fn at(secs: i64) -> SimTime {
        start_time().advance(secs as f64)
    }

    #[test]
    fn dispatch_time_averages_over_timeouts_and_dropoffs_together() {
        let mut m = Metrics::new();
        m.record_request();
        m.record_timeout(at(0), at(100));

        m.record_request();
        m.record_dropoff(DispatchOutcome {
            request_time: at(0),
            dispatch_time: at(20),
            pickup_time: at(30),
            dropoff_time: at(60),
        });

        assert_eq!(m.mean_dispatch_time(), (100.0 + 20.0) / 2.0);
        // pickup/journey/wait only ever see the one completed ride.
        assert_eq!(m.mean_pickup_time(), 10.0);
        assert_eq!(m.mean_journey_time(), 30.0);
        assert_eq!(m.mean_wait_time(), 30.0);
    }
}
