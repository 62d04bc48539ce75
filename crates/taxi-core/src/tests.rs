//! Unit tests for taxi-core primitives.

#[cfg(test)]
mod ids {
    use crate::{GroupId, TaxiId};

    #[test]
    fn index_roundtrip() {
        let id = TaxiId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(TaxiId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(TaxiId(0) < TaxiId(1));
        assert!(GroupId(100) > GroupId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(TaxiId::INVALID.0, u32::MAX);
        assert_eq!(GroupId::INVALID.0, u64::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(TaxiId(7).to_string(), "TaxiId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::geo::total_distance;
    use crate::Position;

    #[test]
    fn zero_distance() {
        let p = Position::new(40.758, -73.985);
        assert!(p.distance(p) < 0.01);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Position::new(40.7, -74.0);
        let b = Position::new(40.75, -73.96);
        assert!((a.distance(b) - b.distance(a)).abs() < 1e-9);
    }

    #[test]
    fn one_degree_latitude_is_about_111km() {
        let a = Position::new(40.0, -74.0);
        let b = Position::new(41.0, -74.0);
        let d = a.distance(b);
        assert!((d - 111_200.0).abs() < 1_000.0, "got {d}");
    }

    #[test]
    fn interpolate_reaches_endpoints() {
        let a = Position::new(40.70, -74.00);
        let b = Position::new(40.75, -73.95);
        let full = a.distance(b);

        let start = a.interpolate_toward(b, 0.0);
        assert!((start.lat - a.lat).abs() < 1e-6);
        assert!((start.long - a.long).abs() < 1e-6);

        let end = a.interpolate_toward(b, full);
        assert!((end.lat - b.lat).abs() < 1e-4, "got {end:?}");
        assert!((end.long - b.long).abs() < 1e-4, "got {end:?}");
    }

    #[test]
    fn interpolate_is_monotonic_in_remaining_distance() {
        let a = Position::new(40.70, -74.00);
        let b = Position::new(40.80, -73.90);
        let full = a.distance(b);

        let quarter = a.interpolate_toward(b, full * 0.25);
        let half = a.interpolate_toward(b, full * 0.5);
        assert!(quarter.distance(b) > half.distance(b));
    }

    #[test]
    fn total_distance_sums_legs() {
        let a = Position::new(40.70, -74.00);
        let b = Position::new(40.72, -74.00);
        let c = Position::new(40.74, -74.00);
        let sum = total_distance(&[a, b, c]);
        let direct = a.distance(b) + b.distance(c);
        assert!((sum - direct).abs() < 1e-6);
    }

    #[test]
    fn zone_center_roundtrip() {
        let a = Position::new(40.758, -73.985);
        let z = a.zone();
        assert_eq!(z.center().zone(), z);
    }

    #[test]
    fn neighbours_own_zone_first_and_nine_total() {
        use crate::Zone;
        let z = Zone(100, -200);
        let ns = z.neighbours();
        assert_eq!(ns.len(), 9);
        assert_eq!(ns[0], z);
        for di in [-1, 0, 1] {
            for dj in [-1, 0, 1] {
                assert!(ns.contains(&Zone(z.0 + di, z.1 + dj)));
            }
        }
    }

    #[test]
    fn sample_returns_everything_when_k_exceeds_population() {
        use crate::rng::TaxiRng;
        use crate::TaxiId;
        let mut rng = TaxiRng::new(1, TaxiId(0));
        let pop = vec![1, 2, 3];
        let out = crate::sample(&pop, 10, &mut rng);
        assert_eq!(out, pop);
    }

    #[test]
    fn sample_returns_k_distinct_elements() {
        use crate::rng::TaxiRng;
        use crate::TaxiId;
        let mut rng = TaxiRng::new(1, TaxiId(0));
        let pop: Vec<i32> = (0..20).collect();
        let out = crate::sample(&pop, 5, &mut rng);
        assert_eq!(out.len(), 5);
        let mut sorted = out.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 5);
    }
}

#[cfg(test)]
mod time {
    use chrono::NaiveDate;

    use crate::SimTime;

    #[test]
    fn advance_moves_forward_by_tick_time() {
        let start = SimTime::new(NaiveDate::from_ymd_opt(2016, 2, 1).unwrap().and_hms_opt(8, 0, 0).unwrap());
        let next = start.advance(60.0);
        assert_eq!(next.since_secs(start), 60.0);
        assert_eq!(next.since_minutes(start), 1.0);
    }
}

#[cfg(test)]
mod rng {
    use crate::{TaxiId, TaxiRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = TaxiRng::new(12345, TaxiId(0));
        let mut r2 = TaxiRng::new(12345, TaxiId(0));
        for _ in 0..100 {
            let a: f64 = r1.random();
            let b: f64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_taxis_diverge() {
        let mut r0 = TaxiRng::new(1, TaxiId(0));
        let mut r1 = TaxiRng::new(1, TaxiId(1));
        let a: u64 = r0.random();
        let b: u64 = r1.random();
        assert_ne!(a, b);
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = TaxiRng::new(0, TaxiId(0));
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }

    #[test]
    fn argmax_tie_break_only_picks_maxima() {
        let mut rng = TaxiRng::new(7, TaxiId(3));
        let values = [1.0, 3.0, 3.0, 2.0];
        for _ in 0..50 {
            let idx = rng.argmax_tie_break(&values);
            assert!(idx == 1 || idx == 2);
        }
    }
}

#[cfg(test)]
mod params {
    use crate::Parameters;

    #[test]
    fn derived_quantities_are_positive() {
        let p = Parameters::default();
        assert!(p.tick_dist_m() > 0.0);
        assert!(p.instant_dispatch_range_m() > 0.0);
        assert!(p.repo_prob() > 0.0 && p.repo_prob() < 1.0);
    }

    #[test]
    fn tick_dist_matches_speed_times_time() {
        let p = Parameters::default();
        assert!((p.tick_dist_m() - p.taxi_speed * p.tick_time).abs() < 1e-9);
    }
}
