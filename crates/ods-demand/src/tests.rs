//! Unit tests for ods-demand.

#[cfg(test)]
mod helpers {
    use ods_core::StopIndex;
    use ods_region::ServiceRegion;

    use crate::DemandParams;

    /// 4×4 grid of unit zones with the depot in the corner.
    pub fn region() -> ServiceRegion {
        ServiceRegion::with_fixed_stop(4, 1.0, 1.0, StopIndex(0)).unwrap()
    }

    pub fn params(trips_density: usize) -> DemandParams {
        DemandParams {
            trips_density,
            min_reservation_time:  10,
            max_reservation_time:  70,
            direction_probability: 0.5,
        }
    }
}

#[cfg(test)]
mod generation {
    use std::collections::HashSet;

    use ods_core::{Direction, ReservationStatus, RunRng, ScenarioConfig, TripId};

    use super::helpers::{params, region};
    use crate::{generate, DemandError, DemandParams};

    #[test]
    fn ids_are_sequential_from_one() {
        let trips = generate(&region(), &params(6), &mut RunRng::new(3)).unwrap();
        let ids: Vec<TripId> = trips.iter().map(|t| t.id).collect();
        assert_eq!(ids, (1..=6).map(TripId).collect::<Vec<_>>());
    }

    #[test]
    fn trips_start_pending_with_denormalized_location() {
        let region = region();
        let trips = generate(&region, &params(5), &mut RunRng::new(9)).unwrap();
        for t in &trips {
            assert_eq!(t.status(), ReservationStatus::Pending);
            assert_eq!(Some(t.location), region.position(t.location_index));
        }
    }

    #[test]
    fn all_non_fixed_stops_can_be_used() {
        let region = region();
        let trips = generate(&region, &params(15), &mut RunRng::new(1)).unwrap();
        let used: HashSet<_> = trips.iter().map(|t| t.location_index).collect();
        let expected: HashSet<_> = region.non_fixed_stops().iter().copied().collect();
        assert_eq!(used, expected);
    }

    #[test]
    fn zero_trips_is_empty() {
        let trips = generate(&region(), &params(0), &mut RunRng::new(1)).unwrap();
        assert!(trips.is_empty());
    }

    #[test]
    fn too_many_trips_errors() {
        let err = generate(&region(), &params(16), &mut RunRng::new(1)).unwrap_err();
        assert!(matches!(
            err,
            DemandError::DensityExceedsStops { requested: 16, available: 15 }
        ));
    }

    #[test]
    fn empty_window_errors() {
        let p = DemandParams { min_reservation_time: 5, max_reservation_time: 5, ..params(2) };
        assert!(matches!(
            generate(&region(), &p, &mut RunRng::new(1)),
            Err(DemandError::EmptyWindow { .. })
        ));
    }

    #[test]
    fn direction_probability_extremes() {
        let all_in = DemandParams { direction_probability: 1.0, ..params(10) };
        let trips = generate(&region(), &all_in, &mut RunRng::new(4)).unwrap();
        assert!(trips.iter().all(|t| t.direction == Direction::Inbound));

        let all_out = DemandParams { direction_probability: 0.0, ..params(10) };
        let trips = generate(&region(), &all_out, &mut RunRng::new(4)).unwrap();
        assert!(trips.iter().all(|t| t.direction == Direction::Outbound));
    }

    #[test]
    fn params_from_config() {
        let cfg = ScenarioConfig {
            min_reservation_time: 3,
            max_reservation_time: 9,
            direction_probability: 0.25,
            ..ScenarioConfig::default()
        };
        let p = DemandParams::from_config(&cfg, 7);
        assert_eq!(p.trips_density, 7);
        assert_eq!((p.min_reservation_time, p.max_reservation_time), (3, 9));
        assert_eq!(p.direction_probability, 0.25);
    }

    #[test]
    fn same_seed_same_trips() {
        let a = generate(&region(), &params(8), &mut RunRng::new(77)).unwrap();
        let b = generate(&region(), &params(8), &mut RunRng::new(77)).unwrap();
        assert_eq!(a, b);
    }
}

#[cfg(test)]
mod properties {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use ods_core::{RunRng, StopIndex};
    use ods_region::ServiceRegion;

    use crate::{generate, DemandParams};

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn draws_respect_region_and_window(
            seed in any::<u64>(),
            n in 2u32..9,
            fixed in 0u32..4,
            min in 0u32..50,
            span in 1u32..60,
            frac in 0.0f64..=1.0,
        ) {
            let region = ServiceRegion::with_fixed_stop(n, 1.0, 1.0, StopIndex(fixed)).unwrap();
            let available = region.non_fixed_stops().len();
            let density = (available as f64 * frac) as usize;
            let params = DemandParams {
                trips_density:         density,
                min_reservation_time:  min,
                max_reservation_time:  min + span,
                direction_probability: 0.5,
            };
            let trips = generate(&region, &params, &mut RunRng::new(seed)).unwrap();

            prop_assert_eq!(trips.len(), density);
            let locations: HashSet<_> = trips.iter().map(|t| t.location_index).collect();
            prop_assert_eq!(locations.len(), density);
            for t in &trips {
                prop_assert!(t.location_index != region.fixed_stop());
                prop_assert!(region.non_fixed_stops().contains(&t.location_index));
                prop_assert!(t.reserved_at >= min && t.reserved_at < min + span);
            }
        }
    }
}
