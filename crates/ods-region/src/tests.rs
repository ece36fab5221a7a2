//! Unit tests for ods-region.
//!
//! Most tests pin the depot with `with_fixed_stop` so assertions are exact.

#[cfg(test)]
mod grid {
    use ods_core::{Point, StopIndex};

    use crate::{RegionError, ServiceRegion};

    #[test]
    fn two_by_two_worked_example() {
        let region = ServiceRegion::with_fixed_stop(2, 10.0, 10.0, StopIndex(0)).unwrap();
        assert_eq!(
            region.stops_grid(),
            &[
                Point::new(5.0, 5.0),
                Point::new(15.0, 5.0),
                Point::new(5.0, 15.0),
                Point::new(15.0, 15.0),
            ]
        );

        let m = region.distance_matrix();
        let diag = 10.0 * 2f64.sqrt();
        let expected = [
            [0.0, 10.0, 10.0, diag],
            [10.0, 0.0, diag, 10.0],
            [10.0, diag, 0.0, 10.0],
            [diag, 10.0, 10.0, 0.0],
        ];
        for (i, row) in expected.iter().enumerate() {
            for (j, &d) in row.iter().enumerate() {
                assert!((m.get(i, j) - d).abs() < 1e-9, "d({i},{j}) = {}", m.get(i, j));
            }
        }
    }

    #[test]
    fn rectangular_zones() {
        let region = ServiceRegion::with_fixed_stop(3, 2.0, 4.0, StopIndex(4)).unwrap();
        assert_eq!(region.num_zones(), 9);
        // index 5 → row 1, col 2
        assert_eq!(region.position(StopIndex(5)), Some(Point::new(5.0, 6.0)));
        assert_eq!(region.position(StopIndex(8)), Some(Point::new(5.0, 10.0)));
    }

    #[test]
    fn single_zone_region_has_no_candidates() {
        let region = ServiceRegion::with_fixed_stop(1, 1.0, 1.0, StopIndex(0)).unwrap();
        assert_eq!(region.num_zones(), 1);
        assert!(region.non_fixed_stops().is_empty());
    }

    #[test]
    fn empty_grid_rejected() {
        let err = ServiceRegion::with_fixed_stop(0, 1.0, 1.0, StopIndex(0)).unwrap_err();
        assert!(matches!(err, RegionError::EmptyGrid));
    }

    #[test]
    fn bad_zone_size_rejected() {
        assert!(ServiceRegion::with_fixed_stop(2, -1.0, 1.0, StopIndex(0)).is_err());
        assert!(ServiceRegion::with_fixed_stop(2, 1.0, f64::NAN, StopIndex(0)).is_err());
    }

    #[test]
    fn fixed_stop_out_of_range_rejected() {
        let err = ServiceRegion::with_fixed_stop(2, 1.0, 1.0, StopIndex(4)).unwrap_err();
        assert!(matches!(err, RegionError::StopOutOfRange { stops: 4, .. }));
    }

    #[test]
    fn stop_view_flags_depot() {
        let region = ServiceRegion::with_fixed_stop(2, 10.0, 10.0, StopIndex(3)).unwrap();
        assert!(region.stop(StopIndex(3)).unwrap().fixed);
        assert!(!region.stop(StopIndex(0)).unwrap().fixed);
        assert!(region.stop(StopIndex(9)).is_none());
        assert_eq!(region.fixed_stop_position(), Point::new(15.0, 15.0));
    }
}

#[cfg(test)]
mod matrix {
    use ods_core::{Point, StopIndex};

    use crate::{DistanceMatrix, RegionError};

    fn square() -> DistanceMatrix {
        DistanceMatrix::from_points(&[
            Point::new(5.0, 5.0),
            Point::new(15.0, 5.0),
            Point::new(5.0, 15.0),
            Point::new(15.0, 15.0),
        ])
    }

    #[test]
    fn submatrix_reorders_and_truncates() {
        let m = square();
        let sub = m
            .truncated_submatrix(&[StopIndex(3), StopIndex(0), StopIndex(1)])
            .unwrap();
        assert_eq!(sub, vec![vec![0, 14, 10], vec![14, 0, 10], vec![10, 10, 0]]);
    }

    #[test]
    fn submatrix_out_of_range() {
        let err = square().truncated_submatrix(&[StopIndex(0), StopIndex(7)]).unwrap_err();
        assert!(matches!(err, RegionError::StopOutOfRange { index: StopIndex(7), stops: 4 }));
    }

    #[test]
    fn rows_cover_matrix() {
        let m = square();
        assert_eq!(m.rows().count(), 4);
        assert_eq!(m.rows().nth(1).unwrap(), m.row(1));
    }
}

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use ods_core::RunRng;

    use crate::ServiceRegion;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn matrix_is_a_metric(
            seed in any::<u64>(),
            n in 1u32..7,
            len in 0.5f64..20.0,
            width in 0.5f64..20.0,
        ) {
            let mut rng = RunRng::new(seed);
            let region = ServiceRegion::build(n, len, width, &mut rng).unwrap();
            let m = region.distance_matrix();
            let size = m.size();
            prop_assert_eq!(size, (n * n) as usize);
            for i in 0..size {
                prop_assert_eq!(m.get(i, i), 0.0);
                for j in 0..size {
                    prop_assert_eq!(m.get(i, j), m.get(j, i));
                    for k in 0..size {
                        prop_assert!(m.get(i, k) <= m.get(i, j) + m.get(j, k) + 1e-9);
                    }
                }
            }
        }

        #[test]
        fn depot_never_in_non_fixed_stops(seed in any::<u64>(), n in 1u32..12) {
            let mut rng = RunRng::new(seed);
            let region = ServiceRegion::build(n, 1.0, 1.0, &mut rng).unwrap();
            prop_assert!(!region.non_fixed_stops().contains(&region.fixed_stop()));
            prop_assert_eq!(region.non_fixed_stops().len(), region.num_zones() - 1);
        }

        #[test]
        fn depot_choice_is_seed_deterministic(seed in any::<u64>()) {
            let a = ServiceRegion::build(6, 1.0, 1.0, &mut RunRng::new(seed)).unwrap();
            let b = ServiceRegion::build(6, 1.0, 1.0, &mut RunRng::new(seed)).unwrap();
            prop_assert_eq!(a.fixed_stop(), b.fixed_stop());
        }
    }
}
