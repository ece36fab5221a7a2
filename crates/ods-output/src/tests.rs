//! Integration tests for ods-output.

#[cfg(test)]
mod helpers {
    use std::path::Path;

    use tempfile::TempDir;

    use ods_core::{ScenarioConfig, ScenarioKind};
    use ods_routing::InsertionSolver;
    use ods_sim::{RunBuilder, ScenarioRun};

    use crate::{FileRunWriter, RunOutputObserver};

    pub fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    pub fn config(output_dir: &Path) -> ScenarioConfig {
        ScenarioConfig {
            scenario:               ScenarioKind::Zero,
            zones_per_row:          4,
            lambda:                 0.5,
            planning_horizon:       1.0,
            reservation_cutoff_min: 30,
            shuttle_speed:          10.0,
            output_dir:             output_dir.to_path_buf(),
            write_distance_matrix:  true,
            write_route_graph:      true,
            ..ScenarioConfig::default()
        }
    }

    /// Run a seeded scenario through a file-writing observer.
    pub fn solved_run(cfg: ScenarioConfig) -> (ScenarioRun, RunOutputObserver<FileRunWriter>) {
        let mut obs = RunOutputObserver::new(FileRunWriter::new(&cfg.output_dir), &cfg);
        let mut run = RunBuilder::new(cfg).seed(13).build().unwrap();
        run.run(&InsertionSolver, &mut obs).unwrap();
        (run, obs)
    }
}

#[cfg(test)]
mod dir_tests {
    use chrono::NaiveDate;

    use super::helpers::tmp;
    use crate::{write_success_marker, RunDirectory};

    fn at() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_micro_opt(9, 5, 2, 123_456)
            .unwrap()
    }

    #[test]
    fn timestamped_name_under_data() {
        let root = tmp();
        let dir = RunDirectory::create(root.path(), at()).unwrap();
        assert_eq!(dir.path(), root.path().join("data").join("07_03_2024__09_05_02.123456"));
        assert!(dir.path().is_dir());
    }

    #[test]
    fn collisions_get_a_suffix() {
        let root = tmp();
        let a = RunDirectory::create(root.path(), at()).unwrap();
        let b = RunDirectory::create(root.path(), at()).unwrap();
        let c = RunDirectory::create(root.path(), at()).unwrap();
        assert_ne!(a, b);
        assert!(b.path().ends_with("07_03_2024__09_05_02.123456-1"));
        assert!(c.path().ends_with("07_03_2024__09_05_02.123456-2"));
    }

    #[test]
    fn unwritable_root_errors() {
        let root = tmp();
        let file = root.path().join("not_a_dir");
        std::fs::write(&file, "x").unwrap();
        assert!(RunDirectory::create(&file, at()).is_err());
    }

    #[test]
    fn success_marker_is_empty() {
        let root = tmp();
        let path = write_success_marker(root.path()).unwrap();
        assert_eq!(path, root.path().join(".success"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "");
    }
}

#[cfg(test)]
mod file_tests {
    use std::fs;

    use ods_core::ReservationStatus;
    use ods_sim::RunRecord;

    use super::helpers::{config, solved_run, tmp};
    use crate::files::{scientific, GRAPH_FILE, MATRIX_FILE, RESULTS_FILE, TRIPS_FILE};

    #[test]
    fn all_artifacts_written() {
        let root = tmp();
        let (_run, obs) = solved_run(config(root.path()));
        let dir = obs.writer().run_dir().unwrap();
        for file in [TRIPS_FILE, RESULTS_FILE, MATRIX_FILE, GRAPH_FILE] {
            assert!(dir.join(file).exists(), "{file} missing");
        }
    }

    #[test]
    fn optional_artifacts_can_be_disabled() {
        let root = tmp();
        let cfg = ods_core::ScenarioConfig {
            write_distance_matrix: false,
            write_route_graph: false,
            ..config(root.path())
        };
        let (_run, obs) = solved_run(cfg);
        let dir = obs.writer().run_dir().unwrap();
        assert!(dir.join(TRIPS_FILE).exists());
        assert!(!dir.join(MATRIX_FILE).exists());
        assert!(!dir.join(GRAPH_FILE).exists());
    }

    #[test]
    fn trips_csv_matches_run() {
        let root = tmp();
        let (run, obs) = solved_run(config(root.path()));
        let path = obs.writer().run_dir().unwrap().join(TRIPS_FILE);

        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["ID", "DIRECTION", "LOCATION_INDEX", "RESERVED_AT", "RESERVATION_STATUS"]);

        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), run.trips().len());
        for (row, trip) in rows.iter().zip(run.trips()) {
            assert_eq!(&row[0], trip.id.0.to_string());
            assert_eq!(&row[1], trip.direction.as_str());
            assert_eq!(&row[2], trip.location_index.0.to_string());
            assert_eq!(&row[3], trip.reserved_at.to_string());
            assert_eq!(&row[4], trip.status().as_str());
            assert_ne!(trip.status(), ReservationStatus::Pending);
        }
    }

    #[test]
    fn results_describe_the_route() {
        let root = tmp();
        let (run, obs) = solved_run(config(root.path()));
        let text = fs::read_to_string(obs.writer().run_dir().unwrap().join(RESULTS_FILE)).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Objective: <= 30 minutes");
        assert_eq!(lines[1], "Route for Shuttle:");
        assert!(lines[2].starts_with("0 -> "), "{}", lines[2]);
        assert!(lines[2].ends_with(" -> 0"), "{}", lines[2]);

        let depot = run.region().fixed_stop().0.to_string();
        let region_line = lines.iter().find_map(|l| l.strip_prefix("Region stops: ")).unwrap();
        let stops: Vec<&str> = region_line.split(" -> ").collect();
        assert_eq!(stops.first(), Some(&depot.as_str()));
        assert_eq!(stops.last(), Some(&depot.as_str()));
        assert_eq!(stops.len(), lines[2].split(" -> ").count());
        assert!(lines[3].starts_with("Route time: ") && lines[3].ends_with(" minutes"));
        assert!(text.contains("Elapsed time: "));
        assert!(text.ends_with(&format!("Seed: {}\n", run.seed())));

        let summary = run.record().and_then(RunRecord::summary).unwrap();
        assert_eq!(lines[3], format!("Route time: {:.2} minutes", summary.route_time_min));
    }

    #[test]
    fn all_below_cutoff_states_the_cutoff_bound() {
        let root = tmp();
        let cfg = ods_core::ScenarioConfig {
            scenario: ods_core::ScenarioKind::AllBelowCutoff,
            ..config(root.path())
        };
        let (_run, obs) = solved_run(cfg);
        let text = fs::read_to_string(obs.writer().run_dir().unwrap().join(RESULTS_FILE)).unwrap();
        assert!(text.starts_with("Objective: <= 30 minutes\nRoute for Shuttle:\n0 -> "), "{text}");
    }

    #[test]
    fn distance_matrix_rows() {
        let root = tmp();
        let (run, obs) = solved_run(config(root.path()));
        let text = fs::read_to_string(obs.writer().run_dir().unwrap().join(MATRIX_FILE)).unwrap();
        let n = run.region().num_zones();
        let rows: Vec<Vec<f64>> = text
            .lines()
            .map(|l| l.split(' ').map(|v| v.parse().unwrap()).collect())
            .collect();
        assert_eq!(rows.len(), n);
        assert!(rows.iter().all(|r| r.len() == n));
        assert_eq!(rows[0][0], 0.0);
        assert_eq!(rows[0][1], 1.0);
    }

    #[test]
    fn scientific_notation_matches_savetxt() {
        assert_eq!(scientific(0.0), "0.000000000000000000e+00");
        assert_eq!(scientific(10.0), "1.000000000000000000e+01");
        assert_eq!(scientific(0.5), "5.000000000000000000e-01");
    }

    #[test]
    fn graph_file_is_dot() {
        let root = tmp();
        let (_run, obs) = solved_run(config(root.path()));
        let dot = fs::read_to_string(obs.writer().run_dir().unwrap().join(GRAPH_FILE)).unwrap();
        assert!(dot.starts_with("digraph route {"));
        assert!(dot.contains("#8DB1E2"));
        assert!(dot.trim_end().ends_with('}'));
    }
}

#[cfg(test)]
mod observer_tests {
    use std::fs;

    use ods_routing::{RouteOutcome, RouteSolver, RoutingProblem, SolveError};
    use ods_sim::{RunBuilder, SimError};

    use super::helpers::{config, tmp};
    use crate::files::{GRAPH_FILE, RESULTS_FILE, TRIPS_FILE};
    use crate::{FileRunWriter, OutputError, RunOutputObserver};

    struct Infeasible;

    impl RouteSolver for Infeasible {
        fn solve(&self, _problem: &RoutingProblem) -> Result<RouteOutcome, SolveError> {
            Err(SolveError::Infeasible)
        }
    }

    #[test]
    fn failed_solve_is_written_as_failure() {
        let root = tmp();
        let cfg = config(root.path());
        let mut obs = RunOutputObserver::new(FileRunWriter::new(root.path()), &cfg);
        let mut run = RunBuilder::new(cfg).seed(5).build().unwrap();
        run.run(&Infeasible, &mut obs).unwrap();

        let dir = obs.writer().run_dir().unwrap();
        let text = fs::read_to_string(dir.join(RESULTS_FILE)).unwrap();
        assert!(text.starts_with("Failed to find solution\n"));
        assert!(text.contains("no route satisfies the constraints"));
        assert!(dir.join(TRIPS_FILE).exists());
        assert!(!dir.join(GRAPH_FILE).exists());
    }

    #[test]
    fn directory_failure_stops_the_run() {
        let root = tmp();
        let blocker = root.path().join("blocker");
        fs::write(&blocker, "x").unwrap();

        let cfg = config(&blocker);
        let mut obs = RunOutputObserver::new(FileRunWriter::new(&blocker), &cfg);
        let mut run = RunBuilder::new(cfg).seed(5).build().unwrap();
        let result = run.run(&Infeasible, &mut obs);

        assert!(matches!(result, Err(SimError::Observer(_))));
        assert!(run.record().is_none());
        assert!(obs.writer().run_dir().is_none());
    }

    #[test]
    fn writes_before_begin_run_error() {
        use crate::RunWriter;

        let root = tmp();
        let mut w = FileRunWriter::new(root.path());
        assert!(matches!(w.write_trips(&[]), Err(OutputError::NoRunDirectory)));
    }
}

#[cfg(test)]
mod graph_tests {
    use ods_core::ReservationStatus;
    use ods_sim::RunRecord;

    use super::helpers::{config, solved_run, tmp};
    use crate::{RouteGraph, StopKind};

    #[test]
    fn graph_chains_route_and_keeps_rejections_apart() {
        let root = tmp();
        let (run, _obs) = solved_run(config(root.path()));
        let graph = RouteGraph::from_run(&run).unwrap();
        let summary = run.record().and_then(RunRecord::summary).unwrap();

        let visited = summary.route.iter().filter(|s| s.trip.is_some()).count();
        let rejected = run.trips().iter().filter(|t| t.status() == ReservationStatus::Rejected).count();
        assert_eq!(graph.nodes.len(), 1 + visited + rejected);
        assert_eq!(graph.nodes[0].kind, StopKind::Depot);
        assert_eq!(graph.nodes[0].position, run.region().fixed_stop_position());
        assert_eq!(graph.edges.len(), if visited > 0 { visited + 1 } else { 0 });
        assert!(graph.nodes.iter().filter(|n| !n.routed).count() == rejected);
        assert!(graph.edges.iter().all(|&(a, b)| graph.nodes[a].routed && graph.nodes[b].routed));
    }

    #[test]
    fn colours_follow_direction() {
        assert_eq!(StopKind::Depot.color(), "#8DB1E2");
        assert_eq!(StopKind::Inbound.color(), "#C4D6A0");
        assert_eq!(StopKind::Outbound.color(), "#FFC000");
    }

    #[test]
    fn unsolved_run_has_no_graph() {
        let run = ods_sim::RunBuilder::new(config(std::path::Path::new("unused"))).seed(1).build().unwrap();
        assert!(RouteGraph::from_run(&run).is_none());
    }
}
