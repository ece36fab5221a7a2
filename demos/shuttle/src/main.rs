//! shuttle — runs a batch of on-demand shuttle scenarios.
//!
//! Loads a `ScenarioConfig` from JSON (or uses the defaults), applies any
//! command-line overrides, runs `num_simulations` independent scenarios, and
//! writes one result directory per run under `<output_dir>/data/`.  An empty
//! `<output_dir>/.success` marks a completed batch.
//!
//! ```text
//! cargo run -p shuttle --release -- --config demos/shuttle/config.json --runs 50
//! RUST_LOG=ods_sim=debug cargo run -p shuttle -- --scenario One --seed 7
//! ```

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{arg, value_parser, ArgMatches, Command};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ods_core::{ScenarioConfig, ScenarioKind};
use ods_output::{write_success_marker, FileRunWriter, RunOutputObserver};
use ods_routing::InsertionSolver;
use ods_sim::Batch;

// ── CLI ───────────────────────────────────────────────────────────────────────

fn cli() -> Command {
    Command::new("shuttle")
        .about("Simulates reservation acceptance for a single on-demand shuttle")
        .arg(
            arg!(--config <PATH> "JSON scenario configuration")
                .required(false)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(arg!(--scenario <KIND> "Zero, AllBelowCutoff or One").required(false))
        .arg(
            arg!(--seed <SEED> "Base seed; runs derive their own seeds from it")
                .required(false)
                .value_parser(value_parser!(u64)),
        )
        .arg(
            arg!(--runs <N> "Number of simulations")
                .required(false)
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(--output <DIR> "Output directory")
                .required(false)
                .value_parser(value_parser!(PathBuf)),
        )
}

fn load_config(matches: &ArgMatches) -> Result<ScenarioConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => ScenarioConfig::default(),
    };

    if let Some(kind) = matches.get_one::<String>("scenario") {
        config.scenario = ScenarioKind::from_str(kind)?;
    }
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        config.seed = Some(seed);
    }
    if let Some(&runs) = matches.get_one::<usize>("runs") {
        config.num_simulations = runs;
    }
    if let Some(dir) = matches.get_one::<PathBuf>("output") {
        config.output_dir = dir.clone();
    }

    config.validate()?;
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let matches = cli().get_matches();
    let config = load_config(&matches)?;

    println!("=== shuttle ===");
    println!(
        "Scenario: {}  |  {}x{} zones  |  λ = {}  |  cutoff = {} min  |  runs = {}",
        config.scenario,
        config.zones_per_row,
        config.zones_per_row,
        config.lambda,
        config.reservation_cutoff_min,
        config.num_simulations,
    );
    println!();

    let output_dir = config.output_dir.clone();
    let batch = Batch::new(config);

    let t0 = Instant::now();
    let summary = batch.run(&InsertionSolver::new(), |_| {
        RunOutputObserver::new(FileRunWriter::new(&output_dir), batch.config())
    })?;
    let elapsed = t0.elapsed();

    info!(
        runs = summary.runs,
        solved = summary.solved,
        failed = summary.failed,
        errored = summary.errored(),
        elapsed_secs = elapsed.as_secs_f64(),
        "batch finished"
    );
    if summary.errored() > 0 {
        warn!(errored = summary.errored(), "some runs produced no results");
    }

    let marker = write_success_marker(&output_dir)
        .with_context(|| format!("writing success marker under {}", output_dir.display()))?;

    println!();
    println!("Runs:     {}", summary.runs);
    println!("Solved:   {}", summary.solved);
    println!("Failed:   {}", summary.failed);
    println!("Errored:  {}", summary.errored());
    println!("Elapsed:  {:.2?}", elapsed);
    println!("Results stored under {}/data ({})", output_dir.display(), marker.display());

    Ok(())
}
