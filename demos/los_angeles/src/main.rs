//! los_angeles: parking time-loss pricing on a synthetic LA population.
//!
//! Replays a day of plans for a few thousand commuters and freight drivers,
//! charges every car/ride departure that does not start at home or work,
//! and reports the resulting money utility per iteration.  Pass a TOML run
//! configuration and persons/plans CSV files to run on real inputs instead.

mod synth;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pk_output::{CsvEventWriter, EventsOutputHandler, ScoreStatsObserver};
use pk_population::load_population_csv;
use pk_sim::{ControllerBuilder, IterationObserver, IterationSummary, RunConfig, load_run_config};

// ── Defaults ──────────────────────────────────────────────────────────────────

const DEFAULT_CONFIG: &str = r#"
[controller]
first_iteration       = 0
last_iteration        = 4
output_directory      = "output/los_angeles"
write_events_interval = 2

[parking]
modes                      = ["car", "ride"]
excluded_activity_prefixes = ["home", "work"]

[[scoring.parameter_sets]]
performing_utils_hr       = 6.0
marginal_utility_of_money = 1.0
[scoring.parameter_sets.modes.car]
marginal_utility_of_traveling_utils_hr = -2.0
[scoring.parameter_sets.modes.ride]
marginal_utility_of_traveling_utils_hr = -1.5
[scoring.parameter_sets.modes.pt]
marginal_utility_of_traveling_utils_hr = -1.0
[scoring.parameter_sets.modes.walk]
marginal_utility_of_traveling_utils_hr = -3.0
[scoring.parameter_sets.modes.bike]
marginal_utility_of_traveling_utils_hr = -3.0

[[scoring.parameter_sets]]
subpopulation             = "freight"
performing_utils_hr       = 12.0
marginal_utility_of_money = 0.5
[scoring.parameter_sets.modes.car]
marginal_utility_of_traveling_utils_hr = 0.0
[scoring.parameter_sets.modes.walk]
marginal_utility_of_traveling_utils_hr = -1.0
"#;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "los_angeles")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Run configuration (TOML).  Built-in defaults if omitted.
    config: Option<PathBuf>,

    /// Persons CSV (person_id,subpopulation,marginal_utility_of_money)
    #[arg(long, requires = "plans")]
    persons: Option<PathBuf>,

    /// Plans CSV (person_id,seq,element,type,end_time,travel_time)
    #[arg(long, requires = "persons")]
    plans: Option<PathBuf>,

    /// Synthetic population size when no CSV input is given
    #[arg(short, long, default_value_t = 5_000)]
    agents: u32,

    /// Seed for the synthetic population
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Overrides the configured output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log filter (trace, debug, info, warn, error, or a full directive)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    log_level: String,
}

// ── Progress observer ─────────────────────────────────────────────────────────

/// Prints one line per iteration and forwards to the score-stats writer.
struct ProgressObserver {
    inner:   Option<ScoreStatsObserver>,
    started: Instant,
}

impl IterationObserver for ProgressObserver {
    fn on_iteration_start(&mut self, _iteration: u32) {
        self.started = Instant::now();
    }

    fn on_iteration_end(&mut self, summary: &IterationSummary) {
        println!(
            "{:>9} {:>10} {:>9} {:>14.2} {:>14.6} {:>8.3}",
            summary.iteration,
            summary.events,
            summary.charges,
            summary.total_amount,
            summary.average_money_utility,
            self.started.elapsed().as_secs_f64(),
        );
        if let Some(inner) = self.inner.as_mut() {
            inner.on_iteration_end(summary);
        }
    }

    fn on_run_end(&mut self, stats: &pk_scoring::ScoreStats) {
        if let Some(inner) = self.inner.as_mut() {
            inner.on_run_end(stats);
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log_level))
        .with_target(true)
        .init();

    // 1. Configuration.
    let mut config = match &cli.config {
        Some(path) => load_run_config(path)?,
        None => RunConfig::from_toml_str(DEFAULT_CONFIG).context("built-in configuration")?,
    };
    if let Some(dir) = &cli.output {
        config.controller.output_directory = Some(dir.clone());
    }

    // 2. Population.
    let population = match (&cli.persons, &cli.plans) {
        (Some(persons), Some(plans)) => load_population_csv(persons, plans)
            .with_context(|| format!("loading {} / {}", persons.display(), plans.display()))?,
        _ => synth::population(cli.agents, cli.seed)?,
    };
    let population = Arc::new(population);
    tracing::info!(persons = population.len(), synthetic = cli.persons.is_none(), "population ready");

    println!("=== los_angeles: parking time-loss pricing ===");
    println!(
        "Persons: {}  |  Iterations: {}..={}  |  Time loss per charge: {} s",
        population.len(),
        config.controller.first_iteration,
        config.controller.last_iteration,
        config.parking.additional_time_loss_seconds(),
    );
    println!();

    // 3. Controller with optional file output.
    let output_dir = config.controller.output_directory.clone();
    let mut builder = ControllerBuilder::new(config.clone(), Arc::clone(&population));
    if let Some(dir) = &output_dir {
        let writer = CsvEventWriter::new(dir).with_context(|| format!("creating {}", dir.display()))?;
        builder = builder.handler(EventsOutputHandler::new(writer, &config.controller));
    }
    let mut controller = builder.build()?;

    let mut observer = ProgressObserver {
        inner:   output_dir.as_ref().map(ScoreStatsObserver::new),
        started: Instant::now(),
    };

    // 4. Run.
    println!(
        "{:>9} {:>10} {:>9} {:>14} {:>14} {:>8}",
        "iteration", "events", "charges", "total amount", "avg utility", "secs"
    );
    println!("{}", "-".repeat(69));
    let t0 = Instant::now();
    controller.run(&mut observer)?;
    let elapsed = t0.elapsed();

    if let Some(e) = observer.inner.as_mut().and_then(ScoreStatsObserver::take_error) {
        eprintln!("output error: {e}");
    }

    // 5. Summary of the last iteration.
    println!();
    println!("Run complete in {:.3} s", elapsed.as_secs_f64());
    if let Some(ledger) = controller.handler::<pk_scoring::MoneyLedger>() {
        println!();
        println!("{:<64} {:>14}", "Purpose", "Amount");
        println!("{}", "-".repeat(79));
        for (purpose, amount) in ledger.amounts_by_purpose() {
            println!("{purpose:<64} {amount:>14.2}");
        }
    }
    if let Some(dir) = &output_dir {
        println!();
        println!("Output written to {}", dir.display());
    }

    Ok(())
}
