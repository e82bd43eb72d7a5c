//! Stable marriage CLI
//!
//! Generates (or loads) a preference table, runs deferred acceptance,
//! verifies the result and prints a report. Exits non-zero when the
//! matching is unstable or any check fails.

mod args;

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use simulation::export::{export_json, write_to_file, SimulationExport};
use simulation::metrics::run_trials;
use simulation::replay::{check_orders, validate_replay};
use simulation::report::MatchingReport;
use simulation::scenario::{run_generated, run_instance, ScenarioConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use types::preferences::PreferenceTable;

use args::Args;

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let passed = run(&args, &mut std::io::stdout().lock())?;

    if !passed {
        error!("Matching checks failed");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Execute one invocation, printing to `out`.
///
/// Ok(false) means the run finished but a check failed: an unstable
/// matching, a diverging replay or disagreeing selection orders.
fn run(args: &Args, out: &mut impl Write) -> anyhow::Result<bool> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let config = args.to_config(seed);

    if let Some(trials) = args.trials {
        return run_batch(args, &config, trials, out);
    }

    let outcome = match &args.input {
        Some(path) => {
            info!("Loading preferences from {}", path.display());
            run_instance(load_preferences(path)?, config.engine.clone())?
        }
        None => run_generated(&config)?,
    };

    let replay = validate_replay(&outcome.preferences, &outcome.solution)?;
    let mut export = SimulationExport::new()
        .with_report(MatchingReport::from_outcome(&outcome))
        .with_replay(replay);
    if args.check_orders {
        export = export.with_order_check(check_orders(&outcome.preferences, &config.engine, seed)?);
    }

    let replay_matches = export.replay.as_ref().map_or(true, |r| r.matches);
    let orders_agree = export.order_check.as_ref().map_or(true, |c| c.all_agree);

    if args.json {
        writeln!(out, "{}", export_json(&export)?)?;
    } else {
        if args.seed.is_none() && args.input.is_none() {
            writeln!(out, "Seed: {seed}\n")?;
        }
        if let Some(report) = &export.report {
            writeln!(out, "{report}")?;
        }
        if !replay_matches {
            writeln!(out, "\nProposal log replay DIVERGED from the matching.")?;
        }
        if let Some(check) = &export.order_check {
            writeln!(out, "\n{check}")?;
        }
    }
    save_export(args, &export)?;

    Ok(outcome.is_stable() && replay_matches && orders_agree)
}

fn run_batch(
    args: &Args,
    config: &ScenarioConfig,
    trials: u64,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let metrics = run_trials(config, trials)?;
    let all_stable = metrics.all_stable();

    if args.json {
        let export = SimulationExport::new().with_metrics(metrics);
        writeln!(out, "{}", export_json(&export)?)?;
        save_export(args, &export)?;
    } else {
        writeln!(out, "{}", metrics.summary())?;
        save_export(args, &SimulationExport::new().with_metrics(metrics))?;
    }

    Ok(all_stable)
}

fn save_export(args: &Args, export: &SimulationExport) -> anyhow::Result<()> {
    if let Some(path) = &args.output {
        write_to_file(export, path).with_context(|| format!("writing {}", path.display()))?;
        info!("Export written to {}", path.display());
    }
    Ok(())
}

fn load_preferences(path: &Path) -> anyhow::Result<PreferenceTable> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("invalid preference table in {}", path.display()))
}
