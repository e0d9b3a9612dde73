#![allow(clippy::collapsible_if)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod models;
pub mod report;
pub mod utils;

// Re-export commonly used types
pub use analysis::{build_scenarios, display_probability, generate_predictions, levels, synthesize};
pub use data::{CandleSeriesGenerator, ErrorJournal};
pub use domain::{Candle, CandleType, ScenarioKind};
pub use engine::ForecastEngine;
pub use error::{ForecastError, Result};
pub use models::{
    DisplayProbabilities, IndicatorSnapshot, PredictionCandle, PredictionSet, ScenarioParams,
    Series, SupportResistance,
};
pub use report::SessionReport;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{ANALYSIS, GENERATOR};

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Calendar days of synthetic history to generate
    #[arg(
        long,
        default_value_t = GENERATOR.default_history_days,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new()
            .range(0..=GENERATOR.max_history_days as u64)
    )]
    pub days: usize,

    /// Number of projected candles per scenario
    #[arg(
        long,
        default_value_t = ANALYSIS.path.default_horizon,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new()
            .range(0..=ANALYSIS.path.max_horizon as u64)
    )]
    pub horizon: usize,

    /// Seed for every random draw in the session (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Live-candle updates to simulate after the first prediction
    #[arg(long, default_value_t = 10)]
    pub ticks: usize,

    /// Seconds of simulated time between live ticks
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(i64).range(0..=MAX_TICK_SECONDS))]
    pub tick_seconds: i64,

    /// Session clock as RFC 3339 (defaults to now)
    #[arg(long)]
    pub as_of: Option<DateTime<Utc>>,

    /// Load history from a JSON series file instead of generating it
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Write the session's history to a JSON series file
    #[arg(long)]
    pub save_history: Option<PathBuf>,

    /// Print the session report as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Error journal location
    #[arg(long)]
    pub error_log: Option<PathBuf>,
}

const WORKER_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_TICK_SECONDS: i64 = 86_400;

/// Run one simulated session: build (or load) history, open the live candle,
/// predict, then replay `ticks` live updates letting the engine refresh as the
/// price moves.
pub fn run_session(cli: &Cli) -> anyhow::Result<SessionReport> {
    let as_of = cli.as_of.unwrap_or_else(Utc::now);
    let seed = cli.seed.unwrap_or_else(rand::random);
    log::info!("Session seed {} at {}", seed, as_of.to_rfc3339());

    let mut rng = StdRng::seed_from_u64(seed);
    let generator = CandleSeriesGenerator::default();

    let history = match &cli.history {
        Some(path) => data::load_series(path)
            .with_context(|| format!("Failed to load history from {}", path.display()))?,
        None => generator
            .historical_series(cli.days, as_of, &mut rng)
            .context("Failed to generate synthetic history")?,
    };

    if let Some(path) = &cli.save_history {
        data::save_series(&history, path)
            .with_context(|| format!("Failed to save history to {}", path.display()))?;
        log::info!("History written to {}", path.display());
    }

    let current = generator.current_candle(&history, as_of, &mut rng);
    let history_len = history.len();
    let history_first = history.candles().first().map(|c| c.date);
    let history_last = history.last().map(|c| c.date);

    let mut engine = ForecastEngine::new(history, current, generator, cli.horizon, rng.r#gen());
    engine.wait_idle(WORKER_TIMEOUT)?;

    for tick in 1..=cli.ticks {
        let Some(tick_time) = i64::try_from(tick)
            .ok()
            .and_then(|n| n.checked_mul(cli.tick_seconds))
            .and_then(chrono::Duration::try_seconds)
            .and_then(|offset| as_of.checked_add_signed(offset))
        else {
            bail!(
                "Tick {} ({}s apart) falls outside the supported date range",
                tick,
                cli.tick_seconds
            );
        };
        engine.tick(tick_time);
        engine.wait_idle(WORKER_TIMEOUT)?;
    }

    Ok(SessionReport {
        seed,
        as_of,
        history_len,
        history_first,
        history_last,
        current: engine.current().clone(),
        ticks: cli.ticks,
        refreshes: engine.state.completed_jobs,
        display_probabilities: engine.display_probabilities(),
        prediction: engine.prediction().map(|p| (*p).clone()),
        errors: engine.drain_errors(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["candle-oracle"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn test_cli_defaults() {
        let cli = cli(&[]);
        assert_eq!(cli.days, 180);
        assert_eq!(cli.horizon, 5);
        assert_eq!(cli.ticks, 10);
        assert!(cli.seed.is_none() && !cli.json);
    }

    #[test]
    fn test_session_is_reproducible() {
        let args = [
            "--seed",
            "12",
            "--days",
            "60",
            "--ticks",
            "3",
            "--as-of",
            "2024-06-12T14:00:00Z",
        ];
        let a = run_session(&cli(&args)).unwrap();
        let b = run_session(&cli(&args)).unwrap();

        assert_eq!(a.seed, 12);
        assert!(a.errors.is_empty());
        assert!(a.refreshes >= 1);
        assert_eq!(a.prediction, b.prediction);
        assert_eq!(a.current, b.current);

        let text = a.render_text();
        assert!(text.contains("[Bullish]"));
        assert!(text.contains("[Sideways]"));
        let json = serde_json::to_string(&a).unwrap();
        assert!(json.contains("\"display_probabilities\""));
    }

    #[test]
    fn test_bad_horizon_is_reported_not_fatal() {
        let report = run_session(&cli(&["--seed", "1", "--horizon", "0", "--ticks", "0"])).unwrap();
        assert!(report.prediction.is_none());
        assert_eq!(report.errors.len(), 1);
        assert!(report.render_text().contains("No prediction available"));
    }

    #[test]
    fn test_cli_rejects_out_of_range_values() {
        let parse = |args: &[&str]| {
            let mut argv = vec!["candle-oracle"];
            argv.extend_from_slice(args);
            Cli::try_parse_from(argv)
        };
        assert!(parse(&["--days", "100000000"]).is_err());
        assert!(parse(&["--tick-seconds", "9223372036854775807"]).is_err());
        assert!(parse(&["--tick-seconds", "-1"]).is_err());
        assert!(parse(&["--horizon", "1000000"]).is_err());
        assert_eq!(parse(&["--days", "36500"]).unwrap().days, 36_500);
    }

    #[test]
    fn test_tick_overflow_is_an_error_not_a_panic() {
        let mut args = cli(&[
            "--seed",
            "3",
            "--days",
            "30",
            "--ticks",
            "1",
            "--as-of",
            "2024-06-12T14:00:00Z",
        ]);
        // Bypasses the clap range, as a library caller could
        args.tick_seconds = i64::MAX;
        let err = run_session(&args).unwrap_err();
        assert!(err.to_string().contains("outside the supported date range"));

        args.tick_seconds = 2;
        args.days = 100_000_000;
        assert!(run_session(&args).is_err());
    }
}
