use rand::Rng;

use crate::analysis::{indicators, levels::levels};
use crate::config::{ANALYSIS, DEBUG_FLAGS};
use crate::domain::Candle;
use crate::error::{ForecastError, Result};
use crate::models::{IndicatorSnapshot, ScenarioAnalysis, ScenarioParams, ScenarioSet, Series};

/// Build bullish/bearish/sideways parameters for the live candle.
///
/// Indicators run over the trailing `ANALYSIS.scenario.window` candles of
/// `history`; support/resistance over all of it. Random draws happen in a fixed
/// order so a seeded `rng` replays the same set.
pub fn build_scenarios<R: Rng + ?Sized>(
    current: &Candle,
    history: &Series,
    rng: &mut R,
) -> Result<ScenarioAnalysis> {
    if history.is_empty() {
        return Err(ForecastError::invalid(
            "scenario generation needs a non-empty history",
        ));
    }
    validate_close(current)?;

    let window = history.tail(ANALYSIS.scenario.window);
    let snapshot = indicators::snapshot(window);
    let levels = levels(history.candles(), ANALYSIS.scenario.level_count);

    if cfg!(debug_assertions) && DEBUG_FLAGS.print_scenario_inputs {
        log::info!(
            "Scenario inputs over {} candles: trend {:.4} | vol {:.4} | mom {:.4} | rsi {:.1} | R {:?} | S {:?}",
            window.len(),
            snapshot.trend_strength,
            snapshot.volatility,
            snapshot.momentum,
            snapshot.rsi,
            levels.resistance,
            levels.support
        );
    }

    let close = current.close;
    let scenarios = ScenarioSet {
        bullish: bullish_params(&snapshot, close, rng),
        bearish: bearish_params(&snapshot, close, rng),
        sideways: sideways_params(&snapshot, close, rng),
    };

    Ok(ScenarioAnalysis {
        snapshot,
        levels,
        scenarios,
    })
}

pub(crate) fn validate_close(current: &Candle) -> Result<()> {
    if !current.close.is_finite() || current.close <= 0.0 {
        return Err(ForecastError::invalid(format!(
            "current candle close must be a positive price, got {}",
            current.close
        )));
    }
    Ok(())
}

fn bullish_params<R: Rng + ?Sized>(s: &IndicatorSnapshot, close: f64, rng: &mut R) -> ScenarioParams {
    ScenarioParams {
        probability: bullish_probability(s),
        strength: (s.trend_strength + s.momentum * 0.5)
            .max(ANALYSIS.scenario.min_directional_strength),
        target_price: close * (1.02 + rng.gen_range(0.0..0.03)),
        confidence: 0.65 + rng.gen_range(0.0..0.25),
    }
}

fn bearish_params<R: Rng + ?Sized>(s: &IndicatorSnapshot, close: f64, rng: &mut R) -> ScenarioParams {
    ScenarioParams {
        probability: bearish_probability(s),
        strength: (s.trend_strength.abs() + s.momentum.abs() * 0.5)
            .max(ANALYSIS.scenario.min_directional_strength),
        target_price: close * (0.97 - rng.gen_range(0.0..0.03)),
        confidence: 0.60 + rng.gen_range(0.0..0.25),
    }
}

fn sideways_params<R: Rng + ?Sized>(s: &IndicatorSnapshot, close: f64, rng: &mut R) -> ScenarioParams {
    ScenarioParams {
        probability: sideways_probability(s),
        strength: 0.2 + rng.gen_range(0.0..0.3),
        target_price: close * (0.995 + rng.gen_range(0.0..0.01)),
        confidence: 0.55 + rng.gen_range(0.0..0.20),
    }
}

pub fn bullish_probability(s: &IndicatorSnapshot) -> f64 {
    let mut probability = 0.5;

    if s.trend_strength > 0.0 {
        probability += s.trend_strength * 2.0;
    }
    if s.momentum > 0.0 {
        probability += s.momentum * 1.5;
    }

    // Oversold favours a bounce
    if s.rsi < ANALYSIS.indicators.rsi_oversold {
        probability += 0.2;
    } else if s.rsi > ANALYSIS.indicators.rsi_overbought {
        probability -= 0.2;
    }

    clamp_directional(probability)
}

pub fn bearish_probability(s: &IndicatorSnapshot) -> f64 {
    let mut probability = 0.5;

    if s.trend_strength < 0.0 {
        probability += s.trend_strength.abs() * 2.0;
    }
    if s.momentum < 0.0 {
        probability += s.momentum.abs() * 1.5;
    }

    if s.rsi > ANALYSIS.indicators.rsi_overbought {
        probability += 0.2;
    } else if s.rsi < ANALYSIS.indicators.rsi_oversold {
        probability -= 0.2;
    }

    clamp_directional(probability)
}

/// `1 - |trend| - momentum`, clamped to [0, 1].
pub fn sideways_probability(s: &IndicatorSnapshot) -> f64 {
    (1.0 - s.trend_strength.abs() - s.momentum).clamp(0.0, 1.0)
}

fn clamp_directional(probability: f64) -> f64 {
    probability.clamp(
        ANALYSIS.scenario.probability_floor,
        ANALYSIS.scenario.probability_ceiling,
    )
}
