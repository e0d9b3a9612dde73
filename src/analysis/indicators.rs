//! Trend, volatility, momentum and RSI over a slice of candles.
//!
//! Every function is pure and total: short input yields a neutral value
//! (0.0, or 50.0 for RSI) and zero denominators are resolved explicitly, so
//! finite input never produces NaN or Infinity.

use itertools::Itertools;

use crate::config::ANALYSIS;
use crate::domain::Candle;
use crate::models::IndicatorSnapshot;
use crate::utils::maths_utils::{fractional_change, mean, population_std_dev};

const NEUTRAL_RSI: f64 = 50.0;

/// Compute all four indicators over `series` with the default RSI period.
pub fn snapshot(series: &[Candle]) -> IndicatorSnapshot {
    IndicatorSnapshot {
        trend_strength: trend_strength(series),
        volatility: volatility(series),
        momentum: momentum(series),
        rsi: rsi(series, ANALYSIS.indicators.rsi_period),
    }
}

/// Mean close of the second half vs the first half, as a fraction of the first.
/// For odd lengths the extra point lands in the second half.
pub fn trend_strength(series: &[Candle]) -> f64 {
    if series.len() < ANALYSIS.indicators.trend_min_points {
        return 0.0;
    }

    let (first_half, second_half) = series.split_at(series.len() / 2);
    match (mean_close(first_half), mean_close(second_half)) {
        (Some(first_avg), Some(second_avg)) => fractional_change(first_avg, second_avg),
        _ => 0.0,
    }
}

/// Population standard deviation of close-to-close returns.
pub fn volatility(series: &[Candle]) -> f64 {
    if series.len() < 2 {
        return 0.0;
    }

    let returns: Vec<f64> = series
        .iter()
        .tuple_windows()
        .filter(|(prev, _)| prev.close != 0.0)
        .map(|(prev, next)| (next.close - prev.close) / prev.close)
        .collect();

    population_std_dev(&returns)
}

/// Mean of the last `w` closes vs the `w` closes before them (`w` = 5).
/// With fewer than `2w` points the older window is whatever precedes the recent one.
pub fn momentum(series: &[Candle]) -> f64 {
    let window = ANALYSIS.indicators.momentum_window;
    if series.len() < window {
        return 0.0;
    }

    let recent_start = series.len() - window;
    let older_start = recent_start.saturating_sub(window);
    let recent = &series[recent_start..];
    let older = &series[older_start..recent_start];

    match (mean_close(older), mean_close(recent)) {
        (Some(older_avg), Some(recent_avg)) => fractional_change(older_avg, recent_avg),
        // Empty older window: nothing to compare against
        _ => 0.0,
    }
}

/// Simple-average RSI over the most recent `period` deltas.
///
/// A flat window (no gains, no losses) is neutral at 50; a window with gains
/// but no losses is pinned at 100.
pub fn rsi(series: &[Candle], period: usize) -> f64 {
    if period == 0 || series.len() < period + 1 {
        return NEUTRAL_RSI;
    }

    let deltas = &series[series.len() - (period + 1)..];
    let (gain_sum, loss_sum) = deltas
        .iter()
        .tuple_windows()
        .map(|(prev, next)| next.close - prev.close)
        .fold((0.0, 0.0), |(gains, losses), change| {
            if change > 0.0 {
                (gains + change, losses)
            } else {
                (gains, losses - change)
            }
        });

    let avg_gain = gain_sum / period as f64;
    let avg_loss = loss_sum / period as f64;

    if avg_loss == 0.0 {
        return if avg_gain == 0.0 { NEUTRAL_RSI } else { 100.0 };
    }

    let rs = avg_gain / avg_loss;
    (100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0)
}

fn mean_close(candles: &[Candle]) -> Option<f64> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    mean(&closes)
}
