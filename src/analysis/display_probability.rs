use crate::analysis::indicators;
use crate::config::ANALYSIS;
use crate::domain::Candle;
use crate::models::{DisplayProbabilities, IndicatorSnapshot};

/// Headline bullish/bearish/sideways split shown next to the chart.
///
/// Not the same numbers as `ScenarioParams::probability`: this runs over the
/// full history with a gentler linear blend, and the two need not agree.
pub fn display_probability(history: &[Candle]) -> DisplayProbabilities {
    from_snapshot(&indicators::snapshot(history))
}

pub fn from_snapshot(s: &IndicatorSnapshot) -> DisplayProbabilities {
    let bullish = display_bullish(s);
    let bearish = display_bearish(s);

    DisplayProbabilities {
        bullish,
        bearish,
        sideways: 1.0 - bullish - bearish,
    }
}

fn display_bullish(s: &IndicatorSnapshot) -> f64 {
    let cfg = &ANALYSIS.display;
    let mut probability = cfg.base_probability;

    probability += s.trend_strength * cfg.trend_weight;
    probability += s.momentum * cfg.momentum_weight;

    if s.rsi < ANALYSIS.indicators.rsi_oversold {
        probability += cfg.rsi_adjustment;
    } else if s.rsi > ANALYSIS.indicators.rsi_overbought {
        probability -= cfg.rsi_adjustment;
    }

    // Choppier markets shave a little off
    probability -= s.volatility * cfg.volatility_weight;

    probability.clamp(0.0, cfg.probability_ceiling)
}

fn display_bearish(s: &IndicatorSnapshot) -> f64 {
    let cfg = &ANALYSIS.display;
    let mut probability = cfg.base_probability;

    probability -= s.trend_strength * cfg.trend_weight;
    probability -= s.momentum * cfg.momentum_weight;

    if s.rsi > ANALYSIS.indicators.rsi_overbought {
        probability += cfg.rsi_adjustment;
    } else if s.rsi < ANALYSIS.indicators.rsi_oversold {
        probability -= cfg.rsi_adjustment;
    }

    probability += s.volatility * cfg.volatility_weight;

    probability.clamp(0.0, cfg.probability_ceiling)
}
