use serde::{Deserialize, Serialize};

/// Indicator values over a trailing window. Recomputed on every call, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    /// Fractional change of the second-half mean vs the first-half mean (signed)
    pub trend_strength: f64,
    /// Population std-dev of close-to-close returns
    pub volatility: f64,
    /// Fractional change of the last 5 closes vs the 5 before
    pub momentum: f64,
    /// Relative Strength Index, 0..=100
    pub rsi: f64,
}

impl Default for IndicatorSnapshot {
    // What an empty window yields
    fn default() -> Self {
        Self {
            trend_strength: 0.0,
            volatility: 0.0,
            momentum: 0.0,
            rsi: 50.0,
        }
    }
}

/// Price clusters taken from the extremes of a series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportResistance {
    /// Highest highs, descending
    pub resistance: Vec<f64>,
    /// Lowest lows, ascending
    pub support: Vec<f64>,
}
