//! Synthetic candle generator configuration.
//!
//! Constants for the random walk that stands in for market data. None of this
//! is calibrated against a real instrument.

/// Runtime settings carried by a `CandleSeriesGenerator`
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorSettings {
    pub base_price: f64,
    // Width of the daily random-walk term: U(-volatility/2, volatility/2)
    pub volatility: f64,
    pub base_volume: u64,
}

/// Constants for the live (intraday) candle
pub struct IntradaySettings {
    // Width of the opening move: U(-volatility/2, volatility/2)
    pub volatility: f64,
    // Minutes from midnight that count as a full trading day for volume build-up
    pub session_minutes: f64,
    // Width of a single live tick perturbation: U(-tick/2, tick/2)
    pub tick_volatility: f64,
    // Upper bound of per-tick volume growth as a fraction of base volume
    pub tick_volume_pct: f64,
}

/// The Master Generator Configuration
pub struct GeneratorConfig {
    pub defaults: GeneratorSettings,
    pub intraday: IntradaySettings,
    // Slow cyclical bias: sin(day / period) * amplitude
    pub cycle_period_days: f64,
    pub cycle_amplitude: f64,
    // Six months of history by default
    pub default_history_days: usize,
    // Longest history the generator will build (about a century)
    pub max_history_days: usize,
}

pub const GENERATOR: GeneratorConfig = GeneratorConfig {
    defaults: GeneratorSettings {
        base_price: 150.0,
        volatility: 0.02,
        base_volume: 1_000_000,
    },

    intraday: IntradaySettings {
        volatility: 0.015,
        session_minutes: 16.0 * 60.0,
        tick_volatility: 0.001,
        tick_volume_pct: 0.01,
    },

    cycle_period_days: 20.0,
    cycle_amplitude: 0.005,
    default_history_days: 180,
    max_history_days: 36_500,
};

impl Default for GeneratorSettings {
    fn default() -> Self {
        GENERATOR.defaults.clone()
    }
}
