//! Indicator, scenario and refresh configuration

/// Windows and thresholds for the indicator library
#[derive(Debug, Clone)]
pub struct IndicatorSettings {
    // Below this many points trend strength is neutral (0.0)
    pub trend_min_points: usize,
    // Size of the "recent" and "older" windows compared by momentum
    pub momentum_window: usize,
    pub rsi_period: usize,
    // RSI bands used by both probability blends
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
}

/// Settings for the scenario parameter builder
#[derive(Debug, Clone)]
pub struct ScenarioSettings {
    // Trailing window of history fed to the indicators
    pub window: usize,
    // Number of support and resistance levels to extract
    pub level_count: usize,
    pub probability_floor: f64,
    pub probability_ceiling: f64,
    pub min_directional_strength: f64,
}

/// Settings for the display-only probability triple
#[derive(Debug, Clone)]
pub struct DisplaySettings {
    pub base_probability: f64,
    pub trend_weight: f64,
    pub momentum_weight: f64,
    pub rsi_adjustment: f64,
    pub volatility_weight: f64,
    pub probability_ceiling: f64,
}

/// Settings for projected paths
#[derive(Debug, Clone)]
pub struct PathSettings {
    pub default_horizon: usize,
    // Longest path the synthesizer will project
    pub max_horizon: usize,
    // Confidence at the horizon end is base * (1 - decay)
    pub confidence_decay: f64,
    pub noise_scale: f64,
    pub range_base: f64,
    pub range_jitter: f64,
}

/// The Master Analysis Configuration
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub indicators: IndicatorSettings,
    pub scenario: ScenarioSettings,
    pub display: DisplaySettings,
    pub path: PathSettings,
    // Fractional move of the live close (vs the last dispatched job) that triggers a refresh
    pub refresh_threshold_pct: f64,
}

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    indicators: IndicatorSettings {
        trend_min_points: 10,
        momentum_window: 5,
        rsi_period: 14,
        rsi_oversold: 30.0,
        rsi_overbought: 70.0,
    },

    scenario: ScenarioSettings {
        window: 20,
        level_count: 3,
        probability_floor: 0.1,
        probability_ceiling: 0.9,
        min_directional_strength: 0.3,
    },

    display: DisplaySettings {
        base_probability: 0.33,
        trend_weight: 0.2,
        momentum_weight: 0.15,
        rsi_adjustment: 0.15,
        volatility_weight: 0.05,
        probability_ceiling: 0.8,
    },

    path: PathSettings {
        default_horizon: 5,
        max_horizon: 3_650,
        confidence_decay: 0.3,
        noise_scale: 0.01,
        range_base: 0.005,
        range_jitter: 0.015,
    },

    refresh_threshold_pct: 0.002,
};
