use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Candle, ScenarioKind};
use crate::models::indicators::{IndicatorSnapshot, SupportResistance};

/// Parameters steering one scenario's projected path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParams {
    /// Scenario probability. Not comparable with `DisplayProbabilities`.
    pub probability: f64,
    /// Scales both noise and daily range of the projected candles
    pub strength: f64,
    pub target_price: f64,
    /// Confidence at step 0, decays along the path
    pub confidence: f64,
}

/// One `ScenarioParams` per scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSet {
    pub bullish: ScenarioParams,
    pub bearish: ScenarioParams,
    pub sideways: ScenarioParams,
}

impl ScenarioSet {
    pub fn get(&self, kind: ScenarioKind) -> &ScenarioParams {
        match kind {
            ScenarioKind::Bullish => &self.bullish,
            ScenarioKind::Bearish => &self.bearish,
            ScenarioKind::Sideways => &self.sideways,
        }
    }
}

/// Scenario parameters together with the inputs they were derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioAnalysis {
    pub snapshot: IndicatorSnapshot,
    pub levels: SupportResistance,
    pub scenarios: ScenarioSet,
}

/// A projected candle plus the scenario's confidence/probability at that step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionCandle {
    #[serde(flatten)]
    pub candle: Candle,
    pub confidence: f64,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionMetadata {
    pub algorithm: String,
    pub factors: Vec<String>,
    pub confidence: f64,
    pub timeframe: String,
}

impl PredictionMetadata {
    pub const ALGORITHM: &'static str = "AI-Enhanced Technical Analysis";
    pub const FACTORS: [&'static str; 4] = [
        "Trend Analysis",
        "Momentum",
        "Support/Resistance",
        "Volume Profile",
    ];

    pub fn new(confidence: f64, horizon: usize) -> Self {
        Self {
            algorithm: Self::ALGORITHM.to_string(),
            factors: Self::FACTORS.iter().map(|f| f.to_string()).collect(),
            confidence,
            timeframe: format!("{}-day outlook", horizon),
        }
    }
}

/// The projected path for a single scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioForecast {
    pub kind: ScenarioKind,
    pub params: ScenarioParams,
    pub path: Vec<PredictionCandle>,
    pub metadata: PredictionMetadata,
}

/// Everything one prediction refresh produces. Built once, then only read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionSet {
    /// Date of the live candle the paths start from
    pub generated_from: DateTime<Utc>,
    pub analysis: ScenarioAnalysis,
    pub bullish: ScenarioForecast,
    pub bearish: ScenarioForecast,
    pub sideways: ScenarioForecast,
}

impl PredictionSet {
    pub fn get(&self, kind: ScenarioKind) -> &ScenarioForecast {
        match kind {
            ScenarioKind::Bullish => &self.bullish,
            ScenarioKind::Bearish => &self.bearish,
            ScenarioKind::Sideways => &self.sideways,
        }
    }

    pub fn horizon(&self) -> usize {
        self.bullish.path.len()
    }
}

/// Display-only probability triple; sums to 1 by construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayProbabilities {
    pub bullish: f64,
    pub bearish: f64,
    pub sideways: f64,
}

impl DisplayProbabilities {
    pub fn get(&self, kind: ScenarioKind) -> f64 {
        match kind {
            ScenarioKind::Bullish => self.bullish,
            ScenarioKind::Bearish => self.bearish,
            ScenarioKind::Sideways => self.sideways,
        }
    }

    /// Scenario with the largest share; ties go to the earlier of bullish, bearish, sideways.
    pub fn leading(&self) -> ScenarioKind {
        let mut best = ScenarioKind::Bullish;
        for kind in [ScenarioKind::Bearish, ScenarioKind::Sideways] {
            if self.get(kind) > self.get(best) {
                best = kind;
            }
        }
        best
    }
}
