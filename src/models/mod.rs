// Domain models for the forecast engine
// These modules contain plain data shapes, independent of how they are produced or shown

pub mod indicators;
pub mod prediction;
pub mod series;

// Re-export key types for convenience
pub use indicators::{IndicatorSnapshot, SupportResistance};
pub use prediction::{
    DisplayProbabilities, PredictionCandle, PredictionMetadata, PredictionSet, ScenarioAnalysis,
    ScenarioForecast, ScenarioParams, ScenarioSet,
};
pub use series::Series;
