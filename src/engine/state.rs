use std::sync::Arc;

use crate::models::PredictionSet;

/// Prediction state owned by the engine.
#[derive(Debug, Clone)]
pub struct ForecastState {
    /// THE FRONT BUFFER.
    /// Readers clone the Arc; a finished job replaces the pointer wholesale,
    /// so a set that is already handed out never changes underneath anyone.
    pub prediction: Option<Arc<PredictionSet>>,

    /// Close of the live candle the last job was dispatched with
    pub last_dispatch_close: f64,

    /// Is the worker currently crunching a job?
    pub is_calculating: bool,

    pub completed_jobs: u64,

    /// Last error (if any)
    pub last_error: Option<String>,
}

impl ForecastState {
    pub fn new() -> Self {
        Self {
            prediction: None,
            last_dispatch_close: 0.0,
            is_calculating: false,
            completed_jobs: 0,
            last_error: None,
        }
    }

    /// The "Swap" operation.
    /// Promotes the worker's result (back buffer) to the front buffer.
    pub fn update_buffer(&mut self, new_prediction: Arc<PredictionSet>) {
        self.prediction = Some(new_prediction);
        self.is_calculating = false;
        self.completed_jobs += 1;
        self.last_error = None;
    }

    pub fn record_failure(&mut self, error: String) {
        self.is_calculating = false;
        self.last_error = Some(error);
    }
}

impl Default for ForecastState {
    fn default() -> Self {
        Self::new()
    }
}
