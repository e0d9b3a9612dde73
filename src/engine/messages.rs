use std::sync::Arc;

use crate::domain::Candle;
use crate::models::{PredictionSet, Series};

/// A request to regenerate the prediction set for the current live candle
#[derive(Debug, Clone)]
pub struct JobRequest {
    pub job_id: u64,
    // Shared immutable history, cloned by pointer only
    pub history: Arc<Series>,
    pub current: Candle,
    pub horizon: usize,
    /// Seeds the worker's StdRng so a job replays exactly
    pub seed: u64,
}

/// The result returned by the worker
#[derive(Debug, Clone)]
pub struct JobResult {
    pub job_id: u64,
    pub duration_ms: u128,

    // Success: The new Front Buffer
    // Failure: The error string
    pub result: Result<Arc<PredictionSet>, String>,
}
