use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, channel};
use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::analysis::display_probability;
use crate::config::{ANALYSIS, AnalysisConfig, DEBUG_FLAGS};
use crate::data::CandleSeriesGenerator;
use crate::domain::Candle;
use crate::models::{DisplayProbabilities, PredictionSet, Series};

use super::messages::{JobRequest, JobResult};
use super::state::ForecastState;
use super::worker;

/// Drives the forecast core for one simulated session.
///
/// Owns the history, the live candle and the prediction front buffer. A single
/// worker thread regenerates the `PredictionSet`; nothing here runs on a timer,
/// the caller decides when to `tick` and `update`.
pub struct ForecastEngine {
    /// Shared immutable data
    history: Arc<Series>,
    current: Candle,

    generator: CandleSeriesGenerator,
    /// Drives live ticks and job seeds
    rng: StdRng,

    pub state: ForecastState,
    pub horizon: usize,
    pub config: AnalysisConfig,

    /// Worker Communication
    job_tx: Sender<JobRequest>,
    result_rx: Receiver<JobResult>,

    refresh_pending: bool,
    next_job_id: u64,
    errors: Vec<String>,
}

impl ForecastEngine {
    /// Spawn the worker and queue the first prediction.
    pub fn new(
        history: Series,
        current: Candle,
        generator: CandleSeriesGenerator,
        horizon: usize,
        seed: u64,
    ) -> Self {
        let (job_tx, job_rx) = channel::<JobRequest>();
        let (result_tx, result_rx) = channel::<JobResult>();

        worker::spawn_worker_thread(job_rx, result_tx);

        Self {
            history: Arc::new(history),
            current,
            generator,
            rng: StdRng::seed_from_u64(seed),
            state: ForecastState::new(),
            horizon,
            config: ANALYSIS.clone(),
            job_tx,
            result_rx,
            refresh_pending: true,
            next_job_id: 0,
            errors: Vec::new(),
        }
    }

    /// THE LOOP BODY.
    /// Returns TRUE if the engine is busy (refresh pending OR worker calculating).
    pub fn update(&mut self) -> bool {
        // 1. Process Results (Swap Buffers)
        while let Ok(result) = self.result_rx.try_recv() {
            self.handle_job_result(result);
        }

        // 2. Check Triggers (Price Movement)
        self.check_automatic_trigger();

        // 3. Dispatch
        self.process_pending();

        self.is_busy()
    }

    /// Keep calling `update` until nothing is pending or in flight.
    pub fn wait_idle(&mut self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;

        while self.update() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                bail!("Forecast worker did not finish within {:?}", timeout);
            }

            match self.result_rx.recv_timeout(remaining) {
                Ok(result) => self.handle_job_result(result),
                Err(RecvTimeoutError::Timeout) => {
                    bail!("Forecast worker did not finish within {:?}", timeout)
                }
                Err(RecvTimeoutError::Disconnected) => bail!("Forecast worker has stopped"),
            }
        }
        Ok(())
    }

    /// Advance the live candle by one simulated tick. The previous candle is
    /// replaced, not edited.
    pub fn tick(&mut self, as_of: DateTime<Utc>) -> &Candle {
        self.current = self
            .generator
            .update_candle(&self.current, as_of, &mut self.rng);
        &self.current
    }

    /// Swap in a live candle from elsewhere (e.g. an external feed).
    pub fn set_current(&mut self, candle: Candle) {
        self.current = candle;
    }

    /// New history always warrants a fresh prediction set.
    pub fn replace_history(&mut self, history: Series) {
        self.history = Arc::new(history);
        self.refresh_pending = true;
    }

    /// Force a refresh regardless of how far the price moved (e.g. user click)
    pub fn force_refresh(&mut self) {
        self.refresh_pending = true;
    }

    // --- ACCESSORS ---

    pub fn prediction(&self) -> Option<Arc<PredictionSet>> {
        self.state.prediction.clone()
    }

    pub fn current(&self) -> &Candle {
        &self.current
    }

    pub fn history(&self) -> &Series {
        &self.history
    }

    /// Headline split over the full history
    pub fn display_probabilities(&self) -> DisplayProbabilities {
        display_probability(self.history.candles())
    }

    /// Worker failures since the last call, oldest first.
    pub fn drain_errors(&mut self) -> Vec<String> {
        std::mem::take(&mut self.errors)
    }

    pub fn is_busy(&self) -> bool {
        self.refresh_pending || self.state.is_calculating
    }

    // --- INTERNAL LOGIC ---

    fn handle_job_result(&mut self, result: JobResult) {
        match result.result {
            Ok(prediction) => {
                if cfg!(debug_assertions) && DEBUG_FLAGS.print_engine_jobs {
                    log::info!(
                        "Job {} done in {} ms (bullish p={:.2})",
                        result.job_id,
                        result.duration_ms,
                        prediction.bullish.params.probability
                    );
                }
                self.state.update_buffer(prediction);
            }
            Err(e) => {
                log::error!("Forecast job {} failed: {}", result.job_id, e);
                self.state.record_failure(e.clone());
                self.errors.push(e);
            }
        }
    }

    fn check_automatic_trigger(&mut self) {
        // Don't queue if already busy or already queued
        if self.state.is_calculating || self.refresh_pending {
            return;
        }

        // The last job ran on an unusable close: retry once the live close is a real price
        let last = self.state.last_dispatch_close;
        let close = self.current.close;
        if !(last.is_finite() && last > 0.0) {
            if close.is_finite() && close > 0.0 {
                log::info!("Trigger: live close {:.2} is usable again", close);
                self.refresh_pending = true;
            }
            return;
        }

        let pct_diff = (close - last).abs() / last;
        if pct_diff >= self.config.refresh_threshold_pct {
            log::info!("Trigger: live close moved {:.4}%", pct_diff * 100.0);
            self.refresh_pending = true;
        }
    }

    fn process_pending(&mut self) {
        // Single worker: one job in flight at a time
        if !self.refresh_pending || self.state.is_calculating {
            return;
        }

        let req = JobRequest {
            job_id: self.next_job_id,
            history: Arc::clone(&self.history),
            current: self.current.clone(),
            horizon: self.horizon,
            seed: self.rng.r#gen::<u64>(),
        };
        self.next_job_id += 1;

        if cfg!(debug_assertions) && DEBUG_FLAGS.print_engine_jobs {
            log::info!(
                "Dispatching job {} at close {:.2} ({} history candles)",
                req.job_id,
                req.current.close,
                req.history.len()
            );
        }

        self.state.last_dispatch_close = req.current.close;
        match self.job_tx.send(req) {
            Ok(()) => {
                self.refresh_pending = false;
                self.state.is_calculating = true;
            }
            Err(_) => {
                // Worker is gone; leave the refresh pending so wait_idle reports it
                log::error!("Forecast worker channel closed, job not dispatched");
            }
        }
    }
}
