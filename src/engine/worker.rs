use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::messages::{JobRequest, JobResult};
use crate::analysis::generate_predictions;

pub fn spawn_worker_thread(rx: Receiver<JobRequest>, tx: Sender<JobResult>) -> JoinHandle<()> {
    thread::spawn(move || {
        // Ends when the engine drops its sender
        while let Ok(req) = rx.recv() {
            let start = Instant::now();

            // The heavy lifting is a pure function of the request
            let mut rng = StdRng::seed_from_u64(req.seed);
            let result = generate_predictions(&req.current, &req.history, req.horizon, &mut rng)
                .map(Arc::new)
                .map_err(|e| e.to_string());

            let reply = JobResult {
                job_id: req.job_id,
                duration_ms: start.elapsed().as_millis(),
                result,
            };

            // Receiver gone means the engine is shutting down
            if tx.send(reply).is_err() {
                break;
            }
        }
    })
}
