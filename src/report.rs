//! Session summary handed to whatever presents the forecast (here: the CLI).

use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::domain::{Candle, ScenarioKind};
use crate::models::{DisplayProbabilities, PredictionSet};
use crate::utils::time_utils::format_date;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub seed: u64,
    pub as_of: DateTime<Utc>,
    pub history_len: usize,
    pub history_first: Option<DateTime<Utc>>,
    pub history_last: Option<DateTime<Utc>>,
    pub current: Candle,
    pub ticks: usize,
    /// Prediction sets produced during the session, including the first
    pub refreshes: u64,
    pub display_probabilities: DisplayProbabilities,
    pub prediction: Option<PredictionSet>,
    pub errors: Vec<String>,
}

impl SessionReport {
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "=== candle-oracle session (seed {}) ===", self.seed)?;
        match (self.history_first, self.history_last) {
            (Some(first), Some(last)) => writeln!(
                out,
                "History: {} trading days, {} -> {}",
                self.history_len,
                format_date(&first),
                format_date(&last)
            )?,
            _ => writeln!(out, "History: empty")?,
        }

        let c = &self.current;
        writeln!(
            out,
            "Live {} after {} ticks: O {:.2} H {:.2} L {:.2} C {:.2} V {} ({:?})",
            format_date(&c.date),
            self.ticks,
            c.open,
            c.high,
            c.low,
            c.close,
            c.volume,
            c.kind()
        )?;

        let d = &self.display_probabilities;
        writeln!(
            out,
            "Headline: {} | bullish {:.1}% bearish {:.1}% sideways {:.1}%",
            d.leading().to_string().to_uppercase(),
            d.bullish * 100.0,
            d.bearish * 100.0,
            d.sideways * 100.0
        )?;

        let Some(prediction) = &self.prediction else {
            writeln!(out, "No prediction available")?;
            return self.write_errors(out);
        };

        let s = &prediction.analysis.snapshot;
        writeln!(
            out,
            "Indicators: trend {:+.4} | volatility {:.4} | momentum {:+.4} | RSI {:.1}",
            s.trend_strength, s.volatility, s.momentum, s.rsi
        )?;
        let levels = &prediction.analysis.levels;
        writeln!(
            out,
            "Resistance {:?} | Support {:?}",
            levels.resistance, levels.support
        )?;
        writeln!(out, "Refreshes: {}", self.refreshes)?;

        for kind in ScenarioKind::iter() {
            let forecast = prediction.get(kind);
            let p = &forecast.params;
            writeln!(out)?;
            writeln!(
                out,
                "[{}] p={:.2} strength={:.2} target={:.2} confidence={:.2} ({})",
                kind, p.probability, p.strength, p.target_price, p.confidence, forecast.metadata.timeframe
            )?;
            for step in &forecast.path {
                let pc = &step.candle;
                writeln!(
                    out,
                    "  {}  O {:>9.2} H {:>9.2} L {:>9.2} C {:>9.2}  conf {:.3}",
                    format_date(&pc.date),
                    pc.open,
                    pc.high,
                    pc.low,
                    pc.close,
                    step.confidence
                )?;
            }
        }

        self.write_errors(out)
    }

    fn write_errors(&self, out: &mut String) -> std::fmt::Result {
        if self.errors.is_empty() {
            return Ok(());
        }
        writeln!(out)?;
        writeln!(out, "Errors ({}):", self.errors.len())?;
        for e in &self.errors {
            writeln!(out, "  - {}", e)?;
        }
        Ok(())
    }
}
