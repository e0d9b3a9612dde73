use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::config::{DEBUG_FLAGS, GENERATOR, GeneratorSettings, PERSISTENCE};
use crate::domain::Candle;
use crate::error::{ForecastError, Result};
use crate::models::Series;
use crate::utils::maths_utils::round_to;
use crate::utils::time_utils::{format_date, is_weekend, minutes_of_day};

/// Random-walk source of daily history and the live intraday candle.
///
/// Holds only settings; every method takes the clock (`as_of`) and the random
/// source explicitly, so the same inputs always give the same candles.
#[derive(Debug, Clone, Default)]
pub struct CandleSeriesGenerator {
    pub settings: GeneratorSettings,
}

impl CandleSeriesGenerator {
    pub fn new(settings: GeneratorSettings) -> Self {
        Self { settings }
    }

    /// Daily candles for the `days` calendar days before `as_of`, weekends skipped.
    ///
    /// The cyclical bias is keyed on the calendar day index, so skipped
    /// weekends still advance the cycle.
    pub fn historical_series<R: Rng + ?Sized>(
        &self,
        days: usize,
        as_of: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Series> {
        if days > GENERATOR.max_history_days {
            return Err(ForecastError::invalid(format!(
                "history of {} days exceeds the {} day limit",
                days, GENERATOR.max_history_days
            )));
        }

        let decimals = PERSISTENCE.price_decimals;
        let base_volume = self.settings.base_volume as f64;
        let start = i64::try_from(days)
            .ok()
            .and_then(Duration::try_days)
            .and_then(|span| as_of.checked_sub_signed(span))
            .ok_or_else(|| {
                ForecastError::invalid(format!(
                    "{} days before {} is outside the supported date range",
                    days, as_of
                ))
            })?;

        let mut candles = Vec::with_capacity(days);
        let mut price = self.settings.base_price;

        for day in 0..days {
            // day < days, so this never passes as_of
            let date = start + Duration::days(day as i64);
            if is_weekend(&date) {
                continue;
            }

            let open = price;
            let trend_factor =
                (day as f64 / GENERATOR.cycle_period_days).sin() * GENERATOR.cycle_amplitude;
            let random_factor = (rng.gen_range(0.0..1.0) - 0.5) * self.settings.volatility;

            let daily_range = price * (0.01 + rng.gen_range(0.0..0.03));
            let high = open + daily_range * (0.3 + rng.gen_range(0.0..0.7));
            let low = open - daily_range * (0.3 + rng.gen_range(0.0..0.7));

            let close = open + open * (trend_factor + random_factor);

            // Wicks must still contain the body after the random walk
            let high = high.max(open).max(close);
            let low = low.min(open).min(close);

            // Bigger moves trade more
            let price_change = (close - open).abs() / open;
            let volume_multiplier = 0.8 + price_change * 10.0 + rng.gen_range(0.0..0.4);
            let volume = (base_volume * volume_multiplier).floor() as u64;

            candles.push(Candle::new(
                date,
                round_to(open, decimals),
                round_to(high, decimals),
                round_to(low, decimals),
                round_to(close, decimals),
                volume,
            ));

            price = close;
        }

        let series = Series::new(candles)?;

        if cfg!(debug_assertions) && DEBUG_FLAGS.print_generator_summary {
            if let (Some(first), Some(last)) = (series.candles().first(), series.last()) {
                log::info!(
                    "Generated {} trading days {} -> {} (close {:.2} -> {:.2})",
                    series.len(),
                    format_date(&first.date),
                    format_date(&last.date),
                    first.close,
                    last.close
                );
            }
        }

        Ok(series)
    }

    /// The still-forming candle for `as_of`, opening at the last historical close.
    pub fn current_candle<R: Rng + ?Sized>(
        &self,
        history: &Series,
        as_of: DateTime<Utc>,
        rng: &mut R,
    ) -> Candle {
        let decimals = PERSISTENCE.price_decimals;
        let intraday = &GENERATOR.intraday;

        let open = history
            .last()
            .map(|c| c.close)
            .unwrap_or(self.settings.base_price);

        // Share of the session elapsed, drives how much volume has printed so far
        let time_progress = (minutes_of_day(&as_of) as f64 / intraday.session_minutes).min(1.0);

        let movement = (rng.gen_range(0.0..1.0) - 0.5) * intraday.volatility;
        let current = open + open * movement;

        let day_range = open * (0.005 + rng.gen_range(0.0..0.02));
        let high = open.max(current) + day_range * rng.gen_range(0.0..1.0);
        let low = open.min(current) - day_range * rng.gen_range(0.0..1.0);

        let volume = (self.settings.base_volume as f64
            * (0.3 + time_progress * 0.7)
            * (0.8 + rng.gen_range(0.0..0.4)))
        .floor() as u64;

        Candle {
            date: as_of,
            open: round_to(open, decimals),
            high: round_to(high, decimals),
            low: round_to(low, decimals),
            close: round_to(current, decimals),
            volume,
            is_live: true,
        }
    }

    /// A fresh live candle one tick after `prev`: close nudged, wicks widened to
    /// contain it, volume grown. `prev` itself is left as it was.
    pub fn update_candle<R: Rng + ?Sized>(
        &self,
        prev: &Candle,
        as_of: DateTime<Utc>,
        rng: &mut R,
    ) -> Candle {
        let decimals = PERSISTENCE.price_decimals;
        let intraday = &GENERATOR.intraday;

        let change = (rng.gen_range(0.0..1.0) - 0.5) * intraday.tick_volatility;
        let close = round_to(prev.close * (1.0 + change), decimals);
        let extra_volume = (self.settings.base_volume as f64
            * rng.gen_range(0.0..intraday.tick_volume_pct))
        .floor() as u64;

        Candle {
            date: as_of.max(prev.date),
            open: prev.open,
            high: prev.high.max(close),
            low: prev.low.min(close),
            close,
            volume: prev.volume.saturating_add(extra_volume),
            is_live: true,
        }
    }
}
