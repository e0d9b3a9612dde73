use chrono::{DateTime, Utc};
use rand::Rng;

use crate::analysis::scenario_params::validate_close;
use crate::config::{ANALYSIS, GENERATOR, PERSISTENCE};
use crate::domain::Candle;
use crate::error::{ForecastError, Result};
use crate::models::{PredictionCandle, ScenarioParams};
use crate::utils::maths_utils::round_to;
use crate::utils::time_utils::{add_days, roll_to_weekday};

/// Project `horizon` trading-day candles from `current` towards `params.target_price`.
///
/// Step `i` closes at `current.close + (target - current.close) * i/horizon`
/// plus noise proportional to `strength`. Wicks extend outward from the body so
/// every candle satisfies the OHLC invariant. Confidence decays linearly to
/// `1 - confidence_decay` of its base at the last step; probability is constant.
pub fn synthesize<R: Rng + ?Sized>(
    current: &Candle,
    params: &ScenarioParams,
    horizon: usize,
    rng: &mut R,
) -> Result<Vec<PredictionCandle>> {
    if horizon == 0 {
        return Err(ForecastError::invalid("prediction horizon must be at least 1"));
    }
    if horizon > ANALYSIS.path.max_horizon {
        return Err(ForecastError::invalid(format!(
            "prediction horizon {} exceeds the limit of {}",
            horizon, ANALYSIS.path.max_horizon
        )));
    }
    validate_close(current)?;
    if !params.target_price.is_finite() || !params.strength.is_finite() {
        return Err(ForecastError::invalid(format!(
            "scenario parameters must be finite: {:?}",
            params
        )));
    }

    let cfg = &ANALYSIS.path;
    let decimals = PERSISTENCE.price_decimals;
    let base_volume = GENERATOR.defaults.base_volume as f64;
    let start_close = current.close;

    let mut path = Vec::with_capacity(horizon);
    let mut price = start_close;
    let mut prev_date = current.date;

    for step in 1..=horizon {
        let date = next_trading_date(current.date, step, prev_date)?;
        let progress = step as f64 / horizon as f64;

        let target_movement = (params.target_price - start_close) * progress;
        let noise = rng.gen_range(-0.5..0.5) * price * cfg.noise_scale * params.strength;

        let open = price;
        let close = start_close + target_movement + noise;

        let daily_range =
            price * (cfg.range_base + rng.gen_range(0.0..cfg.range_jitter)) * params.strength.abs();
        let high = open.max(close) + daily_range * rng.gen_range(0.0..1.0);
        let low = open.min(close) - daily_range * rng.gen_range(0.0..1.0);
        let volume = (base_volume * (0.7 + rng.gen_range(0.0..0.6))).floor() as u64;

        let candle = Candle::new(
            date,
            round_to(open, decimals),
            round_to(high, decimals),
            round_to(low, decimals),
            round_to(close, decimals),
            volume,
        );

        path.push(PredictionCandle {
            candle,
            confidence: params.confidence * (1.0 - progress * cfg.confidence_decay),
            probability: params.probability,
        });

        price = close;
        prev_date = date;
    }

    Ok(path)
}

/// `origin + step days`, rolled past weekends and kept strictly after `prev`
/// (a Friday origin would otherwise map both Saturday and Sunday onto Monday).
fn next_trading_date(
    origin: DateTime<Utc>,
    step: usize,
    prev: DateTime<Utc>,
) -> Result<DateTime<Utc>> {
    let candidate = add_days(origin, step).and_then(roll_to_weekday);
    let date = match candidate {
        Some(date) if date > prev => Some(date),
        _ => add_days(prev, 1).and_then(roll_to_weekday),
    };
    date.ok_or_else(|| {
        ForecastError::invalid(format!(
            "step {} after {} is outside the supported date range",
            step, origin
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time_utils::is_weekend;
    use chrono::{Datelike, TimeZone, Weekday};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn live_candle(date: DateTime<Utc>) -> Candle {
        let mut c = Candle::new(date, 99.0, 101.0, 98.5, 100.0, 500_000);
        c.is_live = true;
        c
    }

    fn params() -> ScenarioParams {
        ScenarioParams {
            probability: 0.62,
            strength: 0.4,
            target_price: 104.0,
            confidence: 0.8,
        }
    }

    #[test]
    fn test_path_shape() {
        // 2024-06-07 is a Friday
        let friday = Utc.with_ymd_and_hms(2024, 6, 7, 15, 0, 0).unwrap();
        let current = live_candle(friday);
        let path = synthesize(&current, &params(), 5, &mut StdRng::seed_from_u64(3)).unwrap();

        assert_eq!(path.len(), 5);
        assert_eq!(path[0].candle.date.weekday(), Weekday::Mon);
        assert!(path.iter().all(|p| !is_weekend(&p.candle.date)));
        assert!(path[0].candle.date > current.date);
        assert!(path.windows(2).all(|w| w[0].candle.date < w[1].candle.date));
        assert!(path.iter().all(|p| p.candle.is_well_formed() && !p.candle.is_live));
        assert!(path.iter().all(|p| p.probability == 0.62));
    }

    #[test]
    fn test_confidence_decay() {
        let current = live_candle(Utc.with_ymd_and_hms(2024, 6, 4, 10, 0, 0).unwrap());
        let path = synthesize(&current, &params(), 5, &mut StdRng::seed_from_u64(9)).unwrap();
        assert!(path.windows(2).all(|w| w[1].confidence < w[0].confidence));
        // Last step sits at 70% of base
        assert!((path[4].confidence - 0.8 * 0.7).abs() < 1e-12);
        assert!((path[0].confidence - 0.8 * (1.0 - 0.2 * 0.3)).abs() < 1e-12);
    }

    #[test]
    fn test_path_converges_on_target() {
        let current = live_candle(Utc.with_ymd_and_hms(2024, 6, 4, 10, 0, 0).unwrap());
        let path = synthesize(&current, &params(), 5, &mut StdRng::seed_from_u64(11)).unwrap();
        let last = &path[4].candle;
        // Noise is at most 0.5% of price * strength
        assert!((last.close - 104.0).abs() < 104.0 * 0.005 * 0.4 + 0.01);
        // Opens chain onto the previous close
        assert_eq!(path[0].candle.open, 100.0);
        for w in path.windows(2) {
            assert_eq!(w[1].candle.open, w[0].candle.close);
        }
    }

    #[test]
    fn test_seeded_replay() {
        let current = live_candle(Utc.with_ymd_and_hms(2024, 6, 4, 10, 0, 0).unwrap());
        let a = synthesize(&current, &params(), 5, &mut StdRng::seed_from_u64(5)).unwrap();
        let b = synthesize(&current, &params(), 5, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_input() {
        let current = live_candle(Utc.with_ymd_and_hms(2024, 6, 4, 10, 0, 0).unwrap());
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            synthesize(&current, &params(), 0, &mut rng),
            Err(ForecastError::InvalidInput(_))
        ));

        let mut bad = params();
        bad.target_price = f64::NAN;
        assert!(synthesize(&current, &bad, 5, &mut rng).is_err());
    }

    #[test]
    fn test_out_of_range_dates_are_errors() {
        let mut rng = StdRng::seed_from_u64(0);
        let current = live_candle(Utc.with_ymd_and_hms(2024, 6, 4, 10, 0, 0).unwrap());
        assert!(matches!(
            synthesize(&current, &params(), usize::MAX, &mut rng),
            Err(ForecastError::InvalidInput(_))
        ));

        let at_the_end = live_candle(DateTime::<Utc>::MAX_UTC - chrono::Duration::days(2));
        assert!(matches!(
            synthesize(&at_the_end, &params(), 5, &mut rng),
            Err(ForecastError::InvalidInput(_))
        ));
    }
}
