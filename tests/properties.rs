//! Property tests over the public forecasting API.
//!
//! Every random source is a seeded `StdRng`, so a failing case shrinks to a
//! seed that replays exactly.

use candle_oracle::analysis::indicators::{momentum, rsi, snapshot, trend_strength};
use candle_oracle::analysis::scenario_params::{bearish_probability, bullish_probability};
use candle_oracle::utils::time_utils::is_weekend;
use candle_oracle::{
    Candle, CandleSeriesGenerator, ScenarioParams, build_scenarios, display_probability, synthesize,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 12, 14, 0, 0).unwrap()
}

fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut prev = closes.first().copied().unwrap_or(100.0);
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = prev;
            prev = close;
            Candle::new(
                start + Duration::days(i as i64),
                open,
                open.max(close) + 0.5,
                open.min(close) - 0.5,
                close,
                1_000,
            )
        })
        .collect()
}

proptest! {
    #[test]
    fn generated_history_is_well_formed(seed in any::<u64>(), days in 0usize..400) {
        let generator = CandleSeriesGenerator::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let series = generator.historical_series(days, as_of(), &mut rng).unwrap();

        prop_assert!(series.len() <= days);
        for c in series.candles() {
            prop_assert!(c.is_well_formed(), "bad candle {:?}", c);
            prop_assert!(!is_weekend(&c.date));
            prop_assert!(!c.is_live);
        }
        for pair in series.candles().windows(2) {
            prop_assert!(pair[0].date < pair[1].date);
        }

        let live = generator.current_candle(&series, as_of(), &mut rng);
        prop_assert!(live.is_well_formed());
        prop_assert!(live.is_live);

        let ticked = generator.update_candle(&live, as_of() + Duration::seconds(2), &mut rng);
        prop_assert!(ticked.is_well_formed());
        prop_assert_eq!(ticked.open, live.open);
        prop_assert!(ticked.volume >= live.volume);
    }

    #[test]
    fn rsi_stays_in_range(closes in prop::collection::vec(1.0f64..1_000.0, 0..60), period in 1usize..30) {
        let candles = candles_from_closes(&closes);
        let value = rsi(&candles, period);
        prop_assert!((0.0..=100.0).contains(&value), "rsi {}", value);
        if candles.len() < period + 1 {
            prop_assert_eq!(value, 50.0);
        }
    }

    #[test]
    fn trend_is_neutral_below_ten_points(closes in prop::collection::vec(1.0f64..1_000.0, 0..10)) {
        prop_assert_eq!(trend_strength(&candles_from_closes(&closes)), 0.0);
    }

    #[test]
    fn momentum_is_neutral_below_five_points(closes in prop::collection::vec(1.0f64..1_000.0, 0..5)) {
        prop_assert_eq!(momentum(&candles_from_closes(&closes)), 0.0);
    }

    #[test]
    fn directional_probabilities_are_clamped(closes in prop::collection::vec(1.0f64..1_000.0, 0..60)) {
        let s = snapshot(&candles_from_closes(&closes));
        for p in [bullish_probability(&s), bearish_probability(&s)] {
            prop_assert!((0.1..=0.9).contains(&p), "probability {}", p);
        }
    }

    #[test]
    fn display_split_is_capped_and_sums_to_one(closes in prop::collection::vec(1.0f64..1_000.0, 0..60)) {
        let d = display_probability(&candles_from_closes(&closes));
        prop_assert!((0.0..=0.8).contains(&d.bullish));
        prop_assert!((0.0..=0.8).contains(&d.bearish));
        prop_assert!((d.bullish + d.bearish + d.sideways - 1.0).abs() < 1e-9);
    }

    #[test]
    fn scenarios_from_generated_history(seed in any::<u64>(), days in 1usize..120) {
        let generator = CandleSeriesGenerator::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let history = generator.historical_series(days.max(3), as_of(), &mut rng).unwrap();
        prop_assume!(!history.is_empty());
        let current = generator.current_candle(&history, as_of(), &mut rng);

        let analysis = build_scenarios(&current, &history, &mut rng).unwrap();
        let set = &analysis.scenarios;
        prop_assert!(set.bullish.target_price > current.close);
        prop_assert!(set.bearish.target_price < current.close);
        prop_assert!((0.0..=1.0).contains(&set.sideways.probability));
        prop_assert!(set.bullish.strength >= 0.3 && set.bearish.strength >= 0.3);
    }

    #[test]
    fn synthesized_paths_hold_their_shape(
        seed in any::<u64>(),
        horizon in 1usize..15,
        day_offset in 0i64..7,
        strength in 0.0f64..2.0,
        target in 50.0f64..200.0,
        confidence in 0.0f64..1.0,
        probability in 0.0f64..1.0,
    ) {
        let date = as_of() + Duration::days(day_offset);
        let current = Candle::new(date, 99.0, 101.0, 98.0, 100.0, 500_000);
        let params = ScenarioParams { probability, strength, target_price: target, confidence };
        let mut rng = StdRng::seed_from_u64(seed);

        let path = synthesize(&current, &params, horizon, &mut rng).unwrap();
        prop_assert_eq!(path.len(), horizon);

        let mut prev_date = current.date;
        let mut prev_confidence = f64::INFINITY;
        for step in &path {
            prop_assert!(step.candle.is_well_formed(), "bad candle {:?}", step.candle);
            prop_assert!(!is_weekend(&step.candle.date));
            prop_assert!(step.candle.date > prev_date);
            prop_assert!(step.confidence <= prev_confidence);
            prop_assert_eq!(step.probability, probability);
            prev_date = step.candle.date;
            prev_confidence = step.confidence;
        }
    }
}
