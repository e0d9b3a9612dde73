use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use strum::IntoEnumIterator;

use crate::analysis::path_synthesis::synthesize;
use crate::analysis::scenario_params::build_scenarios;
use crate::domain::{Candle, ScenarioKind};
use crate::error::{ForecastError, Result};
use crate::models::{PredictionMetadata, PredictionSet, ScenarioForecast, Series};

/// Build scenarios for `current` and project all three paths.
///
/// The caller's `rng` drives the scenario parameters and then hands each
/// scenario its own seed (bullish, bearish, sideways order), so the paths can
/// be synthesized in parallel and still replay exactly for a seeded caller.
pub fn generate_predictions<R: Rng + ?Sized>(
    current: &Candle,
    history: &Series,
    horizon: usize,
    rng: &mut R,
) -> Result<PredictionSet> {
    let analysis = build_scenarios(current, history, rng)?;

    let jobs: Vec<(ScenarioKind, u64)> = ScenarioKind::iter()
        .map(|kind| (kind, rng.r#gen::<u64>()))
        .collect();

    let mut forecasts = jobs
        .into_par_iter()
        .map(|(kind, seed)| -> Result<ScenarioForecast> {
            let params = *analysis.scenarios.get(kind);
            let mut scenario_rng = StdRng::seed_from_u64(seed);
            let path = synthesize(current, &params, horizon, &mut scenario_rng)?;
            Ok(ScenarioForecast {
                kind,
                params,
                path,
                metadata: PredictionMetadata::new(params.confidence, horizon),
            })
        })
        .collect::<Result<Vec<ScenarioForecast>>>()?
        .into_iter();

    // Order is preserved by the indexed collect
    let (Some(bullish), Some(bearish), Some(sideways)) =
        (forecasts.next(), forecasts.next(), forecasts.next())
    else {
        return Err(ForecastError::invalid("scenario fan-out lost a forecast"));
    };

    Ok(PredictionSet {
        generated_from: current.date,
        analysis,
        bullish,
        bearish,
        sideways,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::indicators::tests::series_from_closes;

    fn setup() -> (Candle, Series) {
        let closes: Vec<f64> = (0..30).map(|i| 120.0 + (i as f64 / 3.0).cos() * 4.0).collect();
        let history = Series::new(series_from_closes(&closes)).unwrap();
        let mut current = history.last().unwrap().clone();
        current.date += chrono::Duration::days(1);
        current.is_live = true;
        (current, history)
    }

    #[test]
    fn test_generate_predictions() {
        let (current, history) = setup();
        let set = generate_predictions(&current, &history, 5, &mut StdRng::seed_from_u64(21)).unwrap();

        assert_eq!(set.horizon(), 5);
        for kind in ScenarioKind::iter() {
            let forecast = set.get(kind);
            assert_eq!(forecast.kind, kind);
            assert_eq!(forecast.path.len(), 5);
            assert_eq!(forecast.params, *set.analysis.scenarios.get(kind));
            assert_eq!(forecast.metadata.algorithm, "AI-Enhanced Technical Analysis");
            assert_eq!(forecast.metadata.timeframe, "5-day outlook");
            assert_eq!(forecast.metadata.factors.len(), 4);
            assert!(forecast.path.iter().all(|p| p.probability == forecast.params.probability));
        }
        assert_eq!(set.generated_from, current.date);
        // Bullish ends above bearish: targets are at least 5% apart
        assert!(set.bullish.path[4].candle.close > set.bearish.path[4].candle.close);
    }

    #[test]
    fn test_deterministic_with_seed() {
        let (current, history) = setup();
        let a = generate_predictions(&current, &history, 5, &mut StdRng::seed_from_u64(8)).unwrap();
        let b = generate_predictions(&current, &history, 5, &mut StdRng::seed_from_u64(8)).unwrap();
        assert_eq!(a, b);
        let c = generate_predictions(&current, &history, 5, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_errors_propagate() {
        let (current, history) = setup();
        assert!(generate_predictions(&current, &history, 0, &mut StdRng::seed_from_u64(1)).is_err());
        assert!(
            generate_predictions(&current, &Series::default(), 5, &mut StdRng::seed_from_u64(1))
                .is_err()
        );
    }
}
