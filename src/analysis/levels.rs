use itertools::Itertools;

use crate::domain::Candle;
use crate::models::SupportResistance;

/// The `n` highest highs (resistance, descending) and the `n` lowest lows
/// (support, ascending) across the whole series.
///
/// Near-equal and equal values are NOT merged; each candle contributes its own
/// entry. Sorting happens on copies, the input is untouched.
pub fn levels(series: &[Candle], n: usize) -> SupportResistance {
    let resistance = series
        .iter()
        .map(|c| c.high)
        .sorted_by(|a, b| b.total_cmp(a))
        .take(n)
        .collect();

    let support = series
        .iter()
        .map(|c| c.low)
        .sorted_by(|a, b| a.total_cmp(b))
        .take(n)
        .collect();

    SupportResistance {
        resistance,
        support,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::indicators::tests::series_from_closes;

    #[test]
    fn test_levels_sorted_and_truncated() {
        let series = series_from_closes(&[10.0, 14.0, 12.0, 18.0, 11.0, 16.0]);
        let sr = levels(&series, 3);
        assert_eq!(sr.resistance.len(), 3);
        assert_eq!(sr.support.len(), 3);
        assert!(sr.resistance.windows(2).all(|w| w[0] >= w[1]));
        assert!(sr.support.windows(2).all(|w| w[0] <= w[1]));
        // Highest high is the 14 -> 18 candle, lowest low the first 10 -> 10 candle
        assert_eq!(sr.resistance[0], 18.5);
        assert_eq!(sr.support[0], 9.5);
    }

    #[test]
    fn test_ties_are_kept() {
        let series = series_from_closes(&[10.0; 5]);
        let sr = levels(&series, 3);
        assert_eq!(sr.resistance, vec![10.5, 10.5, 10.5]);
        assert_eq!(sr.support, vec![9.5, 9.5, 9.5]);
    }

    #[test]
    fn test_short_series_and_input_untouched() {
        let series = series_from_closes(&[12.0, 10.0]);
        let before = series.clone();
        let sr = levels(&series, 3);
        assert_eq!(sr.resistance.len(), 2);
        assert_eq!(sr.support.len(), 2);
        assert_eq!(series, before);
        assert_eq!(levels(&[], 3), SupportResistance::default());
    }
}
