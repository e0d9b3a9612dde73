use serde::{Deserialize, Serialize};

use crate::domain::Candle;
use crate::error::{ForecastError, Result};

// ============================================================================
// Series: ordered, validated run of daily candles
// ============================================================================

/// Ordered candles with strictly increasing dates.
///
/// Construction validates ordering and the OHLC invariant of every candle, so
/// analysis code can take `&Series` (or `&[Candle]`) without re-checking.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(try_from = "Vec<Candle>", into = "Vec<Candle>")]
pub struct Series {
    candles: Vec<Candle>,
}

impl Series {
    pub fn new(candles: Vec<Candle>) -> Result<Self> {
        if let Some(idx) = candles.iter().position(|c| !c.is_well_formed()) {
            return Err(ForecastError::invalid(format!(
                "candle {} violates low <= open/close <= high: {:?}",
                idx, candles[idx]
            )));
        }

        if let Some(idx) = candles
            .windows(2)
            .position(|pair| pair[1].date <= pair[0].date)
        {
            return Err(ForecastError::invalid(format!(
                "candle dates must strictly increase: {} is not after {}",
                candles[idx + 1].date, candles[idx].date
            )));
        }

        Ok(Self { candles })
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// The most recent `n` candles (or all of them if there are fewer).
    pub fn tail(&self, n: usize) -> &[Candle] {
        let start = self.candles.len().saturating_sub(n);
        &self.candles[start..]
    }
}

impl TryFrom<Vec<Candle>> for Series {
    type Error = ForecastError;

    fn try_from(candles: Vec<Candle>) -> Result<Self> {
        Series::new(candles)
    }
}

impl From<Series> for Vec<Candle> {
    fn from(series: Series) -> Self {
        series.candles
    }
}
