use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Define the CandleType enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandleType {
    Bullish,
    Bearish,
}

/// One OHLCV observation for a trading day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub date: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    /// Set only on the intraday candle that is still forming
    #[serde(default)]
    pub is_live: bool,
}

// Implement methods for the Candle struct
impl Candle {
    // A constructor for convenience (closed candle)
    pub fn new(date: DateTime<Utc>, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Candle {
            date,
            open,
            high,
            low,
            close,
            volume,
            is_live: false,
        }
    }

    // Strictly greater: a doji counts as bearish
    pub fn kind(&self) -> CandleType {
        if self.close > self.open {
            CandleType::Bullish
        } else {
            CandleType::Bearish
        }
    }

    // Returns the low and high of the candle body as a tuple
    pub fn body_range(&self) -> (f64, f64) {
        (self.open.min(self.close), self.open.max(self.close))
    }

    /// `low <= min(open, close) <= max(open, close) <= high`, all finite.
    pub fn is_well_formed(&self) -> bool {
        let (body_low, body_high) = self.body_range();
        [self.open, self.high, self.low, self.close]
            .iter()
            .all(|p| p.is_finite())
            && self.low <= body_low
            && body_high <= self.high
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_kind_is_strict() {
        assert_eq!(Candle::new(at(3), 10.0, 12.0, 9.0, 11.0, 1).kind(), CandleType::Bullish);
        assert_eq!(Candle::new(at(3), 10.0, 12.0, 9.0, 9.5, 1).kind(), CandleType::Bearish);
        assert_eq!(Candle::new(at(3), 10.0, 12.0, 9.0, 10.0, 1).kind(), CandleType::Bearish);
    }

    #[test]
    fn test_well_formed() {
        assert!(Candle::new(at(3), 10.0, 12.0, 9.0, 11.0, 1).is_well_formed());
        // High below the close
        assert!(!Candle::new(at(3), 10.0, 10.5, 9.0, 11.0, 1).is_well_formed());
        // Low above the open
        assert!(!Candle::new(at(3), 10.0, 12.0, 10.2, 11.0, 1).is_well_formed());
        assert!(!Candle::new(at(3), f64::NAN, 12.0, 9.0, 11.0, 1).is_well_formed());
    }
}
