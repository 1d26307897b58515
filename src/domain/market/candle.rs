use serde::{Deserialize, Serialize};

/// One OHLCV bar of a single instrument.
///
/// Integrity (finite values, `low <= open/close <= high`, ascending
/// timestamps) is checked by
/// [`CandleValidator`](crate::domain::validation::data_quality::CandleValidator)
/// before any indicator reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Open time in unix milliseconds
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// High-low range of the bar
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Absolute open-close distance
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }
}
