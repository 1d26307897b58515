use crate::domain::errors::AnalysisError;
use crate::domain::market::Candle;
use tracing::warn;

/// Centralized validator for candle integrity.
///
/// Rejects bars that are physically impossible (non-finite or negative values,
/// a body outside the wick range) and sequences that are not strictly ordered
/// by time. A single bad bar rejects the whole sequence.
pub struct CandleValidator;

impl CandleValidator {
    /// Validates a single candle, returning the defect on failure.
    pub fn validate_candle(candle: &Candle) -> Result<(), String> {
        let fields = [
            ("open", candle.open),
            ("high", candle.high),
            ("low", candle.low),
            ("close", candle.close),
            ("volume", candle.volume),
        ];

        for (name, value) in fields {
            if !value.is_finite() {
                return Err(format!("{} is not finite ({})", name, value));
            }
            if value < 0.0 {
                return Err(format!("{} is negative ({})", name, value));
            }
        }

        if candle.high < candle.low {
            return Err(format!("high {} < low {}", candle.high, candle.low));
        }

        if candle.high < candle.open.max(candle.close) {
            return Err(format!(
                "high {} below body (open {}, close {})",
                candle.high, candle.open, candle.close
            ));
        }

        if candle.low > candle.open.min(candle.close) {
            return Err(format!(
                "low {} above body (open {}, close {})",
                candle.low, candle.open, candle.close
            ));
        }

        Ok(())
    }

    /// Validates every candle and the ascending timestamp order.
    pub fn validate_series(candles: &[Candle]) -> Result<(), AnalysisError> {
        let mut previous_ts: Option<i64> = None;

        for (index, candle) in candles.iter().enumerate() {
            if let Err(reason) = Self::validate_candle(candle) {
                warn!("Validation FAILED: candle {} rejected: {}", index, reason);
                return Err(AnalysisError::InvalidCandle { index, reason });
            }

            if let Some(prev) = previous_ts
                && candle.timestamp <= prev
            {
                let reason = format!(
                    "timestamp {} does not follow previous {}",
                    candle.timestamp, prev
                );
                warn!("Validation FAILED: candle {} rejected: {}", index, reason);
                return Err(AnalysisError::InvalidCandle { index, reason });
            }
            previous_ts = Some(candle.timestamp);
        }

        Ok(())
    }
}
