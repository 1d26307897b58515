use thiserror::Error;

/// Tagged outcomes of a single analysis call.
///
/// Expected conditions (short or corrupted input) are reported here instead of
/// panicking; the caller decides how to present them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("Insufficient data for analysis: need {required} candles, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Invalid candle at index {index}: {reason}")]
    InvalidCandle { index: usize, reason: String },

    #[error("Analysis error: {reason}")]
    Computation { reason: String },
}

impl AnalysisError {
    pub fn computation(reason: impl Into<String>) -> Self {
        AnalysisError::Computation {
            reason: reason.into(),
        }
    }
}

/// Errors raised by candle sources
#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("HTTP request to {source_name} failed: {reason}")]
    Http { source_name: String, reason: String },

    #[error("Invalid market data for {symbol}: {reason}")]
    InvalidResponse { symbol: String, reason: String },

    #[error("All candle sources failed for {symbol}: {}", attempts.join("; "))]
    AllSourcesFailed {
        symbol: String,
        attempts: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_formatting() {
        let error = AnalysisError::InsufficientData {
            required: 50,
            actual: 12,
        };

        let msg = error.to_string();
        assert!(msg.contains("50"));
        assert!(msg.contains("12"));
    }

    #[test]
    fn test_invalid_candle_formatting() {
        let error = AnalysisError::InvalidCandle {
            index: 7,
            reason: "high 1 < low 2".to_string(),
        };

        assert_eq!(error.to_string(), "Invalid candle at index 7: high 1 < low 2");
    }

    #[test]
    fn test_all_sources_failed_lists_attempts() {
        let error = MarketDataError::AllSourcesFailed {
            symbol: "BTCUSDT".to_string(),
            attempts: vec!["primary: timeout".to_string(), "mirror: 503".to_string()],
        };

        let msg = error.to_string();
        assert!(msg.contains("BTCUSDT"));
        assert!(msg.contains("primary: timeout; mirror: 503"));
    }
}
