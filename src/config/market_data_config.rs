//! Candle source configuration parsed from environment variables.

use crate::domain::market::Timeframe;
use crate::domain::market::symbol::DEFAULT_SYMBOL;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct MarketDataConfig {
    pub binance_base_url: String,
    /// Public market-data mirror used when the primary endpoint fails
    pub binance_mirror_url: String,
    pub binance_api_key: Option<String>,
    pub default_symbol: String,
    pub default_timeframe: Timeframe,
    pub candle_limit: usize,
    pub max_retries: u32,
    pub request_timeout: Duration,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            binance_base_url: "https://api.binance.com".to_string(),
            binance_mirror_url: "https://data-api.binance.vision".to_string(),
            binance_api_key: None,
            default_symbol: DEFAULT_SYMBOL.to_string(),
            default_timeframe: Timeframe::OneHour,
            candle_limit: 100,
            max_retries: 3,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl MarketDataConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            binance_base_url: env::var("BINANCE_BASE_URL").unwrap_or(defaults.binance_base_url),
            binance_mirror_url: env::var("BINANCE_MIRROR_URL")
                .unwrap_or(defaults.binance_mirror_url),
            binance_api_key: env::var("BINANCE_API_KEY").ok().filter(|k| !k.is_empty()),
            default_symbol: env::var("DEFAULT_SYMBOL").unwrap_or(defaults.default_symbol),
            default_timeframe: env::var("DEFAULT_TIMEFRAME")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_timeframe),
            candle_limit: env::var("CANDLE_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.candle_limit),
            max_retries: env::var("HTTP_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_retries),
            request_timeout: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_data_defaults() {
        let config = MarketDataConfig::default();
        assert_eq!(config.default_symbol, "BTCUSDT");
        assert_eq!(config.default_timeframe, Timeframe::OneHour);
        assert_eq!(config.candle_limit, 100);
        assert!(config.binance_api_key.is_none());
    }
}
