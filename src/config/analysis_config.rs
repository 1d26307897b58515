//! Analysis window and threshold configuration.
//!
//! The defaults are the calibrated values the signal rules were built around;
//! changing them changes signal semantics, so overrides are validated.

use anyhow::{Result, bail};
use std::env;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Shortest candle history accepted by the indicator engine
    pub min_candles: usize,
    pub support_resistance_window: usize,
    pub liquidity_window: usize,
    pub rsi_period: usize,
    pub ema_fast_period: usize,
    pub ema_slow_period: usize,
    pub macd_fast_period: usize,
    pub macd_slow_period: usize,
    pub macd_signal_period: usize,
    /// Body/range ratio below which a bar is a doji
    pub doji_body_ratio: f64,
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
    /// Distance (percent) under which price counts as near a level
    pub proximity_pct: f64,
    /// Lead one side needs over the other before the bias leaves neutral
    pub bias_margin: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_candles: 50,
            support_resistance_window: 10,
            liquidity_window: 20,
            rsi_period: 14,
            ema_fast_period: 20,
            ema_slow_period: 50,
            macd_fast_period: 12,
            macd_slow_period: 26,
            macd_signal_period: 9,
            doji_body_ratio: 0.1,
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
            proximity_pct: 2.0,
            bias_margin: 2,
        }
    }
}

impl AnalysisConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            min_candles: parse_env("ANALYSIS_MIN_CANDLES", defaults.min_candles),
            rsi_period: parse_env("ANALYSIS_RSI_PERIOD", defaults.rsi_period),
            ema_fast_period: parse_env("ANALYSIS_EMA_FAST", defaults.ema_fast_period),
            ema_slow_period: parse_env("ANALYSIS_EMA_SLOW", defaults.ema_slow_period),
            proximity_pct: parse_env("ANALYSIS_PROXIMITY_PCT", defaults.proximity_pct),
            ..defaults
        };
        config.validate()?;
        Ok(config)
    }

    /// Longest history any indicator needs before its last value is defined.
    pub fn longest_window(&self) -> usize {
        [
            self.support_resistance_window,
            self.liquidity_window,
            self.rsi_period + 1,
            self.ema_fast_period,
            self.ema_slow_period,
            self.macd_slow_period + self.macd_signal_period - 1,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }

    pub fn validate(&self) -> Result<()> {
        let periods = [
            ("support_resistance_window", self.support_resistance_window),
            ("liquidity_window", self.liquidity_window),
            ("rsi_period", self.rsi_period),
            ("ema_fast_period", self.ema_fast_period),
            ("ema_slow_period", self.ema_slow_period),
            ("macd_fast_period", self.macd_fast_period),
            ("macd_slow_period", self.macd_slow_period),
            ("macd_signal_period", self.macd_signal_period),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, p)| *p == 0) {
            bail!("Invalid analysis config: {} must be > 0", name);
        }
        if self.ema_fast_period >= self.ema_slow_period {
            bail!(
                "Invalid analysis config: EMA fast period {} must be below slow period {}",
                self.ema_fast_period,
                self.ema_slow_period
            );
        }
        if self.macd_fast_period >= self.macd_slow_period {
            bail!(
                "Invalid analysis config: MACD fast period {} must be below slow period {}",
                self.macd_fast_period,
                self.macd_slow_period
            );
        }
        if self.min_candles < self.longest_window() {
            bail!(
                "Invalid analysis config: min_candles {} is shorter than the longest indicator window {}",
                self.min_candles,
                self.longest_window()
            );
        }
        if self.rsi_oversold >= self.rsi_overbought {
            bail!("Invalid analysis config: RSI oversold level must be below overbought level");
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
