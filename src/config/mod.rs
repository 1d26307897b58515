//! Configuration module.
//!
//! Loads structured configuration from environment variables (after an
//! optional `.env` file), split by concern: analysis windows and candle sources.

mod analysis_config;
mod market_data_config;

pub use analysis_config::AnalysisConfig;
pub use market_data_config::MarketDataConfig;

use anyhow::{Context, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub market_data: MarketDataConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let analysis = AnalysisConfig::from_env().context("Failed to load analysis config")?;
        let market_data = MarketDataConfig::from_env();
        Ok(Self {
            analysis,
            market_data,
        })
    }
}
