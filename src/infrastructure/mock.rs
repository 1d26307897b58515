use crate::domain::errors::MarketDataError;
use crate::domain::market::{Candle, Timeframe};
use crate::domain::ports::CandleSource;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory candle source for tests and offline demos.
///
/// Series are keyed by (symbol, timeframe). A missing series or a forced
/// failure surfaces as [`MarketDataError::AllSourcesFailed`], the same error a
/// real source returns when every endpoint is down.
#[derive(Clone, Default)]
pub struct InMemoryCandleSource {
    series: Arc<RwLock<HashMap<(String, Timeframe), Vec<Candle>>>>,
    failing: Arc<RwLock<Option<String>>>,
}

impl InMemoryCandleSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(symbol: &str, timeframe: Timeframe, candles: Vec<Candle>) -> Self {
        let mut series = HashMap::new();
        series.insert((symbol.to_uppercase(), timeframe), candles);
        Self {
            series: Arc::new(RwLock::new(series)),
            failing: Arc::default(),
        }
    }

    pub async fn insert(&self, symbol: &str, timeframe: Timeframe, candles: Vec<Candle>) {
        self.series
            .write()
            .await
            .insert((symbol.to_uppercase(), timeframe), candles);
    }

    /// Makes every subsequent fetch fail with `reason`
    pub async fn fail_with(&self, reason: &str) {
        *self.failing.write().await = Some(reason.to_string());
    }

    pub async fn recover(&self) {
        *self.failing.write().await = None;
    }
}

#[async_trait]
impl CandleSource for InMemoryCandleSource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>> {
        let symbol = symbol.to_uppercase();

        if let Some(reason) = self.failing.read().await.clone() {
            return Err(MarketDataError::AllSourcesFailed {
                symbol,
                attempts: vec![format!("memory: {}", reason)],
            }
            .into());
        }

        let series = self.series.read().await;
        let candles = series.get(&(symbol.clone(), timeframe)).ok_or_else(|| {
            MarketDataError::AllSourcesFailed {
                symbol: symbol.clone(),
                attempts: vec![format!("memory: no {} series loaded", timeframe)],
            }
        })?;

        let skip = candles.len().saturating_sub(limit);
        debug!(
            "InMemoryCandleSource: serving {} bars of {} ({})",
            candles.len() - skip,
            symbol,
            timeframe
        );
        Ok(candles[skip..].to_vec())
    }
}
