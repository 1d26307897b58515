use crate::domain::market::{Candle, Timeframe};
use anyhow::Result;
use async_trait::async_trait;

/// Anything that can supply an ordered candle history for one instrument.
///
/// Retry and fallback policy belong to the implementation; analysis code only
/// sees the returned sequence.
#[async_trait]
pub trait CandleSource: Send + Sync {
    fn name(&self) -> &str;

    /// Returns up to `limit` most recent candles, oldest first.
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>>;
}
