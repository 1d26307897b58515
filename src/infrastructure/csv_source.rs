//! Offline candle source reading OHLCV rows from a CSV file.
//!
//! Expected header: `timestamp,open,high,low,close,volume`. Symbol and
//! timeframe are not stored in the file; one file holds one series.

use crate::domain::errors::MarketDataError;
use crate::domain::market::{Candle, Timeframe};
use crate::domain::ports::CandleSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct CsvRow {
    timestamp: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

impl From<CsvRow> for Candle {
    fn from(row: CsvRow) -> Self {
        Candle::new(row.timestamp, row.open, row.high, row.low, row.close, row.volume)
    }
}

pub struct CsvCandleSource {
    path: PathBuf,
}

impl CsvCandleSource {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

/// Reads every row of a candle CSV. A row that fails to deserialize is an
/// error naming its 1-based data line.
pub fn read_candles<R: Read>(reader: R) -> Result<Vec<Candle>, MarketDataError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    csv_reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(i, row)| {
            row.map(Candle::from)
                .map_err(|e| MarketDataError::InvalidResponse {
                    symbol: "csv".to_string(),
                    reason: format!("row {}: {}", i + 1, e),
                })
        })
        .collect()
}

#[async_trait]
impl CandleSource for CsvCandleSource {
    fn name(&self) -> &str {
        "csv"
    }

    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>> {
        let path = self.path.clone();
        let candles = tokio::task::spawn_blocking(move || -> Result<Vec<Candle>> {
            let file = std::fs::File::open(&path)
                .with_context(|| format!("Failed to open candle file {}", path.display()))?;
            Ok(read_candles(file)?)
        })
        .await
        .context("CSV reader task panicked")??;

        let skip = candles.len().saturating_sub(limit);
        debug!(
            "CsvCandleSource: {} rows in {}, keeping last {}",
            candles.len(),
            self.path.display(),
            candles.len() - skip
        );
        info!(
            "CsvCandleSource: Loaded {} ({}) from {}",
            symbol,
            timeframe,
            self.path.display()
        );

        Ok(candles.into_iter().skip(skip).collect())
    }
}
