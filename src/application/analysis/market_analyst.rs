use super::report_builder::ReportBuilder;
use crate::application::market_data::indicator_engine::IndicatorEngine;
use crate::application::market_data::signal_generator::SignalGenerator;
use crate::config::AnalysisConfig;
use crate::domain::analysis::{AnalysisResult, TrendClass};
use crate::domain::errors::AnalysisError;
use crate::domain::market::{Candle, Timeframe};
use crate::domain::ports::CandleSource;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

/// Runs the full pipeline: candle source -> indicator engine -> signal
/// generator -> report builder.
///
/// Holds no per-call state, so one analyst can serve concurrent requests.
pub struct MarketAnalyst {
    source: Arc<dyn CandleSource>,
    engine: IndicatorEngine,
    signals: SignalGenerator,
    candle_limit: usize,
}

impl MarketAnalyst {
    pub fn new(source: Arc<dyn CandleSource>, config: AnalysisConfig, candle_limit: usize) -> Self {
        Self {
            source,
            signals: SignalGenerator::new(&config),
            engine: IndicatorEngine::new(config),
            candle_limit,
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Pure entry point: analyses an already fetched sequence.
    pub fn analyze_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        candles: &[Candle],
        as_of: DateTime<Utc>,
    ) -> Result<AnalysisResult, AnalysisError> {
        let rows = self.engine.compute(candles)?;
        let last = rows
            .len()
            .checked_sub(1)
            .ok_or_else(|| AnalysisError::computation("indicator engine returned no rows"))?;
        let synthesis = self.signals.synthesize(&rows, last)?;
        ReportBuilder::build(symbol, timeframe, &rows, synthesis, as_of)
    }

    /// Fetches the latest candles for `symbol` and analyses them.
    pub async fn analyze(&self, symbol: &str, timeframe: Timeframe) -> Result<AnalysisResult> {
        info!(
            "MarketAnalyst: Performing analysis for {} ({}) via {}",
            symbol,
            timeframe,
            self.source.name()
        );

        let candles = self
            .source
            .fetch_candles(symbol, timeframe, self.candle_limit)
            .await
            .with_context(|| format!("Failed to fetch candles for {} ({})", symbol, timeframe))?;

        let result = self.analyze_candles(symbol, timeframe, &candles, Utc::now())?;

        info!(
            "MarketAnalyst: {} ({}) -> {} | {} signals | bias {}",
            symbol,
            timeframe,
            result.trend,
            result.signals.len(),
            result.bias.direction
        );
        Ok(result)
    }

    /// Analyses `symbol` on every confluence timeframe concurrently. A failing
    /// timeframe is reported in place and does not abort the others.
    pub async fn analyze_multi(&self, symbol: &str) -> MultiTimeframeReport {
        let outcomes = join_all(Timeframe::confluence_set().into_iter().map(|timeframe| async move {
            let outcome = self.analyze(symbol, timeframe).await;
            if let Err(e) = &outcome {
                warn!("MarketAnalyst: {} analysis failed for {}: {:#}", timeframe, symbol, e);
            }
            TimeframeOutcome { timeframe, outcome }
        }))
        .await;

        MultiTimeframeReport::new(symbol, outcomes)
    }
}

pub struct TimeframeOutcome {
    pub timeframe: Timeframe,
    pub outcome: Result<AnalysisResult>,
}

/// Agreement of trends across timeframes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confluence {
    /// Every analysed timeframe shows the same directional trend
    Aligned(TrendClass),
    Mixed,
    /// No timeframe could be analysed
    Unavailable,
}

pub struct MultiTimeframeReport {
    pub symbol: String,
    /// Primary timeframe first
    pub outcomes: Vec<TimeframeOutcome>,
    pub confluence: Confluence,
}

impl MultiTimeframeReport {
    pub fn new(symbol: &str, outcomes: Vec<TimeframeOutcome>) -> Self {
        let trends: Vec<TrendClass> = outcomes
            .iter()
            .filter_map(|o| o.outcome.as_ref().ok().map(|r| r.trend))
            .collect();

        Self {
            symbol: symbol.to_string(),
            confluence: confluence_of(&trends),
            outcomes,
        }
    }

    pub fn primary(&self) -> Option<&AnalysisResult> {
        self.outcomes.first().and_then(|o| o.outcome.as_ref().ok())
    }
}

fn confluence_of(trends: &[TrendClass]) -> Confluence {
    match trends.first() {
        None => Confluence::Unavailable,
        Some(&first) if first != TrendClass::Ranging && trends.iter().all(|&t| t == first) => {
            Confluence::Aligned(first)
        }
        Some(_) => Confluence::Mixed,
    }
}
