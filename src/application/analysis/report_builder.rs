use crate::application::market_data::signal_generator::SignalSynthesis;
use crate::domain::analysis::{AnalysisResult, DerivedRow};
use crate::domain::errors::AnalysisError;
use crate::domain::market::Timeframe;
use chrono::{DateTime, Utc};

/// Assembles engine rows and synthesized signals into an [`AnalysisResult`].
///
/// Pure assembly; the full signal list is kept, display limits are up to the
/// consumer.
pub struct ReportBuilder;

impl ReportBuilder {
    pub fn build(
        symbol: &str,
        timeframe: Timeframe,
        rows: &[DerivedRow],
        synthesis: SignalSynthesis,
        timestamp: DateTime<Utc>,
    ) -> Result<AnalysisResult, AnalysisError> {
        let row = rows
            .last()
            .ok_or_else(|| AnalysisError::computation("no derived rows to report"))?;

        let (Some(rsi), Some(ema20), Some(ema50)) = (row.rsi, row.ema_fast, row.ema_slow) else {
            return Err(AnalysisError::computation(format!(
                "indicators undefined at row {}",
                row.index
            )));
        };

        Ok(AnalysisResult {
            symbol: symbol.to_string(),
            timeframe,
            price: row.close,
            trend: synthesis.trend,
            rsi,
            rsi_zone: synthesis.rsi_zone,
            ema20,
            ema50,
            macd: row.macd,
            support: row.support,
            resistance: row.resistance,
            liquidity_high: row.liquidity_high,
            liquidity_low: row.liquidity_low,
            signals: synthesis.signals,
            distance_to_support_pct: synthesis.distance_to_support_pct,
            distance_to_resistance_pct: synthesis.distance_to_resistance_pct,
            bias: synthesis.bias,
            candle_time: row.timestamp,
            timestamp,
        })
    }
}
