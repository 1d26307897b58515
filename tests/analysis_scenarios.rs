mod common;

use chrono::{TimeZone, Utc};
use common::{downtrend, flat, uptrend, uptrend_with_engulfing_finish};
use smc_analyst::application::analysis::{Confluence, MarketAnalyst};
use smc_analyst::config::AnalysisConfig;
use smc_analyst::domain::analysis::{
    AnalysisResult, BiasDirection, RsiZone, SignalCategory, SignalTag, TrendClass,
};
use smc_analyst::domain::errors::AnalysisError;
use smc_analyst::domain::market::{Candle, Timeframe};
use smc_analyst::infrastructure::InMemoryCandleSource;
use smc_analyst::interfaces::report_view;
use std::sync::Arc;

fn analyst(source: InMemoryCandleSource) -> MarketAnalyst {
    MarketAnalyst::new(Arc::new(source), AnalysisConfig::default(), 100)
}

fn analyze(candles: &[Candle]) -> Result<AnalysisResult, AnalysisError> {
    let as_of = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    analyst(InMemoryCandleSource::new()).analyze_candles("BTCUSDT", Timeframe::OneHour, candles, as_of)
}

#[test]
fn test_steady_uptrend() {
    let candles = uptrend(60);
    let result = analyze(&candles).unwrap();

    assert_eq!(result.trend, TrendClass::StrongUptrend);
    assert_eq!(
        result.signals,
        vec![
            SignalTag::TrendBullish,
            SignalTag::BullishMarketStructureShift,
            SignalTag::BreakOfStructure,
            SignalTag::Hammer,
            SignalTag::Overbought,
            SignalTag::NearResistance,
        ]
    );
    assert!(result.signals.iter().all(|s| !s.has_bearish_marker()));
    assert_eq!(result.rsi, 100.0);
    assert_eq!(result.rsi_zone, RsiZone::Overbought);

    // two bullish tags do not clear the margin
    assert_eq!(result.bias.bullish_count, 2);
    assert_eq!(result.bias.bearish_count, 0);
    assert_eq!(result.bias.direction, BiasDirection::Neutral);

    assert_eq!(result.price, 159.0);
    assert_eq!(result.candle_time, candles[59].timestamp);
    assert_eq!(result.resistance, Some(159.5));
    let to_resistance = result.distance_to_resistance_pct.unwrap();
    assert!((to_resistance - 0.5 / 159.0 * 100.0).abs() < 1e-9);
    assert!(result.distance_to_support_pct.unwrap() > 2.0);
}

#[test]
fn test_engulfing_finish_turns_bias_bullish() {
    let result = analyze(&uptrend_with_engulfing_finish()).unwrap();

    assert_eq!(
        result.signals,
        vec![
            SignalTag::TrendBullish,
            SignalTag::BullishMarketStructureShift,
            SignalTag::BullishOrderBlock,
            SignalTag::BreakOfStructure,
            SignalTag::Hammer,
            SignalTag::BullishEngulfing,
            SignalTag::Overbought,
            SignalTag::NearResistance,
        ]
    );
    assert_eq!(result.bias.bullish_count, 4);
    assert_eq!(result.bias.direction, BiasDirection::Bullish);
    assert_eq!(
        result.signals_in(SignalCategory::Smc),
        vec![
            SignalTag::BullishMarketStructureShift,
            SignalTag::BullishOrderBlock
        ]
    );
}

#[test]
fn test_steady_downtrend() {
    let result = analyze(&downtrend(60)).unwrap();

    assert_eq!(result.trend, TrendClass::StrongDowntrend);
    assert_eq!(
        result.signals,
        vec![
            SignalTag::TrendBearish,
            SignalTag::BearishMarketStructureShift,
            SignalTag::BreakOfStructure,
            SignalTag::Oversold,
            SignalTag::NearSupport,
        ]
    );
    assert_eq!(result.rsi_zone, RsiZone::Oversold);
    assert_eq!(result.bias.bearish_count, 2);
    assert_eq!(result.bias.direction, BiasDirection::Neutral);
    assert!(result.ema20 < result.ema50);
}

#[test]
fn test_flat_market_sits_on_both_levels() {
    let result = analyze(&flat(60, 100.0)).unwrap();

    assert_eq!(result.trend, TrendClass::Ranging);
    assert_eq!(result.rsi, 50.0);
    assert_eq!(
        result.signals,
        vec![
            SignalTag::TrendNeutral,
            SignalTag::NearSupport,
            SignalTag::NearResistance
        ]
    );
    assert_eq!(result.distance_to_support_pct, Some(0.0));
    assert_eq!(result.distance_to_resistance_pct, Some(0.0));
    assert_eq!(result.bias.direction, BiasDirection::Neutral);
}

#[test]
fn test_short_history_is_reported_not_defaulted() {
    assert_eq!(
        analyze(&uptrend(30)),
        Err(AnalysisError::InsufficientData {
            required: 50,
            actual: 30
        })
    );
}

#[test]
fn test_same_input_same_report() {
    let candles = uptrend_with_engulfing_finish();
    assert_eq!(analyze(&candles), analyze(&candles));
}

#[tokio::test]
async fn test_analyze_fetches_from_source() {
    let source = InMemoryCandleSource::with_series("ETHUSDT", Timeframe::FourHour, uptrend(120));
    let analyst = MarketAnalyst::new(Arc::new(source), AnalysisConfig::default(), 60);

    let result = analyst.analyze("ETHUSDT", Timeframe::FourHour).await.unwrap();
    assert_eq!(result.symbol, "ETHUSDT");
    assert_eq!(result.timeframe, Timeframe::FourHour);
    // only the last 60 bars were requested
    assert_eq!(result.price, 219.0);
    assert_eq!(analyst.source_name(), "memory");

    let missing = analyst.analyze("ETHUSDT", Timeframe::OneDay).await;
    assert!(missing.is_err());
}

#[tokio::test]
async fn test_multi_timeframe_confluence() {
    let source = InMemoryCandleSource::new();
    for timeframe in Timeframe::confluence_set() {
        source.insert("BTCUSDT", timeframe, uptrend(60)).await;
    }
    let analyst = analyst(source.clone());

    let report = analyst.analyze_multi("BTCUSDT").await;
    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(report.outcomes[0].timeframe, Timeframe::OneHour);
    assert_eq!(report.confluence, Confluence::Aligned(TrendClass::StrongUptrend));
    assert_eq!(report.primary().map(|r| r.trend), Some(TrendClass::StrongUptrend));

    source.insert("BTCUSDT", Timeframe::FourHour, downtrend(60)).await;
    let report = analyst.analyze_multi("BTCUSDT").await;
    assert_eq!(report.confluence, Confluence::Mixed);

    source.fail_with("maintenance").await;
    let report = analyst.analyze_multi("BTCUSDT").await;
    assert_eq!(report.confluence, Confluence::Unavailable);
    assert!(report.primary().is_none());
    assert!(report.outcomes.iter().all(|o| o.outcome.is_err()));
}

#[tokio::test]
async fn test_failed_timeframe_does_not_abort_others() {
    let source = InMemoryCandleSource::new();
    source.insert("BTCUSDT", Timeframe::OneHour, downtrend(60)).await;
    source.insert("BTCUSDT", Timeframe::OneDay, flat(10, 100.0)).await;

    let report = analyst(source).analyze_multi("BTCUSDT").await;
    assert!(report.outcomes[0].outcome.is_ok());
    assert!(report.outcomes[1].outcome.is_err());
    assert!(report.outcomes[2].outcome.is_err());
    assert_eq!(report.confluence, Confluence::Aligned(TrendClass::StrongDowntrend));

    let view = report_view::render_multi(&report);
    assert!(view.contains("1H: STRONG DOWNTREND"));
    assert!(view.contains("4H: unavailable"));
    assert!(view.contains("1D: unavailable"));
    assert!(view.contains("Signal Strength: 0 bullish / 2 bearish"));
}

#[test]
fn test_report_views_over_real_result() {
    let result = analyze(&uptrend(60)).unwrap();

    let analysis = report_view::render_analysis(&result);
    assert!(analysis.contains("- Trend: Bullish"));
    assert!(analysis.contains("- RSI: Overbought - Caution"));
    assert!(!analysis.contains("more signals"));
    assert!(analysis.contains("NEUTRAL BIAS"));

    let smc = report_view::render_smc(&result);
    assert!(smc.contains("- Bullish Market Structure Shift"));
    assert!(smc.contains("Look for BUY setups at support"));

    let ict = report_view::render_ict(&result);
    assert!(ict.contains("- Break of Structure Detected"));
    assert!(ict.contains("Wait for market structure clarity"));
}
