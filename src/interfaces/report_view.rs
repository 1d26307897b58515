//! Text views over [`AnalysisResult`] for the command surface.
//!
//! Every view is a pure function of the result; nothing here recomputes
//! indicators or re-derives signals.

use crate::application::analysis::{Confluence, MultiTimeframeReport};
use crate::domain::analysis::{AnalysisResult, BiasDirection, SignalCategory, TrendClass};
use std::fmt::Write;

/// Signals listed in the `analyze` view before the remainder is summarised
pub const MAX_LISTED_SIGNALS: usize = 8;

pub fn render_analysis(result: &AnalysisResult) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "ADVANCED ANALYSIS - {} ({})",
        result.symbol, result.timeframe
    );
    let _ = writeln!(out, "{}", result.timestamp.format("%Y-%m-%d %H:%M:%S UTC"));
    let _ = writeln!(out);
    let _ = writeln!(out, "Price: {}", format_price(result.price));
    let _ = writeln!(out, "Trend: {}", result.trend);
    let _ = writeln!(out, "RSI: {:.1} ({})", result.rsi, result.rsi_zone);
    let _ = writeln!(out, "EMA20: {} | EMA50: {}", format_price(result.ema20), format_price(result.ema50));
    if let Some(macd) = result.macd {
        let _ = writeln!(out, "MACD: {:.4}", macd);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Key Levels:");
    let _ = writeln!(out, "- Support: {}", format_level(result.support));
    let _ = writeln!(out, "- Resistance: {}", format_level(result.resistance));
    let _ = writeln!(
        out,
        "- Distance to Support: {}",
        format_pct(result.distance_to_support_pct)
    );
    let _ = writeln!(
        out,
        "- Distance to Resistance: {}",
        format_pct(result.distance_to_resistance_pct)
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Technical Signals:");
    for signal in result.signals.iter().take(MAX_LISTED_SIGNALS) {
        let _ = writeln!(out, "- {}", signal);
    }
    if result.signals.len() > MAX_LISTED_SIGNALS {
        let _ = writeln!(
            out,
            "- ... and {} more signals",
            result.signals.len() - MAX_LISTED_SIGNALS
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Insight:");
    let _ = writeln!(out, "{}", bias_line(result.bias.direction));
    let _ = writeln!(out);
    let _ = write!(
        out,
        "Signal Strength: {} bullish / {} bearish",
        result.bias.bullish_count, result.bias.bearish_count
    );

    out
}

pub fn render_smc(result: &AnalysisResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "SMC ANALYSIS - {} ({})", result.symbol, result.timeframe);
    let _ = writeln!(out);
    let _ = writeln!(out, "Price: {}", format_price(result.price));
    let _ = writeln!(out, "Market Structure: {}", result.trend);
    let _ = writeln!(out);

    let _ = writeln!(out, "SMC Signals:");
    write_category(&mut out, result, SignalCategory::Smc);
    let _ = writeln!(out);

    let _ = writeln!(out, "Liquidity Levels:");
    let _ = writeln!(out, "- Support: {}", format_level(result.support));
    let _ = writeln!(out, "- Resistance: {}", format_level(result.resistance));
    let _ = writeln!(out, "- Liquidity High (20): {}", format_level(result.liquidity_high));
    let _ = writeln!(out, "- Liquidity Low (20): {}", format_level(result.liquidity_low));
    let _ = writeln!(out);

    let _ = writeln!(out, "SMC Strategy:");
    let _ = write!(
        out,
        "{}",
        match result.trend {
            TrendClass::StrongUptrend => "Look for BUY setups at support",
            TrendClass::StrongDowntrend => "Look for SELL setups at resistance",
            TrendClass::Ranging => "Trade the range between support and resistance",
        }
    );

    out
}

pub fn render_ict(result: &AnalysisResult) -> String {
    let mut out = String::new();
    let ict_signals = result.signals_in(SignalCategory::Ict);

    let _ = writeln!(out, "ICT ANALYSIS - {} ({})", result.symbol, result.timeframe);
    let _ = writeln!(out);
    let _ = writeln!(out, "Price: {}", format_price(result.price));
    let _ = writeln!(out, "Market Condition: {}", result.trend);
    let _ = writeln!(out);

    let _ = writeln!(out, "ICT Signals:");
    write_category(&mut out, result, SignalCategory::Ict);
    let _ = writeln!(out);

    let _ = writeln!(out, "Fair Value Gaps & Structure:");
    let _ = writeln!(out, "- Current RSI: {:.1}", result.rsi);
    let _ = writeln!(out, "- Key Support: {}", format_level(result.support));
    let _ = writeln!(out, "- Key Resistance: {}", format_level(result.resistance));
    let _ = writeln!(out);

    let insight = if ict_signals.iter().any(|s| s.has_bullish_marker()) {
        "Look for long entries after FVG fills"
    } else if ict_signals.iter().any(|s| s.has_bearish_marker()) {
        "Look for short entries after FVG fills"
    } else {
        "Wait for market structure clarity"
    };
    let _ = writeln!(out, "ICT Insight:");
    let _ = write!(out, "{}", insight);

    out
}

/// Key-level view; same content as the SMC view.
pub fn render_levels(result: &AnalysisResult) -> String {
    render_smc(result)
}

pub fn render_multi(report: &MultiTimeframeReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "MULTI-TIMEFRAME ANALYSIS - {}", report.symbol);
    let _ = writeln!(out);
    for outcome in &report.outcomes {
        match &outcome.outcome {
            Ok(result) => {
                let _ = writeln!(
                    out,
                    "{}: {} | RSI {:.1} ({}) | bias {}",
                    outcome.timeframe, result.trend, result.rsi, result.rsi_zone, result.bias.direction
                );
            }
            Err(e) => {
                let _ = writeln!(out, "{}: unavailable ({:#})", outcome.timeframe, e);
            }
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "Confluence: {}",
        match report.confluence {
            Confluence::Aligned(trend) => format!("ALIGNED - {}", trend),
            Confluence::Mixed => "MIXED - timeframes disagree".to_string(),
            Confluence::Unavailable => "UNAVAILABLE - no timeframe could be analysed".to_string(),
        }
    );

    if let Some(primary) = report.primary() {
        let _ = writeln!(out);
        let _ = write!(out, "{}", render_analysis(primary));
    }

    out
}

fn write_category(out: &mut String, result: &AnalysisResult, category: SignalCategory) {
    let signals = result.signals_in(category);
    if signals.is_empty() {
        let _ = writeln!(out, "- No strong {} signals detected", category);
    }
    for signal in signals {
        let _ = writeln!(out, "- {}", signal.text());
    }
}

fn bias_line(direction: BiasDirection) -> &'static str {
    match direction {
        BiasDirection::Bullish => "BULLISH BIAS - Look for long opportunities",
        BiasDirection::Bearish => "BEARISH BIAS - Look for short opportunities",
        BiasDirection::Neutral => "NEUTRAL BIAS - Wait for clearer signals",
    }
}

fn format_level(level: Option<f64>) -> String {
    level.map_or_else(|| "n/a".to_string(), format_price)
}

fn format_pct(pct: Option<f64>) -> String {
    pct.map_or_else(|| "n/a".to_string(), |p| format!("{:.1}%", p))
}

/// `$1,234,567.89`
pub fn format_price(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::analysis::TimeframeOutcome;
    use crate::domain::analysis::{Bias, RsiZone, SignalTag};
    use crate::domain::market::Timeframe;
    use chrono::{TimeZone, Utc};

    fn result(signals: Vec<SignalTag>, trend: TrendClass) -> AnalysisResult {
        AnalysisResult {
            symbol: "BTCUSDT".to_string(),
            timeframe: Timeframe::OneHour,
            price: 96_123.456,
            trend,
            rsi: 55.04,
            rsi_zone: RsiZone::Neutral,
            ema20: 95_000.0,
            ema50: 94_000.0,
            macd: Some(12.5),
            support: Some(95_500.0),
            resistance: Some(97_000.0),
            liquidity_high: Some(97_500.0),
            liquidity_low: Some(94_000.0),
            bias: Bias::from_signals(&signals, 2),
            signals,
            distance_to_support_pct: Some(0.652),
            distance_to_resistance_pct: Some(0.912),
            candle_time: 1_700_000_000_000,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        }
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(96_123.456), "$96,123.46");
        assert_eq!(format_price(999.0), "$999.00");
        assert_eq!(format_price(1_000.0), "$1,000.00");
        assert_eq!(format_price(0.5), "$0.50");
        assert_eq!(format_price(-1_234_567.0), "-$1,234,567.00");
    }

    #[test]
    fn test_analysis_view_truncates_signals() {
        let signals = vec![
            SignalTag::TrendBullish,
            SignalTag::BullishMarketStructureShift,
            SignalTag::BullishOrderBlock,
            SignalTag::BullishFairValueGap,
            SignalTag::BreakOfStructure,
            SignalTag::Doji,
            SignalTag::Hammer,
            SignalTag::BullishEngulfing,
            SignalTag::Overbought,
            SignalTag::NearResistance,
        ];
        let text = render_analysis(&result(signals, TrendClass::StrongUptrend));

        assert!(text.contains("ADVANCED ANALYSIS - BTCUSDT (1H)"));
        assert!(text.contains("Price: $96,123.46"));
        assert!(text.contains("RSI: 55.0 (NEUTRAL)"));
        assert!(text.contains("- Distance to Support: 0.7%"));
        assert!(text.contains("- PA: Bullish Engulfing"));
        assert!(!text.contains("RSI: Overbought"));
        assert!(text.contains("- ... and 2 more signals"));
        assert!(text.contains("BULLISH BIAS"));
        assert!(text.ends_with("Signal Strength: 5 bullish / 0 bearish"));
    }

    #[test]
    fn test_smc_view() {
        let view = render_smc(&result(
            vec![SignalTag::TrendBearish, SignalTag::BearishOrderBlock],
            TrendClass::StrongDowntrend,
        ));
        assert!(view.contains("- Bearish Order Block Present"));
        assert!(!view.contains("SMC: "));
        assert!(view.ends_with("Look for SELL setups at resistance"));

        let empty = render_levels(&result(vec![SignalTag::TrendNeutral], TrendClass::Ranging));
        assert!(empty.contains("- No strong SMC signals detected"));
        assert!(empty.ends_with("Trade the range between support and resistance"));
    }

    #[test]
    fn test_ict_view_insight() {
        let bullish = render_ict(&result(
            vec![SignalTag::BullishFairValueGap, SignalTag::BreakOfStructure],
            TrendClass::Ranging,
        ));
        assert!(bullish.contains("- Break of Structure Detected"));
        assert!(bullish.ends_with("Look for long entries after FVG fills"));

        let bearish = render_ict(&result(vec![SignalTag::BearishFairValueGap], TrendClass::Ranging));
        assert!(bearish.ends_with("Look for short entries after FVG fills"));

        let quiet = render_ict(&result(vec![SignalTag::BullishOrderBlock], TrendClass::Ranging));
        assert!(quiet.contains("- No strong ICT signals detected"));
        assert!(quiet.ends_with("Wait for market structure clarity"));
    }

    #[test]
    fn test_multi_view() {
        let report = MultiTimeframeReport::new(
            "BTCUSDT",
            vec![
                TimeframeOutcome {
                    timeframe: Timeframe::OneHour,
                    outcome: Ok(result(vec![SignalTag::TrendBullish], TrendClass::StrongUptrend)),
                },
                TimeframeOutcome {
                    timeframe: Timeframe::FourHour,
                    outcome: Err(anyhow::anyhow!("timeout")),
                },
            ],
        );
        let view = render_multi(&report);

        assert!(view.contains("1H: STRONG UPTREND | RSI 55.0 (NEUTRAL) | bias NEUTRAL"));
        assert!(view.contains("4H: unavailable (timeout)"));
        assert!(view.contains("Confluence: ALIGNED - STRONG UPTREND"));
        assert!(view.contains("ADVANCED ANALYSIS - BTCUSDT (1H)"));
    }
}
