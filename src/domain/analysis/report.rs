use super::signal::{SignalCategory, SignalTag};
use crate::domain::market::Timeframe;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TrendClass {
    StrongUptrend,
    StrongDowntrend,
    Ranging,
}

impl fmt::Display for TrendClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendClass::StrongUptrend => write!(f, "STRONG UPTREND"),
            TrendClass::StrongDowntrend => write!(f, "STRONG DOWNTREND"),
            TrendClass::Ranging => write!(f, "SIDEWAYS/RANGING"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RsiZone {
    Overbought,
    Oversold,
    Neutral,
}

impl fmt::Display for RsiZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RsiZone::Overbought => write!(f, "OVERBOUGHT"),
            RsiZone::Oversold => write!(f, "OVERSOLD"),
            RsiZone::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BiasDirection {
    Bullish,
    Bearish,
    Neutral,
}

impl fmt::Display for BiasDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BiasDirection::Bullish => write!(f, "BULLISH"),
            BiasDirection::Bearish => write!(f, "BEARISH"),
            BiasDirection::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// Directional lean of a signal list together with the counts behind it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bias {
    pub direction: BiasDirection,
    pub bullish_count: usize,
    pub bearish_count: usize,
}

impl Bias {
    /// Scores tags by their bullish/bearish markers. A side wins only when it
    /// leads the other by more than `margin`; anything closer is neutral.
    pub fn from_signals(signals: &[SignalTag], margin: usize) -> Self {
        let bullish_count = signals.iter().filter(|s| s.has_bullish_marker()).count();
        let bearish_count = signals.iter().filter(|s| s.has_bearish_marker()).count();

        let direction = if bullish_count > bearish_count + margin {
            BiasDirection::Bullish
        } else if bearish_count > bullish_count + margin {
            BiasDirection::Bearish
        } else {
            BiasDirection::Neutral
        };

        Self {
            direction,
            bullish_count,
            bearish_count,
        }
    }
}

/// Immutable outcome of one successful analysis call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub price: f64,
    pub trend: TrendClass,
    pub rsi: f64,
    pub rsi_zone: RsiZone,
    pub ema20: f64,
    pub ema50: f64,
    pub macd: Option<f64>,
    pub support: Option<f64>,
    pub resistance: Option<f64>,
    pub liquidity_high: Option<f64>,
    pub liquidity_low: Option<f64>,
    /// Rule evaluation order, never truncated
    pub signals: Vec<SignalTag>,
    pub distance_to_support_pct: Option<f64>,
    pub distance_to_resistance_pct: Option<f64>,
    pub bias: Bias,
    /// Open time of the analysed candle (unix ms)
    pub candle_time: i64,
    pub timestamp: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn signals_in(&self, category: SignalCategory) -> Vec<SignalTag> {
        self.signals
            .iter()
            .copied()
            .filter(|s| s.category() == category)
            .collect()
    }
}
