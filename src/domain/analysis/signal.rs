use serde::{Deserialize, Serialize};
use std::fmt;

/// Analytical school a signal belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalCategory {
    Trend,
    Smc,
    Ict,
    PriceAction,
    Momentum,
    Levels,
}

impl SignalCategory {
    pub fn label(&self) -> &'static str {
        match self {
            SignalCategory::Trend => "Trend",
            SignalCategory::Smc => "SMC",
            SignalCategory::Ict => "ICT",
            SignalCategory::PriceAction => "PA",
            SignalCategory::Momentum => "RSI",
            SignalCategory::Levels => "Price",
        }
    }
}

impl fmt::Display for SignalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A discrete signal emitted by the synthesizer.
///
/// Renders as `"<category>: <text>"`, e.g. `"SMC: Bullish Order Block Present"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalTag {
    TrendBullish,
    TrendBearish,
    TrendNeutral,
    BullishMarketStructureShift,
    BearishMarketStructureShift,
    BullishOrderBlock,
    BearishOrderBlock,
    BullishFairValueGap,
    BearishFairValueGap,
    BreakOfStructure,
    Doji,
    Hammer,
    BullishEngulfing,
    Overbought,
    Oversold,
    NearSupport,
    NearResistance,
}

impl SignalTag {
    pub fn category(&self) -> SignalCategory {
        match self {
            SignalTag::TrendBullish | SignalTag::TrendBearish | SignalTag::TrendNeutral => {
                SignalCategory::Trend
            }
            SignalTag::BullishMarketStructureShift
            | SignalTag::BearishMarketStructureShift
            | SignalTag::BullishOrderBlock
            | SignalTag::BearishOrderBlock => SignalCategory::Smc,
            SignalTag::BullishFairValueGap
            | SignalTag::BearishFairValueGap
            | SignalTag::BreakOfStructure => SignalCategory::Ict,
            SignalTag::Doji | SignalTag::Hammer | SignalTag::BullishEngulfing => {
                SignalCategory::PriceAction
            }
            SignalTag::Overbought | SignalTag::Oversold => SignalCategory::Momentum,
            SignalTag::NearSupport | SignalTag::NearResistance => SignalCategory::Levels,
        }
    }

    /// Signal text without the category prefix
    pub fn text(&self) -> &'static str {
        match self {
            SignalTag::TrendBullish => "Bullish",
            SignalTag::TrendBearish => "Bearish",
            SignalTag::TrendNeutral => "Neutral",
            SignalTag::BullishMarketStructureShift => "Bullish Market Structure Shift",
            SignalTag::BearishMarketStructureShift => "Bearish Market Structure Shift",
            SignalTag::BullishOrderBlock => "Bullish Order Block Present",
            SignalTag::BearishOrderBlock => "Bearish Order Block Present",
            SignalTag::BullishFairValueGap => "Bullish Fair Value Gap",
            SignalTag::BearishFairValueGap => "Bearish Fair Value Gap",
            SignalTag::BreakOfStructure => "Break of Structure Detected",
            SignalTag::Doji => "Doji - Indecision",
            SignalTag::Hammer => "Hammer - Potential Reversal",
            SignalTag::BullishEngulfing => "Bullish Engulfing",
            SignalTag::Overbought => "Overbought - Caution",
            SignalTag::Oversold => "Oversold - Potential Opportunity",
            SignalTag::NearSupport => "Near Strong Support",
            SignalTag::NearResistance => "Near Strong Resistance",
        }
    }

    /// Rendered tag contains "bullish" or "buy" (case-insensitive)
    pub fn has_bullish_marker(&self) -> bool {
        let text = self.to_string().to_lowercase();
        text.contains("bullish") || text.contains("buy")
    }

    /// Rendered tag contains "bearish" or "sell" (case-insensitive)
    pub fn has_bearish_marker(&self) -> bool {
        let text = self.to_string().to_lowercase();
        text.contains("bearish") || text.contains("sell")
    }
}

impl fmt::Display for SignalTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category(), self.text())
    }
}
