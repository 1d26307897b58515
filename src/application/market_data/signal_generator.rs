use crate::config::AnalysisConfig;
use crate::domain::analysis::{Bias, DerivedRow, RsiZone, SignalTag, TrendClass};
use crate::domain::errors::AnalysisError;
use tracing::debug;

/// Signals and classifications read off one derived row
#[derive(Debug, Clone, PartialEq)]
pub struct SignalSynthesis {
    pub trend: TrendClass,
    pub rsi_zone: RsiZone,
    /// In rule-evaluation order
    pub signals: Vec<SignalTag>,
    pub bias: Bias,
    pub distance_to_support_pct: Option<f64>,
    pub distance_to_resistance_pct: Option<f64>,
}

/// Rule-based synthesis of indicator state into signal tags.
///
/// Rules run in a fixed order (trend, SMC, ICT, price action, RSI, levels)
/// and that order is the order of the emitted tags.
#[derive(Debug, Clone)]
pub struct SignalGenerator {
    rsi_overbought: f64,
    rsi_oversold: f64,
    proximity_pct: f64,
    bias_margin: usize,
}

impl Default for SignalGenerator {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

impl SignalGenerator {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            rsi_overbought: config.rsi_overbought,
            rsi_oversold: config.rsi_oversold,
            proximity_pct: config.proximity_pct,
            bias_margin: config.bias_margin,
        }
    }

    /// Evaluates the rules against `rows[last]`.
    ///
    /// The trend and RSI rules need their values defined on that row; an
    /// undefined value is a computation error, never a default. Undefined
    /// levels only disable the proximity rules.
    pub fn synthesize(
        &self,
        rows: &[DerivedRow],
        last: usize,
    ) -> Result<SignalSynthesis, AnalysisError> {
        let row = rows.get(last).ok_or_else(|| {
            AnalysisError::computation(format!(
                "row {} out of range for {} rows",
                last,
                rows.len()
            ))
        })?;

        let (ema_fast, ema_slow) = match (row.ema_fast, row.ema_slow) {
            (Some(fast), Some(slow)) => (fast, slow),
            _ => {
                return Err(AnalysisError::computation(format!(
                    "EMA values undefined at row {}",
                    last
                )));
            }
        };
        let rsi = row.rsi.ok_or_else(|| {
            AnalysisError::computation(format!("RSI undefined at row {}", last))
        })?;

        let price = row.close;
        let mut signals = Vec::new();

        // 1. Trend
        let trend = classify_trend(price, ema_fast, ema_slow);
        signals.push(match trend {
            TrendClass::StrongUptrend => SignalTag::TrendBullish,
            TrendClass::StrongDowntrend => SignalTag::TrendBearish,
            TrendClass::Ranging => SignalTag::TrendNeutral,
        });

        // 2. Smart-money structure
        push_if(&mut signals, row.bullish_mss, SignalTag::BullishMarketStructureShift);
        push_if(&mut signals, row.bearish_mss, SignalTag::BearishMarketStructureShift);
        push_if(&mut signals, row.bullish_ob, SignalTag::BullishOrderBlock);
        push_if(&mut signals, row.bearish_ob, SignalTag::BearishOrderBlock);

        // 3. Gaps and structure breaks
        push_if(&mut signals, row.fvg_bullish, SignalTag::BullishFairValueGap);
        push_if(&mut signals, row.fvg_bearish, SignalTag::BearishFairValueGap);
        push_if(&mut signals, row.break_of_structure, SignalTag::BreakOfStructure);

        // 4. Candle patterns
        push_if(&mut signals, row.doji, SignalTag::Doji);
        push_if(&mut signals, row.hammer, SignalTag::Hammer);
        push_if(&mut signals, row.engulfing_bullish, SignalTag::BullishEngulfing);

        // 5. Momentum
        let rsi_zone = if rsi > self.rsi_overbought {
            RsiZone::Overbought
        } else if rsi < self.rsi_oversold {
            RsiZone::Oversold
        } else {
            RsiZone::Neutral
        };
        match rsi_zone {
            RsiZone::Overbought => signals.push(SignalTag::Overbought),
            RsiZone::Oversold => signals.push(SignalTag::Oversold),
            RsiZone::Neutral => {}
        }

        // 6. Proximity to levels
        let distance_to_support_pct = row
            .support
            .filter(|&s| s != 0.0)
            .map(|support| (price - support) / support * 100.0);
        let distance_to_resistance_pct = row
            .resistance
            .filter(|_| price != 0.0)
            .map(|resistance| (resistance - price) / price * 100.0);

        push_if(
            &mut signals,
            distance_to_support_pct.is_some_and(|d| d < self.proximity_pct),
            SignalTag::NearSupport,
        );
        push_if(
            &mut signals,
            distance_to_resistance_pct.is_some_and(|d| d < self.proximity_pct),
            SignalTag::NearResistance,
        );

        let bias = Bias::from_signals(&signals, self.bias_margin);

        debug!(
            "SignalGenerator: row {} -> {:?}, {} signals, bias {} ({}/{})",
            last,
            trend,
            signals.len(),
            bias.direction,
            bias.bullish_count,
            bias.bearish_count
        );

        Ok(SignalSynthesis {
            trend,
            rsi_zone,
            signals,
            bias,
            distance_to_support_pct,
            distance_to_resistance_pct,
        })
    }
}

pub fn classify_trend(price: f64, ema_fast: f64, ema_slow: f64) -> TrendClass {
    if ema_fast > ema_slow && price > ema_fast {
        TrendClass::StrongUptrend
    } else if ema_fast < ema_slow && price < ema_fast {
        TrendClass::StrongDowntrend
    } else {
        TrendClass::Ranging
    }
}

fn push_if(signals: &mut Vec<SignalTag>, condition: bool, tag: SignalTag) {
    if condition {
        signals.push(tag);
    }
}
