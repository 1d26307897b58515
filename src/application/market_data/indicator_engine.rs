use crate::application::indicators::{Macd, RollingExtreme, SeededEma, WilderRsi};
use crate::config::AnalysisConfig;
use crate::domain::analysis::DerivedRow;
use crate::domain::errors::AnalysisError;
use crate::domain::market::Candle;
use crate::domain::validation::CandleValidator;
use ta::Next;
use ta::errors::TaError;
use tracing::debug;

/// Turns a candle sequence into one [`DerivedRow`] per candle.
///
/// Stateless between calls: every `compute` builds fresh indicator state and
/// walks the candles once, carrying only the two previous bars for the
/// structure and gap rules.
#[derive(Debug, Clone, Default)]
pub struct IndicatorEngine {
    config: AnalysisConfig,
}

impl IndicatorEngine {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn compute(&self, candles: &[Candle]) -> Result<Vec<DerivedRow>, AnalysisError> {
        if candles.len() < self.config.min_candles {
            return Err(AnalysisError::InsufficientData {
                required: self.config.min_candles,
                actual: candles.len(),
            });
        }
        CandleValidator::validate_series(candles)?;

        let mut pass = ForwardPass::new(&self.config)?;
        let rows: Vec<DerivedRow> = candles
            .iter()
            .enumerate()
            .map(|(index, candle)| pass.step(index, candle))
            .collect();

        debug!(
            "IndicatorEngine: computed {} rows (last fully defined: {})",
            rows.len(),
            rows.last().is_some_and(DerivedRow::is_fully_defined)
        );

        Ok(rows)
    }
}

fn invalid(name: &'static str) -> impl Fn(TaError) -> AnalysisError {
    move |e| AnalysisError::computation(format!("invalid {} parameters: {:?}", name, e))
}

/// Indicator state for one pass over a sequence
struct ForwardPass {
    doji_body_ratio: f64,
    prev: Option<Candle>,
    prev2: Option<Candle>,
    liquidity_high: RollingExtreme,
    liquidity_low: RollingExtreme,
    support: RollingExtreme,
    resistance: RollingExtreme,
    rsi: WilderRsi,
    ema_fast: SeededEma,
    ema_slow: SeededEma,
    macd: Macd,
}

impl ForwardPass {
    fn new(config: &AnalysisConfig) -> Result<Self, AnalysisError> {
        Ok(Self {
            doji_body_ratio: config.doji_body_ratio,
            prev: None,
            prev2: None,
            liquidity_high: RollingExtreme::max(config.liquidity_window)
                .map_err(invalid("liquidity window"))?,
            liquidity_low: RollingExtreme::min(config.liquidity_window)
                .map_err(invalid("liquidity window"))?,
            support: RollingExtreme::min(config.support_resistance_window)
                .map_err(invalid("support window"))?,
            resistance: RollingExtreme::max(config.support_resistance_window)
                .map_err(invalid("resistance window"))?,
            rsi: WilderRsi::new(config.rsi_period).map_err(invalid("RSI"))?,
            ema_fast: SeededEma::new(config.ema_fast_period).map_err(invalid("fast EMA"))?,
            ema_slow: SeededEma::new(config.ema_slow_period).map_err(invalid("slow EMA"))?,
            macd: Macd::new(
                config.macd_fast_period,
                config.macd_slow_period,
                config.macd_signal_period,
            )
            .map_err(invalid("MACD"))?,
        })
    }

    fn step(&mut self, index: usize, c: &Candle) -> DerivedRow {
        let mut row = DerivedRow {
            index,
            timestamp: c.timestamp,
            close: c.close,
            ..Default::default()
        };

        if let Some(p) = self.prev {
            row.higher_high = c.high > p.high;
            row.higher_low = c.low > p.low;
            row.lower_high = c.high < p.high;
            row.lower_low = c.low < p.low;
            row.bullish_mss = row.higher_high && row.higher_low;
            row.bearish_mss = row.lower_high && row.lower_low;

            row.bullish_ob = c.is_bullish() && p.is_bearish();
            row.bearish_ob = c.is_bearish() && p.is_bullish();
            row.engulfing_bullish = c.is_bullish() && p.is_bearish() && c.close > p.open;

            if let Some(p2) = self.prev2 {
                row.fvg_bullish = p.low > p2.high && c.low > p2.high;
                row.fvg_bearish = p.high < p2.low && c.high < p2.low;
                row.break_of_structure = c.high > p2.high || c.low < p2.low;
            }
        }

        // A zero-range bar has no defined body ratio and is never a doji.
        let range = c.range();
        row.doji = range > 0.0 && c.body() / range < self.doji_body_ratio;
        row.hammer = c.is_bullish() && (c.close - c.low) > 2.0 * (c.high - c.close);

        row.liquidity_high = self.liquidity_high.next(c.high);
        row.liquidity_low = self.liquidity_low.next(c.low);
        row.support = self.support.next(c.low);
        row.resistance = self.resistance.next(c.high);

        row.rsi = self.rsi.next(c.close);
        row.ema_fast = self.ema_fast.next(c.close);
        row.ema_slow = self.ema_slow.next(c.close);
        if let Some(macd) = self.macd.next(c.close) {
            row.macd = Some(macd.macd);
            row.macd_signal = macd.signal;
            row.macd_histogram = macd.histogram;
        }

        self.prev2 = self.prev.replace(*c);
        row
    }
}
