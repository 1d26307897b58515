use super::ema::SeededEma;
use ta::errors::{Result, TaError};
use ta::{Next, Period, Reset};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdOutput {
    pub macd: f64,
    /// EMA of the MACD line, `None` during its own warm-up
    pub signal: Option<f64>,
    pub histogram: Option<f64>,
}

/// MACD line `EMA(fast) - EMA(slow)` of close, plus signal line and histogram.
#[derive(Debug, Clone)]
pub struct Macd {
    fast: SeededEma,
    slow: SeededEma,
    signal: SeededEma,
}

impl Macd {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Result<Self> {
        if fast_period >= slow_period {
            return Err(TaError::InvalidParameter);
        }
        Ok(Self {
            fast: SeededEma::new(fast_period)?,
            slow: SeededEma::new(slow_period)?,
            signal: SeededEma::new(signal_period)?,
        })
    }
}

impl Next<f64> for Macd {
    type Output = Option<MacdOutput>;

    fn next(&mut self, close: f64) -> Self::Output {
        // Both EMAs must see every close, even while the other is warming up.
        let fast = self.fast.next(close);
        let slow = self.slow.next(close);

        let macd = fast? - slow?;
        let signal = self.signal.next(macd);
        Some(MacdOutput {
            macd,
            signal,
            histogram: signal.map(|s| macd - s),
        })
    }
}

impl Period for Macd {
    fn period(&self) -> usize {
        self.slow.period()
    }
}

impl Reset for Macd {
    fn reset(&mut self) {
        self.fast.reset();
        self.slow.reset();
        self.signal.reset();
    }
}
