use super::blend;
use std::fmt;
use ta::errors::{Result, TaError};
use ta::{Next, Period, Reset};

/// Relative Strength Index with Wilder's smoothing.
///
/// The first average gain/loss is the simple mean of the first `period` price
/// changes (so the first value appears on the `period + 1`-th close); after
/// that each average moves by `1/period` toward the new change. A market with
/// no movement at all reads 50, one with gains but no losses reads 100.
///
/// The seed is the SMA of the first changes, not an EWM started at the first
/// change as in pandas-based tooling, so early values differ slightly from
/// those libraries.
#[derive(Debug, Clone)]
pub struct WilderRsi {
    period: usize,
    prev_close: Option<f64>,
    /// Running means of the seed window
    seed_gain: f64,
    seed_loss: f64,
    changes: usize,
    averages: Option<(f64, f64)>,
}

impl WilderRsi {
    pub fn new(period: usize) -> Result<Self> {
        if period == 0 {
            return Err(TaError::InvalidParameter);
        }
        Ok(Self {
            period,
            prev_close: None,
            seed_gain: 0.0,
            seed_loss: 0.0,
            changes: 0,
            averages: None,
        })
    }

    fn from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            if avg_gain == 0.0 { 50.0 } else { 100.0 }
        } else {
            let rs = avg_gain / avg_loss;
            100.0 - 100.0 / (1.0 + rs)
        }
    }
}

impl Next<f64> for WilderRsi {
    type Output = Option<f64>;

    fn next(&mut self, close: f64) -> Self::Output {
        let prev = self.prev_close.replace(close)?;
        let change = close - prev;
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);

        match self.averages {
            Some((avg_gain, avg_loss)) => {
                let weight = 1.0 / self.period as f64;
                self.averages = Some((
                    blend(avg_gain, gain, weight),
                    blend(avg_loss, loss, weight),
                ));
            }
            None => {
                self.changes += 1;
                let weight = 1.0 / self.changes as f64;
                self.seed_gain = blend(self.seed_gain, gain, weight);
                self.seed_loss = blend(self.seed_loss, loss, weight);
                if self.changes == self.period {
                    self.averages = Some((self.seed_gain, self.seed_loss));
                }
            }
        }

        self.averages
            .map(|(avg_gain, avg_loss)| Self::from_averages(avg_gain, avg_loss))
    }
}

impl Period for WilderRsi {
    fn period(&self) -> usize {
        self.period
    }
}

impl Reset for WilderRsi {
    fn reset(&mut self) {
        self.prev_close = None;
        self.seed_gain = 0.0;
        self.seed_loss = 0.0;
        self.changes = 0;
        self.averages = None;
    }
}

impl fmt::Display for WilderRsi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RSI({})", self.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wilder_smoothing() {
        let mut rsi = WilderRsi::new(2).unwrap();
        assert_eq!(rsi.next(1.0), None);
        assert_eq!(rsi.next(2.0), None);
        // gains [1, 0], losses [0, 1] -> 0.5 / 0.5
        assert_eq!(rsi.next(1.0), Some(50.0));
        // gain (0.5 + 1) / 2 = 0.75, loss 0.5 / 2 = 0.25, RS = 3
        assert_eq!(rsi.next(2.0), Some(75.0));
    }

    #[test]
    fn test_first_value_after_period_changes() {
        let mut rsi = WilderRsi::new(14).unwrap();
        let values: Vec<Option<f64>> = (0..20).map(|i| rsi.next(100.0 + i as f64)).collect();
        assert!(values[..14].iter().all(Option::is_none));
        assert_eq!(values[14], Some(100.0));
    }

    #[test]
    fn test_flat_and_falling_markets() {
        let mut flat = WilderRsi::new(14).unwrap();
        let last = (0..30).map(|_| flat.next(10.0)).last().flatten();
        assert_eq!(last, Some(50.0));

        let mut falling = WilderRsi::new(14).unwrap();
        let last = (0..30).map(|i| falling.next(100.0 - i as f64)).last().flatten();
        assert_eq!(last, Some(0.0));
    }

    #[test]
    fn test_extreme_swings_stay_in_range() {
        let mut rsi = WilderRsi::new(14).unwrap();
        for i in 0..60 {
            let close = if i % 2 == 0 { 0.0 } else { f64::MAX };
            if let Some(value) = rsi.next(close) {
                assert!((0.0..=100.0).contains(&value), "close {}: rsi {}", i, value);
            }
        }
    }

    #[test]
    fn test_reset_clears_history() {
        let mut rsi = WilderRsi::new(1).unwrap();
        rsi.next(1.0);
        assert!(rsi.next(2.0).is_some());
        rsi.reset();
        assert_eq!(rsi.next(3.0), None);
    }
}
