use super::blend;
use std::fmt;
use ta::errors::{Result, TaError};
use ta::{Next, Period, Reset};

/// Exponential moving average with `k = 2 / (period + 1)`.
///
/// The first value is the simple mean of the first `period` inputs; earlier
/// calls return `None`.
#[derive(Debug, Clone)]
pub struct SeededEma {
    period: usize,
    k: f64,
    /// Running mean of the inputs seen before the first value
    seed_mean: f64,
    seen: usize,
    current: Option<f64>,
}

impl SeededEma {
    pub fn new(period: usize) -> Result<Self> {
        if period == 0 {
            return Err(TaError::InvalidParameter);
        }
        Ok(Self {
            period,
            k: 2.0 / (period as f64 + 1.0),
            seed_mean: 0.0,
            seen: 0,
            current: None,
        })
    }

    pub fn value(&self) -> Option<f64> {
        self.current
    }
}

impl Next<f64> for SeededEma {
    type Output = Option<f64>;

    fn next(&mut self, input: f64) -> Self::Output {
        match self.current {
            Some(prev) => {
                self.current = Some(blend(prev, input, self.k));
            }
            None => {
                self.seen += 1;
                self.seed_mean = blend(self.seed_mean, input, 1.0 / self.seen as f64);
                if self.seen == self.period {
                    self.current = Some(self.seed_mean);
                }
            }
        }
        self.current
    }
}

impl Period for SeededEma {
    fn period(&self) -> usize {
        self.period
    }
}

impl Reset for SeededEma {
    fn reset(&mut self) {
        self.seed_mean = 0.0;
        self.seen = 0;
        self.current = None;
    }
}

impl fmt::Display for SeededEma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EMA({})", self.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_period() {
        assert!(SeededEma::new(0).is_err());
    }

    #[test]
    fn test_seeded_with_simple_mean() {
        let mut ema = SeededEma::new(3).unwrap();
        assert_eq!(ema.next(1.0), None);
        assert_eq!(ema.next(2.0), None);
        let seed = ema.next(3.0).unwrap();
        assert!((seed - 2.0).abs() < 1e-12);
        // k = 0.5
        assert!((ema.next(4.0).unwrap() - 3.0).abs() < 1e-12);
        assert!((ema.next(5.0).unwrap() - 4.0).abs() < 1e-12);
        assert_eq!(ema.to_string(), "EMA(3)");
    }

    #[test]
    fn test_constant_input_stays_constant() {
        let mut ema = SeededEma::new(20).unwrap();
        let last = (0..60).map(|_| ema.next(42.0)).last().flatten();
        assert_eq!(last, Some(42.0));
    }

    #[test]
    fn test_huge_inputs_stay_finite() {
        let mut ema = SeededEma::new(3).unwrap();
        let values: Vec<f64> = [f64::MAX, f64::MAX, f64::MAX, 0.0, f64::MAX]
            .iter()
            .filter_map(|&x| ema.next(x))
            .collect();
        assert_eq!(values[0], f64::MAX);
        assert!(values.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_reset() {
        let mut ema = SeededEma::new(2).unwrap();
        ema.next(10.0);
        ema.next(20.0);
        assert_eq!(ema.value(), Some(15.0));
        ema.reset();
        assert_eq!(ema.value(), None);
        assert_eq!(ema.next(4.0), None);
        assert_eq!(ema.period(), 2);
    }
}
