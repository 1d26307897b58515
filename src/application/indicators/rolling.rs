use std::collections::VecDeque;
use ta::errors::{Result, TaError};
use ta::{Next, Period, Reset};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Extreme {
    Max,
    Min,
}

/// Trailing-window maximum or minimum over the last `period` inputs.
///
/// Keeps a monotonic deque of candidates, so each input is pushed and popped
/// at most once (amortized O(1) per step).
#[derive(Debug, Clone)]
pub struct RollingExtreme {
    period: usize,
    kind: Extreme,
    position: usize,
    candidates: VecDeque<(usize, f64)>,
}

impl RollingExtreme {
    pub fn max(period: usize) -> Result<Self> {
        Self::new(period, Extreme::Max)
    }

    pub fn min(period: usize) -> Result<Self> {
        Self::new(period, Extreme::Min)
    }

    fn new(period: usize, kind: Extreme) -> Result<Self> {
        if period == 0 {
            return Err(TaError::InvalidParameter);
        }
        Ok(Self {
            period,
            kind,
            position: 0,
            candidates: VecDeque::with_capacity(period),
        })
    }

    fn dominates(&self, incoming: f64, existing: f64) -> bool {
        match self.kind {
            Extreme::Max => incoming >= existing,
            Extreme::Min => incoming <= existing,
        }
    }
}

impl Next<f64> for RollingExtreme {
    type Output = Option<f64>;

    fn next(&mut self, input: f64) -> Self::Output {
        while let Some(&(_, back)) = self.candidates.back() {
            if self.dominates(input, back) {
                self.candidates.pop_back();
            } else {
                break;
            }
        }
        self.candidates.push_back((self.position, input));

        while let Some(&(idx, _)) = self.candidates.front() {
            if idx + self.period <= self.position {
                self.candidates.pop_front();
            } else {
                break;
            }
        }

        self.position += 1;
        if self.position < self.period {
            return None;
        }
        self.candidates.front().map(|&(_, value)| value)
    }
}

impl Period for RollingExtreme {
    fn period(&self) -> usize {
        self.period
    }
}

impl Reset for RollingExtreme {
    fn reset(&mut self) {
        self.position = 0;
        self.candidates.clear();
    }
}
