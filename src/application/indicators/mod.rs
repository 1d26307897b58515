//! Streaming indicators used by the indicator engine.
//!
//! Each indicator consumes one value per call through [`ta::Next`] and yields
//! `None` until its window is full, so warm-up values are never mistaken for
//! real readings. Formulas are fixed: EMA is seeded with the simple mean of
//! its first `N` inputs, RSI uses Wilder's `1/N` smoothing.

pub mod ema;
pub mod macd;
pub mod rolling;
pub mod rsi;

pub use ema::SeededEma;
pub use macd::{Macd, MacdOutput};
pub use rolling::RollingExtreme;
pub use rsi::WilderRsi;

/// Moves `current` toward `input` by `weight` (0..=1).
///
/// Written as a convex combination so two finite operands always give a
/// finite result, even near `f64::MAX`. Equal operands come back unchanged,
/// so a constant series has a constant average.
pub(crate) fn blend(current: f64, input: f64, weight: f64) -> f64 {
    if current == input {
        return current;
    }
    current * (1.0 - weight) + input * weight
}
