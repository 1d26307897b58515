// Candle processing: per-candle features and signal synthesis
pub mod indicator_engine;
pub mod signal_generator;

pub use indicator_engine::IndicatorEngine;
pub use signal_generator::{SignalGenerator, SignalSynthesis};
