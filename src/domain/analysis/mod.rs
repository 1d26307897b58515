// Analysis output model: derived rows, signals, and the final report
pub mod derived_row;
pub mod report;
pub mod signal;

pub use derived_row::DerivedRow;
pub use report::{AnalysisResult, Bias, BiasDirection, RsiZone, TrendClass};
pub use signal::{SignalCategory, SignalTag};
