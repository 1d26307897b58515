// Candle input contract and instrument metadata
pub mod candle;
pub mod symbol;
pub mod timeframe;

pub use candle::Candle;
pub use timeframe::Timeframe;
