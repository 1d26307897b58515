// Streaming indicator primitives
pub mod indicators;

// Candle processing
pub mod market_data;

// Report assembly and orchestration
pub mod analysis;
