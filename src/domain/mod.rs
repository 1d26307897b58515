// Candle input contract
pub mod market;

// Analysis output model
pub mod analysis;

// Port interfaces
pub mod ports;

// Input integrity checks
pub mod validation;

// Domain-specific error types
pub mod errors;
