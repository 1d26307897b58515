pub mod binance;
pub mod core;
pub mod csv_source;
pub mod mock;

pub use binance::BinanceMarketDataService;
pub use csv_source::CsvCandleSource;
pub use mock::InMemoryCandleSource;
