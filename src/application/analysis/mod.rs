// Report assembly and end-to-end orchestration
pub mod market_analyst;
pub mod report_builder;

pub use market_analyst::{Confluence, MarketAnalyst, MultiTimeframeReport, TimeframeOutcome};
pub use report_builder::ReportBuilder;
