pub mod report_view;

pub use report_view::{render_analysis, render_ict, render_levels, render_multi, render_smc};
