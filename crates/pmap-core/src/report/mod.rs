pub mod build;
pub mod model;
pub mod render;

pub use build::build_report;
pub use model::Report;
pub use render::{SummaryView, render_summary};
