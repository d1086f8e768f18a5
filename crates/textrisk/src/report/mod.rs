mod insights;
mod labels;
mod render;
mod summary;
pub mod views;

pub use labels::CategoryLabels;
pub use render::{render_text, truncate_chars};
pub use summary::{CategoryCount, Report};

pub(crate) use insights::{interpretation_for, DISCLAIMER, RECOMMENDATIONS};
