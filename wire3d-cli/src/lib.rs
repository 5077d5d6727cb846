/// Command-line front end for the wire3d renderer
pub mod pattern;
pub mod report;

pub use pattern::line_pattern;
pub use report::{write_error, write_saved, write_summary};
