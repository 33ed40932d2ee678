//! Output formatting module
//!
//! Provides the human-readable summary and JSON renderings of a run report.

mod formatter;

pub use formatter::{OutputFormat, ResultFormatter};
