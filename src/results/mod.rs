//! Run reports
//!
//! Builds the run-level report and persists it as JSON.

mod report;

pub use report::{ReportGenerator, RunReport};
