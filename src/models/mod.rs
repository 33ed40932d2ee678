//! Data models for test orchestration
//!
//! This module contains all data structures used throughout the application.

mod category;
mod test_result;

pub use category::{TestCategory, TestType};
pub use test_result::{CategoryOutcome, CoverageStats, TestCategoryResult, TestCounts};
