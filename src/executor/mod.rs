//! Test execution engine
//!
//! Provides sequential and parallel category execution and the session that
//! ties them to environment checks and reporting.

mod parallel;
mod runner;
mod session;

pub use runner::{all_succeeded, CategoryResults};
pub use session::{SessionOptions, TestSession};
