//! Toolchain output parsing
//!
//! Turns the JSON reporter stream and lcov coverage data into counts.

mod events;
mod lcov;

pub use events::parse_event_stream;
pub use lcov::read_coverage_file;
