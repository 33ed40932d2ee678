//! External toolchain invocation
//!
//! Wraps the Flutter CLI: bounded process execution, environment checks and
//! test command construction.

mod command;
mod flutter;

pub use flutter::Flutter;
