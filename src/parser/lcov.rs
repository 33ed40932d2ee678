//! lcov coverage data
//!
//! Coverage is approximated by counting `LF:` (lines found) and `LH:`
//! (lines hit) records, one of each per source file.

use anyhow::{Context, Result};
use std::path::Path;

use crate::models::CoverageStats;

const LINES_FOUND: &str = "LF:";
const LINES_HIT: &str = "LH:";

/// Derive coverage from lcov text
pub fn parse_lcov(content: &str) -> CoverageStats {
    let mut found = 0u32;
    let mut hit = 0u32;

    for line in content.lines().map(str::trim_start) {
        if line.starts_with(LINES_FOUND) {
            found += 1;
        } else if line.starts_with(LINES_HIT) {
            hit += 1;
        }
    }

    CoverageStats::new(found, hit)
}

/// Read and parse a coverage file
pub fn read_coverage_file(path: &Path) -> Result<CoverageStats> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read coverage file: {}", path.display()))?;
    Ok(parse_lcov(&content))
}
