//! Output formatting module
//!
//! Provides the end-of-run report formats.

mod formatter;

pub use formatter::{OutputFormat, ReportFormatter};
