//! Result document handling
//!
//! Locates and reads the summary of the result documents the runner script
//! writes for each test file.

mod path;
mod reader;

pub use path::result_file_path;
pub use reader::{read_summary_file, ResultError};
