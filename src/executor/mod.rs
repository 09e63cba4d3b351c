//! Test execution engine
//!
//! Runs batches of Vim test files and turns their results into a failure
//! signal for the build.

mod error;
mod properties;
mod runner;

pub use error::BatchError;
pub use properties::Properties;
pub use runner::BatchRunner;
