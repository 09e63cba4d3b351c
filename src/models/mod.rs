//! Data models for vunit runs
//!
//! This module contains the data structures shared by the driver and the
//! batch orchestrator.

mod fileset;
mod test_result;

pub use fileset::{FileSet, Variable};
pub use test_result::{BatchReport, SuiteSummary, TestOutcome};
