//! Shared utilities
//!
//! Logging setup and timing helpers.

pub mod logger;
pub mod timer;
