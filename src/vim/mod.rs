//! Vim process driver
//!
//! Builds the editor command line and supervises a single invocation.

mod command;
mod process;
mod shell;

pub use command::{VimCommand, DEFAULT_VIM};
pub use process::{ProcessResult, VimRunner};
