//! Test inputs supplied by the host build
//!
//! File sets of resolved test files and the Vim variables injected at startup.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A base directory plus the relative test files resolved beneath it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSet {
    /// Directory the includes are relative to
    pub basedir: PathBuf,

    /// Relative test file paths, in execution order
    #[serde(default)]
    pub includes: Vec<String>,
}

impl FileSet {
    pub fn new(basedir: impl Into<PathBuf>) -> Self {
        Self {
            basedir: basedir.into(),
            includes: Vec::new(),
        }
    }

    pub fn include(mut self, file: impl Into<String>) -> Self {
        self.includes.push(file.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.includes.is_empty()
    }
}

/// A Vim variable assigned with `let` before anything is sourced
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub key: String,
    pub value: String,
}

impl Variable {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Parse a `KEY=VALUE` pair as given on the command line
    pub fn parse(s: &str) -> Option<Self> {
        let (key, value) = s.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some(Self::new(key, value))
    }

    /// Render as a Vim `let` statement
    pub fn to_let(&self) -> String {
        format!("let {}='{}'", self.key, self.value)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}
