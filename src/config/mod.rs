//! Configuration module
//!
//! Handles loading and managing run configuration.

mod env;
mod file;

pub use env::EnvConfig;
pub use file::{example, find, is_yaml_file};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::executor::BatchError;
use crate::models::{FileSet, Variable};
use crate::vim::DEFAULT_VIM;

/// Everything the host build supplies for one batch
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Directory result documents are written to
    pub todir: Option<PathBuf>,

    /// Test files to run
    pub filesets: Vec<FileSet>,

    /// Vim variables set before anything is sourced
    pub variables: Vec<Variable>,

    /// Entries appended to Vim's runtimepath
    pub paths: Vec<String>,

    /// Plugins loaded with `:runtime`
    pub plugins: Vec<String>,

    /// Commands run with `--cmd` after plugins are loaded
    pub pre_commands: Vec<String>,

    /// Property set to "true" when a test fails
    pub failure_property: Option<String>,

    /// Stop at the first failing test file
    pub halt_on_failure: bool,

    /// Vim executable
    pub vim: String,

    /// Replacement for the bundled runner script
    pub runner_script: Option<PathBuf>,

    /// Properties already defined by the host build
    pub properties: BTreeMap<String, String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            todir: None,
            filesets: Vec::new(),
            variables: Vec::new(),
            paths: Vec::new(),
            plugins: Vec::new(),
            pre_commands: Vec::new(),
            failure_property: None,
            halt_on_failure: false,
            vim: DEFAULT_VIM.to_string(),
            runner_script: None,
            properties: BTreeMap::new(),
        }
    }
}

impl RunConfig {
    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if is_yaml_file(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        };

        Ok(config)
    }

    /// Load from `path`, or from the first standard location that exists
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => match find() {
                Some(found) => {
                    tracing::debug!("Using config file {}", found.display());
                    Self::load(found)
                }
                None => Ok(Self::default()),
            },
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_yaml_file(path) {
            serde_yaml::to_string(self).context("Failed to serialize config")?
        } else {
            serde_json::to_string_pretty(self).context("Failed to serialize config")?
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Check the configuration can run, returning the output directory
    pub fn validate(&self) -> Result<&Path, BatchError> {
        let todir = self.todir.as_deref().ok_or(BatchError::MissingOutputDir)?;

        if !todir.is_dir() {
            return Err(BatchError::InvalidOutputDir(todir.to_path_buf()));
        }

        if self.filesets.is_empty() {
            return Err(BatchError::NoFileSets);
        }

        Ok(todir)
    }

    /// Total number of test files across all file sets
    pub fn file_count(&self) -> usize {
        self.filesets.iter().map(|set| set.includes.len()).sum()
    }
}
