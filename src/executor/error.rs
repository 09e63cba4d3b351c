//! Batch failure signals

use std::path::PathBuf;
use thiserror::Error;

use crate::results::ResultError;

/// Everything that fails a batch
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Attribute 'todir' required")]
    MissingOutputDir,

    #[error("Supplied 'todir' {0} is not a directory or does not exist")]
    InvalidOutputDir(PathBuf),

    #[error("You must supply at least one fileset of test files to execute")]
    NoFileSets,

    #[error("Unable to locate runner script resource: {0}")]
    MissingResource(PathBuf),

    #[error("Failed to extract runner script: {0}")]
    ResourceIo(#[source] std::io::Error),

    #[error("Failed to run {file} (exit code {code}): {message}")]
    ProcessFailed {
        file: String,
        code: i32,
        message: String,
    },

    #[error("Failed to read results for {file}: {source}")]
    Results {
        file: String,
        #[source]
        source: ResultError,
    },

    #[error("Test failed: {0}")]
    TestFailed(String),
}

impl BatchError {
    /// Whether the error was raised before any process was spawned
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            BatchError::MissingOutputDir
                | BatchError::InvalidOutputDir(_)
                | BatchError::NoFileSets
                | BatchError::MissingResource(_)
                | BatchError::ResourceIo(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = BatchError::ProcessFailed {
            file: "sub/a.vim".to_string(),
            code: 12,
            message: "No such file or directory".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to run sub/a.vim (exit code 12): No such file or directory"
        );
        assert_eq!(
            BatchError::TestFailed("a.vim".to_string()).to_string(),
            "Test failed: a.vim"
        );
    }

    #[test]
    fn test_is_configuration() {
        assert!(BatchError::NoFileSets.is_configuration());
        assert!(BatchError::MissingOutputDir.is_configuration());
        assert!(!BatchError::TestFailed("a.vim".to_string()).is_configuration());
    }
}
