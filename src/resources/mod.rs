//! Bundled test runner script
//!
//! Each editor process sources `vunit.vim`, so it has to exist on disk before
//! the first invocation. The bundled copy, or a configured replacement, is
//! written into a temporary directory that is removed when the batch is done.
//! The file keeps the name `vunit.vim`: Vim only accepts the autoload style
//! `vunit#TestRunner` from a script of that name.

use std::path::{Path, PathBuf};
use tempfile::{Builder, TempDir};
use tracing::debug;

use crate::executor::BatchError;

/// The runner script compiled into the binary
pub const BUNDLED_SCRIPT: &str = include_str!("vunit.vim");

/// File name the runner script must be sourced under
pub const SCRIPT_NAME: &str = "vunit.vim";

/// Test runner script extracted to a temporary location
#[derive(Debug)]
pub struct RunnerScript {
    _dir: TempDir,
    path: PathBuf,
}

impl RunnerScript {
    /// Extract the bundled script, or the script at `source` when given
    pub fn extract(source: Option<&Path>) -> Result<Self, BatchError> {
        let content = match source {
            Some(path) => std::fs::read(path)
                .map_err(|_| BatchError::MissingResource(path.to_path_buf()))?,
            None => BUNDLED_SCRIPT.as_bytes().to_vec(),
        };

        let dir = Builder::new()
            .prefix("vunit")
            .tempdir()
            .map_err(BatchError::ResourceIo)?;
        let path = dir.path().join(SCRIPT_NAME);
        std::fs::write(&path, content).map_err(BatchError::ResourceIo)?;

        debug!("Extracted runner script to {}", path.display());
        Ok(Self { _dir: dir, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path as Vim should see it, with forward slashes
    pub fn vim_path(&self) -> String {
        vim_path(self.path())
    }
}

/// Render a path with forward slashes for use inside Vim commands
pub fn vim_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Make a path absolute against the current directory without touching the
/// filesystem
pub fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_extract_bundled() {
        let script = RunnerScript::extract(None).unwrap();
        let content = std::fs::read_to_string(script.path()).unwrap();

        assert!(content.contains("function! vunit#TestRunner("));
        assert_eq!(script.path().file_name().unwrap(), SCRIPT_NAME);
        assert!(script.vim_path().ends_with("/vunit.vim"));
    }

    #[test]
    fn test_extract_override() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("custom.vim");
        std::fs::write(&source, "\" custom runner\n").unwrap();

        let script = RunnerScript::extract(Some(&source)).unwrap();
        let content = std::fs::read_to_string(script.path()).unwrap();
        assert_eq!(content, "\" custom runner\n");
        assert_eq!(script.path().file_name().unwrap(), SCRIPT_NAME);
    }

    #[test]
    fn test_missing_override() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.vim");

        let err = RunnerScript::extract(Some(&missing)).unwrap_err();
        assert!(matches!(err, BatchError::MissingResource(p) if p == missing));
    }

    #[test]
    fn test_removed_on_drop() {
        let script = RunnerScript::extract(None).unwrap();
        let path = script.path().to_path_buf();
        let dir = path.parent().unwrap().to_path_buf();
        assert!(path.exists());

        drop(script);
        assert!(!path.exists());
        assert!(!dir.exists());
    }

    #[test]
    fn test_vim_path() {
        assert_eq!(vim_path(Path::new("C:\\tmp\\vunit.vim")), "C:/tmp/vunit.vim");
    }

    #[test]
    fn test_absolute() {
        assert_eq!(absolute(Path::new("/a/b")), PathBuf::from("/a/b"));
        assert!(absolute(Path::new("rel")).is_absolute());
    }
}
