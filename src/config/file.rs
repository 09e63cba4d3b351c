//! Configuration file management
//!
//! Handles finding configuration files and producing an example one.

use std::path::{Path, PathBuf};

use super::RunConfig;
use crate::models::{FileSet, Variable};

/// Configuration file locations (in order of precedence)
const CONFIG_LOCATIONS: &[&str] = &[
    "./vunit.yaml",
    "./vunit.yml",
    "./.vunit.yaml",
    "~/.config/vunit/config.yaml",
];

/// Find configuration file in standard locations
pub fn find() -> Option<PathBuf> {
    CONFIG_LOCATIONS
        .iter()
        .map(|location| expand_path(location))
        .find(|path| path.exists())
}

/// Example configuration written by `vunit config init`
pub fn example() -> RunConfig {
    RunConfig {
        todir: Some(PathBuf::from("build/test/results")),
        filesets: vec![FileSet::new("test")
            .include("plugin/mytest.vim")
            .include("autoload/util.vim")],
        variables: vec![Variable::new("g:MyPluginDebug", "1")],
        paths: vec![".".to_string()],
        plugins: vec!["plugin/myplugin.vim".to_string()],
        failure_property: Some("vunit.failed".to_string()),
        halt_on_failure: false,
        ..Default::default()
    }
}

/// Expand ~ to home directory
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

/// Check if file is YAML based on extension
pub fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example() {
        let config = example();
        assert!(config.todir.is_some());
        assert_eq!(config.file_count(), 2);
        assert_eq!(config.failure_property.as_deref(), Some("vunit.failed"));
    }

    #[test]
    fn test_expand_path() {
        assert_eq!(expand_path("./vunit.yaml"), PathBuf::from("./vunit.yaml"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~/x.yaml"), home.join("x.yaml"));
        }
    }

    #[test]
    fn test_is_yaml_file() {
        assert!(is_yaml_file(Path::new("a.yaml")));
        assert!(is_yaml_file(Path::new("a.yml")));
        assert!(!is_yaml_file(Path::new("a.json")));
        assert!(!is_yaml_file(Path::new("a")));
    }
}
