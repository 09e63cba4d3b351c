//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;
use std::path::PathBuf;

use super::RunConfig;

/// Environment variable prefix
const ENV_PREFIX: &str = "VUNIT";

/// Configuration overrides read from environment variables
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvConfig {
    /// Config file from VUNIT_CONFIG
    pub config_file: Option<PathBuf>,
    /// Output directory from VUNIT_TODIR
    pub todir: Option<PathBuf>,
    /// Vim executable from VUNIT_VIM
    pub vim: Option<String>,
    /// Failure property from VUNIT_FAILURE_PROPERTY
    pub failure_property: Option<String>,
    /// Halt on failure from VUNIT_HALT_ON_FAILURE
    pub halt_on_failure: Option<bool>,
    /// Log level from VUNIT_LOG_LEVEL
    pub log_level: Option<String>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(&format!("{ENV_PREFIX}_{name}")).filter(|v| !v.is_empty());

        Self {
            config_file: get("CONFIG").map(PathBuf::from),
            todir: get("TODIR").map(PathBuf::from),
            vim: get("VIM"),
            failure_property: get("FAILURE_PROPERTY"),
            halt_on_failure: get("HALT_ON_FAILURE").and_then(|v| parse_bool(&v)),
            log_level: get("LOG_LEVEL"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self != &Self::default()
    }

    /// Overlay the set values onto a configuration
    pub fn apply_to(&self, config: &mut RunConfig) {
        if let Some(todir) = &self.todir {
            config.todir = Some(todir.clone());
        }
        if let Some(vim) = &self.vim {
            config.vim = vim.clone();
        }
        if let Some(property) = &self.failure_property {
            config.failure_property = Some(property.clone());
        }
        if let Some(halt) = self.halt_on_failure {
            config.halt_on_failure = halt;
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_vars(vars: &[(&str, &str)]) -> EnvConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_env_config_default() {
        let config = from_vars(&[]);
        assert!(!config.has_any());
        assert!(config.todir.is_none());
    }

    #[test]
    fn test_env_values() {
        let config = from_vars(&[
            ("VUNIT_TODIR", "/tmp/results"),
            ("VUNIT_VIM", "nvim"),
            ("VUNIT_HALT_ON_FAILURE", "yes"),
            ("VUNIT_LOG_LEVEL", "debug"),
        ]);

        assert!(config.has_any());
        assert_eq!(config.todir, Some(PathBuf::from("/tmp/results")));
        assert_eq!(config.vim.as_deref(), Some("nvim"));
        assert_eq!(config.halt_on_failure, Some(true));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_empty_and_invalid_values_ignored() {
        let config = from_vars(&[("VUNIT_VIM", ""), ("VUNIT_HALT_ON_FAILURE", "maybe")]);
        assert!(config.vim.is_none());
        assert!(config.halt_on_failure.is_none());
    }

    #[test]
    fn test_apply_to() {
        let mut config = RunConfig {
            halt_on_failure: true,
            ..Default::default()
        };
        let env = from_vars(&[
            ("VUNIT_HALT_ON_FAILURE", "0"),
            ("VUNIT_FAILURE_PROPERTY", "tests.failed"),
        ]);
        env.apply_to(&mut config);

        assert!(!config.halt_on_failure);
        assert_eq!(config.failure_property.as_deref(), Some("tests.failed"));
        assert_eq!(config.vim, "vim");
    }
}
