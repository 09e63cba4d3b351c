//! Host build properties
//!
//! Properties behave like build properties: once defined they are never
//! overwritten by the batch.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    values: BTreeMap<String, String>,
}

impl Properties {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Define a property, replacing any existing value
    #[allow(dead_code)]
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Define a property only if it is not already defined
    ///
    /// Returns whether the property was set.
    pub fn set_new(&mut self, key: &str, value: impl Into<String>) -> bool {
        if self.values.contains_key(key) {
            return false;
        }
        self.values.insert(key.to_string(), value.into());
        true
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Render as `key=value` lines
    pub fn to_properties_string(&self) -> String {
        self.values
            .iter()
            .map(|(k, v)| format!("{k}={v}\n"))
            .collect()
    }

    /// Write as a `key=value` properties file
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_properties_string())
            .with_context(|| format!("Failed to write properties file: {}", path.display()))
    }
}

impl From<BTreeMap<String, String>> for Properties {
    fn from(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_set_new_keeps_existing() {
        let mut props = Properties::new();
        assert!(props.set_new("failed", "true"));
        assert!(!props.set_new("failed", "again"));
        assert_eq!(props.get("failed"), Some("true"));
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn test_set_overrides() {
        let mut props = Properties::new();
        props.set("a", "1");
        props.set("a", "2");
        assert_eq!(props.get("a"), Some("2"));
    }

    #[test]
    fn test_write_to() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vunit.properties");

        let mut props = Properties::new();
        props.set("b", "2");
        props.set("a", "1");
        props.write_to(&path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a=1\nb=2\n");
    }
}
