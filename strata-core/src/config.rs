//! Engine Configuration
//!
//! Knobs that change how identifiers are split and how lookups fall
//! back. The defaults match the manifest layout where ids look like
//! `model.package.name`.

use serde::Deserialize;

use crate::error::{Error, Result};

/// Configuration shared by the graph builder, depth table and index.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Separator between identifier segments.
    pub separator: char,

    /// Whether `get_depth` scans for a `separator + name` suffix when
    /// the exact key is missing.
    pub suffix_fallback: bool,
}

impl EngineConfig {
    /// Parse a configuration from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::Config)
    }

    /// The prefix every id of the given namespace starts with.
    pub fn namespace_prefix(&self, namespace: &str) -> String {
        let mut prefix = String::with_capacity(namespace.len() + 1);
        prefix.push_str(namespace);
        prefix.push(self.separator);
        prefix
    }

    /// The last segment of a fully-qualified identifier.
    pub fn short_name<'a>(&self, id: &'a str) -> &'a str {
        id.rsplit(self.separator).next().unwrap_or(id)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            separator: '.',
            suffix_fallback: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_dot_separator() {
        let config = EngineConfig::default();
        assert_eq!(config.separator, '.');
        assert!(config.suffix_fallback);
        assert_eq!(config.namespace_prefix("model"), "model.");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(r#"{"suffix_fallback": false}"#).unwrap();
        assert_eq!(config.separator, '.');
        assert!(!config.suffix_fallback);
    }

    #[test]
    fn invalid_json_is_config_error() {
        let err = EngineConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn short_name_takes_last_segment() {
        let config = EngineConfig::default();
        assert_eq!(config.short_name("model.shop.orders"), "orders");
        assert_eq!(config.short_name("orders"), "orders");
    }
}
