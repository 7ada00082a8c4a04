//! # Router Configuration Module
//!
//! Construction-time settings for a [`Router`](crate::router::Router).
//!
//! ## Environment Variables
//!
//! ### `PATHTREE_DELIMITER`
//!
//! Single character used to split patterns and paths. Default: `/`
//!
//! ### `PATHTREE_DEFAULT_METHOD`
//!
//! Method name given to routes registered without an explicit method set.
//! Default: `BASE`
//!
//! ### `PATHTREE_UNQUOTE`
//!
//! When `true`, string parameters are percent-decoded unless a route opts
//! out. Default: `false`
//!
//! ## YAML
//!
//! ```yaml
//! delimiter: ":"
//! default_method: GET
//! unquote: true
//! ```
//!
//! Missing keys take their defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::path::Path;

/// Method assigned to routes registered without an explicit method set
pub const DEFAULT_METHOD: &str = "BASE";

/// Default path delimiter
pub const DEFAULT_DELIMITER: char = '/';

/// Router settings, fixed once the router is built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Separator between path segments
    pub delimiter: char,
    /// Method name used when `add` is called without methods
    pub default_method: String,
    /// Default for each route's `unquote` option
    pub unquote: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            default_method: DEFAULT_METHOD.to_string(),
            unquote: false,
        }
    }
}

impl RouterConfig {
    /// Load configuration from environment variables.
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let delimiter = env::var("PATHTREE_DELIMITER")
            .ok()
            .and_then(|val| {
                let mut chars = val.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => None,
                }
            })
            .unwrap_or(defaults.delimiter);

        let default_method = env::var("PATHTREE_DEFAULT_METHOD")
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(defaults.default_method);

        let unquote = env::var("PATHTREE_UNQUOTE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.unquote);

        Self {
            delimiter,
            default_method,
            unquote,
        }
    }

    /// Parse configuration from a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: RouterConfig =
            serde_yaml::from_str(content).context("Failed to parse router configuration")?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read router configuration {}", path.display()))?;
        Self::from_yaml_str(&content)
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_default_method(mut self, method: impl Into<String>) -> Self {
        self.default_method = method.into();
        self
    }

    pub fn with_unquote(mut self, unquote: bool) -> Self {
        self.unquote = unquote;
        self
    }
}
