//! Application configuration for Trellis.
//!
//! [`AppConfig`] is deserialized from TOML by the CLI. It supplies default
//! directive values that every document starts from, and controls how the
//! parsed diagram is exported.
//!
//! # Example
//!
//! ```
//! # use trellis::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.directives().is_empty());
//! assert!(config.export().pretty());
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Directive defaults, applied before a document's own `#key:value` lines.
    #[serde(default)]
    directives: IndexMap<String, String>,

    /// Export configuration section.
    #[serde(default)]
    export: ExportConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the given directive defaults and export settings.
    pub fn new(directives: IndexMap<String, String>, export: ExportConfig) -> Self {
        Self { directives, export }
    }

    /// Returns the default directives.
    pub fn directives(&self) -> &IndexMap<String, String> {
        &self.directives
    }

    /// Returns the export configuration.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }
}

/// JSON export settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Indent the JSON output.
    #[serde(default = "default_pretty")]
    pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

impl ExportConfig {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Whether the JSON output is indented.
    pub fn pretty(&self) -> bool {
        self.pretty
    }
}
