//! Trellis - a bracket diagram language normalized for layout and rendering.
//!
//! Parses Trellis diagram text into a canonical graph of classifiers and
//! relations together with a fully resolved rendering configuration, and
//! exports the result as JSON for an external layout engine.

pub mod config;

mod error;

pub use trellis_core::{config as render_config, diagram, style, syntax};

pub use error::TrellisError;

use log::{debug, info, trace};

use trellis_core::diagram::ParsedDiagram;
use trellis_parser::{DiagramParser, Directives, ParseError, preprocess};

use config::AppConfig;

/// Builder for parsing and exporting Trellis diagrams.
///
/// # Examples
///
/// ```rust
/// use trellis::{DiagramBuilder, config::AppConfig};
///
/// let source = "[Customer] places -> [Order]";
///
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// // Parse source into the canonical tree and configuration
/// let diagram = builder.parse(source)
///     .expect("Failed to parse");
///
/// // Export it for the layout engine
/// let json = builder.export_json(&diagram)
///     .expect("Failed to export");
/// assert!(json.contains("\"relations\""));
/// ```
#[derive(Debug, Clone)]
pub struct DiagramBuilder {
    config: AppConfig,
    parser: DiagramParser,
}

impl Default for DiagramBuilder {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// The configuration's default directives are applied to every document
    /// parsed by this builder.
    pub fn new(config: AppConfig) -> Self {
        let defaults: Directives = config.directives().clone();
        let parser = DiagramParser::new().with_default_directives(defaults);
        Self { config, parser }
    }

    /// Returns the application configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse source text into a canonical tree and resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns `TrellisError::Parse` for malformed directives and grammar
    /// errors.
    pub fn parse(&self, source: &str) -> Result<ParsedDiagram, TrellisError> {
        info!("Parsing diagram");

        let diagram = self.parser.parse(source).map_err(|err| {
            let src = error_source(&err, source);
            TrellisError::new_parse_error(err, src)
        })?;

        debug!("Diagram parsed successfully");
        trace!(diagram:?; "Parsed diagram");

        Ok(diagram)
    }

    /// Serialize a parsed diagram to JSON.
    ///
    /// Output is indented unless the export configuration disables it.
    ///
    /// # Errors
    ///
    /// Returns `TrellisError::Export` if serialization fails.
    pub fn export_json(&self, diagram: &ParsedDiagram) -> Result<String, TrellisError> {
        let json = if self.config.export().pretty() {
            serde_json::to_string_pretty(diagram)?
        } else {
            serde_json::to_string(diagram)?
        };

        info!(bytes = json.len(); "JSON exported");
        Ok(json)
    }
}

/// The text a parse error's spans point into.
fn error_source(err: &ParseError, source: &str) -> String {
    match err {
        ParseError::MalformedDirective { .. } => source.to_string(),
        ParseError::Grammar(_) => preprocess(source)
            .map(|preprocessed| preprocessed.code().to_string())
            .unwrap_or_else(|_| source.to_string()),
    }
}
