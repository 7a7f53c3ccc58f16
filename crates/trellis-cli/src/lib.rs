//! CLI logic for the Trellis diagram tool.
//!
//! Reads a diagram file, runs it through the Trellis pipeline and writes the
//! canonical tree and resolved configuration as JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use trellis::{DiagramBuilder, TrellisError};

/// Run the Trellis CLI application
///
/// This function processes the input file through the Trellis pipeline
/// and writes the resulting JSON to the output file.
///
/// # Errors
///
/// Returns `TrellisError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Export errors
pub fn run(args: &Args) -> Result<(), TrellisError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config);
    let diagram = builder.parse(&source)?;
    let json = builder.export_json(&diagram)?;

    fs::write(&args.output, json)?;

    info!(output_file = args.output; "JSON exported successfully");

    Ok(())
}
