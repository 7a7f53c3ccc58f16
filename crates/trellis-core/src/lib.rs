//! Trellis Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Trellis parsing
//! pipeline and its consumers. It includes:
//!
//! - **Raw tree**: The grammar adapter's output contract ([`raw`] module)
//! - **Syntax tree**: The canonical, deduplicated compartment tree ([`syntax`] module)
//! - **Config**: The fully-resolved rendering configuration ([`config`] module)
//! - **Style**: Per-classifier visual styles and the built-in style table ([`style`] module)
//! - **Diagram**: The combined pipeline output ([`diagram`] module)

pub mod config;
pub mod diagram;
pub mod raw;
pub mod style;
pub mod syntax;

mod variant;

pub use variant::UnknownVariant;
