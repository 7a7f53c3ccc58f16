//! The combined pipeline output handed to layout and rendering.

use serde::Serialize;

use crate::{config::Config, syntax::Compartment};

/// A parsed document: the canonical tree plus its resolved configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedDiagram {
    root: Compartment,
    config: Config,
}

impl ParsedDiagram {
    pub fn new(root: Compartment, config: Config) -> Self {
        Self { root, config }
    }

    /// The root compartment of the canonical tree.
    pub fn root(&self) -> &Compartment {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Split into the canonical tree and the configuration.
    pub fn into_parts(self) -> (Compartment, Config) {
        (self.root, self.config)
    }
}
