use thiserror::Error;

/// Error returned when a keyword does not name any variant of an enumeration.
///
/// The configuration resolver never surfaces this error; it degrades to the
/// documented default instead. It is exposed for callers that want strict
/// parsing of individual values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }

    /// The name of the enumeration that failed to parse.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// The rejected input.
    pub fn value(&self) -> &str {
        &self.value
    }
}
