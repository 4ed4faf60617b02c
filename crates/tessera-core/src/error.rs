//! Error types for Tessera

use thiserror::Error;

/// The main error type for Tessera operations
#[derive(Debug, Error)]
pub enum TesseraError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Duplicate node id: {0}")]
    DuplicateNodeId(String),

    #[error("Node {id} ({node_type}) does not support {capability}")]
    CapabilityMismatch {
        id: String,
        node_type: String,
        capability: String,
    },

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    #[error("Unknown issue type: {0}")]
    UnknownIssueType(String),

    #[error("Unknown rule set: {0}")]
    UnknownRuleSet(String),

    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("Config load error: {0}")]
    ConfigLoadError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for Tessera operations
pub type Result<T> = std::result::Result<T, TesseraError>;

impl From<toml::de::Error> for TesseraError {
    fn from(err: toml::de::Error) -> Self {
        TesseraError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for TesseraError {
    fn from(err: toml::ser::Error) -> Self {
        TesseraError::TomlSerError(err.to_string())
    }
}

impl TesseraError {
    pub fn capability(
        id: impl ToString,
        node_type: impl ToString,
        capability: impl Into<String>,
    ) -> Self {
        TesseraError::CapabilityMismatch {
            id: id.to_string(),
            node_type: node_type.to_string(),
            capability: capability.into(),
        }
    }
}
