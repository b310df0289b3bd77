//! Error types shared by the MGD loaders

use thiserror::Error;

/// Result type alias for run-level operations
pub type Result<T> = std::result::Result<T, MgdError>;

/// Run-level error type
///
/// Record-level problems (malformed records, unresolved ids) have their own
/// typed errors in the loader crates; this enum covers the failures that stop
/// a run.
#[derive(Error, Debug)]
pub enum MgdError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Lookup cache could not be loaded: {0}")]
    LookupLoad(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl MgdError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn lookup_load(message: impl Into<String>) -> Self {
        Self::LookupLoad(message.into())
    }
}
