//! Record-level error types
//!
//! A [`FormatError`] or [`ResolveError`] fails one record; the run driver
//! logs it, counts it, and moves on. Failures that stop a run use
//! [`mgd_common::MgdError`].

use thiserror::Error;

/// A record that does not follow its format's grammar
///
/// Carries the offending record verbatim for manual QC review.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{interpreter} format error: {message}")]
pub struct FormatError {
    pub interpreter: &'static str,
    pub message: String,
    pub record: String,
}

impl FormatError {
    pub fn new(interpreter: &'static str, message: impl Into<String>, record: &str) -> Self {
        Self {
            interpreter,
            message: message.into(),
            record: record.to_string(),
        }
    }

    pub fn missing_section(interpreter: &'static str, section: &str, record: &str) -> Self {
        Self::new(
            interpreter,
            format!("mandatory {} section not found", section),
            record,
        )
    }
}

/// A lookup term with no key in MGI
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{lookup} lookup has no entry for '{term}'")]
pub struct KeyNotFound {
    pub lookup: String,
    pub term: String,
}

impl KeyNotFound {
    pub fn new(lookup: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            lookup: lookup.into(),
            term: term.into(),
        }
    }
}

/// Raw attributes that could not be turned into a key-bearing state
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error(transparent)]
    NotFound(#[from] KeyNotFound),

    #[error("required attribute '{0}' is not set")]
    MissingAttribute(&'static str),
}

/// Any failure confined to a single record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
