//! Error types for kulture construction and kluster mutation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A record failed schema validation.
///
/// Carries the first failing field only. `path` is dotted
/// (`status.energy`) and empty when the record itself is at fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {message}", path_label(.path))]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

fn path_label(path: &str) -> &str {
    if path.is_empty() {
        "record"
    } else {
        path
    }
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Kluster construction failed. Nothing is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KlusterError {
    /// Input was not the expected shape (not an array, or an element is not
    /// a valid kulture)
    #[error("{0}")]
    ArgumentType(&'static str),

    /// Two kultures share an id
    #[error("all ids must be unique, duplicate: {0}")]
    DuplicateId(String),
}

/// A kluster add or delete was refused. The kluster is unchanged.
///
/// These are ordinary outcomes, returned as values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MutationError {
    #[error("called without kulture object")]
    NotAKulture,

    #[error("called for existing kulture")]
    ExistingKulture,

    #[error("called without string argument")]
    NotAString,

    #[error("called for non-existant kulture")]
    NonExistentKulture,
}

/// Error description surfaced across the service boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Operation that failed
    pub api: String,
    /// Kulture id involved, `none` if there was none
    pub id: String,
    pub message: String,
}

impl Default for ErrorEnvelope {
    fn default() -> Self {
        Self {
            api: "unspecified".to_string(),
            id: "none".to_string(),
            message: String::new(),
        }
    }
}

impl ErrorEnvelope {
    /// Envelope for `api` with default id and message.
    pub fn new(api: impl Into<String>) -> Self {
        Self {
            api: api.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}
