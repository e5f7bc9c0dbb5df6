use std::fmt;
use thiserror::Error;

use crate::domain::IdKey;

/// Broad classification of a [`TreeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input had the wrong shape: not a list, not an object, bad id type.
    Type,
    /// An id was seen twice and the build was asked to reject that.
    Duplicate,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type => write!(f, "TypeError"),
            Self::Duplicate => write!(f, "DuplicateError"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("Argument 'rows' has incorrect type (expected array, got {got})")]
    NotASequence { got: &'static str },

    #[error("Row {index} has incorrect type (expected object, got {got})")]
    NotARow { index: usize, got: &'static str },

    #[error("Row {index}: field '{key}' is required (expected string or number, got {got})")]
    InvalidId {
        index: usize,
        key: String,
        got: &'static str,
    },

    #[error("Row {index}: duplicate id {id}")]
    DuplicateId { index: usize, id: IdKey },
}

impl TreeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TreeError::NotASequence { .. }
            | TreeError::NotARow { .. }
            | TreeError::InvalidId { .. } => ErrorKind::Type,
            TreeError::DuplicateId { .. } => ErrorKind::Duplicate,
        }
    }
}

pub type TreeResult<T> = Result<T, TreeError>;

/// Errors raised while loading option sets from TOML.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
