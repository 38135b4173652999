//! Errors raised by [`encode`](super::encode) and [`decode`](super::decode).

use std::fmt::Display;

use thiserror::Error;

use super::path::Path;
use crate::Value;

/// The first violation found during a walk. Nothing is collected past it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscodeError {
    #[error("Invalid type at '{path}', cannot be null")]
    NullNotAllowed { path: String },

    #[error("Invalid type at '{path}', expected {expected}, got {actual}")]
    TypeMismatch {
        path: String,
        expected: String,
        /// JSON snapshot of the offending value.
        actual: String,
    },

    #[error("Unknown type '{name}' at '{path}'")]
    UnknownType { path: String, name: String },

    #[error("Nesting at '{path}' exceeds the limit of {limit} levels")]
    DepthExceeded { path: String, limit: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NullNotAllowed,
    TypeMismatch,
    UnknownType,
    DepthExceeded,
}

impl TranscodeError {
    pub(crate) fn null(path: &Path<'_>) -> Self {
        TranscodeError::NullNotAllowed {
            path: path.to_string(),
        }
    }

    pub(crate) fn mismatch(path: &Path<'_>, expected: impl Display, value: &Value) -> Self {
        TranscodeError::TypeMismatch {
            path: path.to_string(),
            expected: expected.to_string(),
            actual: value.to_json_string(),
        }
    }

    pub(crate) fn unknown(path: &Path<'_>, name: &str) -> Self {
        TranscodeError::UnknownType {
            path: path.to_string(),
            name: name.to_string(),
        }
    }

    pub(crate) fn too_deep(path: &Path<'_>, limit: usize) -> Self {
        TranscodeError::DepthExceeded {
            path: path.to_string(),
            limit,
        }
    }

    /// Where in the value the violation was found.
    pub fn path(&self) -> &str {
        match self {
            TranscodeError::NullNotAllowed { path }
            | TranscodeError::TypeMismatch { path, .. }
            | TranscodeError::UnknownType { path, .. }
            | TranscodeError::DepthExceeded { path, .. } => path,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            TranscodeError::NullNotAllowed { .. } => ErrorKind::NullNotAllowed,
            TranscodeError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            TranscodeError::UnknownType { .. } => ErrorKind::UnknownType,
            TranscodeError::DepthExceeded { .. } => ErrorKind::DepthExceeded,
        }
    }
}
