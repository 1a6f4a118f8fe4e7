//! Error types for Quire operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used across
//! all Quire crates. Uses `thiserror` for derive macros.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while reading, validating, or rendering content.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error tied to a specific file.
    #[error("I/O error at {path}: {source}")]
    IoWithPath {
        /// The underlying error.
        source: std::io::Error,
        /// File or directory being accessed.
        path: PathBuf,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Content not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data or format.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A required front-matter key is absent.
    #[error("Missing required field '{field}' in {}", path.display())]
    MissingField {
        /// Front-matter key, as written in documents (e.g. `Title`).
        field: String,
        /// Document the key is missing from.
        path: PathBuf,
    },

    /// Corpus validation failed.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A command or operation could not complete.
    #[error("Operation failed: {0}")]
    Operation(String),
}

impl Error {
    /// Wrap a bare I/O error.
    pub fn io(err: std::io::Error) -> Self {
        Self::Io(err)
    }

    /// Wrap an I/O error together with the path that caused it.
    pub fn io_with_path(err: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::IoWithPath {
            source: err,
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an invalid data error.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Create a missing-field error for a document.
    pub fn missing_field(field: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self::MissingField {
            field: field.into(),
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Create an operation error.
    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }

    /// Returns true if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns true if this error came from document content rather than
    /// the environment (missing keys, bad dates, bad slugs).
    pub fn is_content_error(&self) -> bool {
        matches!(self, Self::MissingField { .. } | Self::InvalidData(_))
    }
}

/// Result type alias using Quire's Error type.
pub type Result<T> = std::result::Result<T, Error>;
