//! Error types for Lumen operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used across
//! all Lumen crates. Uses `thiserror` for derive macros.
//!
//! Input errors (form validation, bad passkeys) are not represented here;
//! they live next to the code that produces them. This type covers
//! operational failures: I/O, configuration, parsing, and the two external
//! dependencies (document store and mail transport).

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur in Lumen operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error tied to a specific path.
    #[error("I/O error at {path}: {message}")]
    IoWithPath {
        /// Path that was being accessed.
        path: PathBuf,
        /// Underlying error message.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Content not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Content could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid data or format.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Document store failure (connection or write).
    #[error("Database error: {0}")]
    Database(String),

    /// Mail transport failure.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl Error {
    /// Wrap an I/O error.
    pub fn io(err: impl Into<std::io::Error>) -> Self {
        Self::Io(err.into())
    }

    /// Wrap an I/O error with the path that caused it.
    pub fn io_with_path(err: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::IoWithPath {
            path: path.as_ref().to_path_buf(),
            message: err.to_string(),
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

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an invalid data error.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Create a database error.
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Returns true if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns true if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns true if the failure came from an external dependency
    /// (document store or mail transport).
    pub fn is_dependency(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Transport(_))
    }
}

/// Result type alias using Lumen's Error type.
pub type Result<T> = std::result::Result<T, Error>;
