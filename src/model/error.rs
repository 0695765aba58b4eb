//! Error types for seqcat.
//!
//! Errors are layered with `thiserror` and compose through `?` and `From`.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error wrapping every shell failure
//!   - [`InputError`] - File/stdin reading failures
//!   - [`ParseError`] - Catalog JSON failures
//!
//! # Recovery Strategy
//!
//! A malformed element inside an otherwise valid response is **non-fatal**: the
//! parser records it, logs it and keeps the remaining entries. Input errors
//! are fatal. The matcher and program parser never fail.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// # Examples
///
/// ```no_run
/// use seqcat::model::error::{AppError, InputError};
///
/// fn run_app() -> Result<(), AppError> {
///     let _input = read_catalog()?;
///     Ok(())
/// }
/// # fn read_catalog() -> Result<(), InputError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read input from file or stdin.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// The input document is not a catalog response.
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] ParseError),
}

/// Errors encountered while reading catalog input.
#[derive(Debug, Error)]
pub enum InputError {
    /// The given file does not exist.
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use seqcat::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.json")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.json"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
    },

    /// No file was given and stdin is an interactive terminal.
    #[error("No input source: provide a file path or pipe a catalog response to stdin")]
    NoInput,

    /// Generic I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors produced while decoding a catalog document.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The document is not valid JSON.
    #[error("Invalid JSON: {message}")]
    InvalidJson {
        /// Decoder message (includes line/column).
        message: String,
    },

    /// Valid JSON, but neither a response object nor an entry array.
    #[error("Unexpected document shape: expected object or array, found {found}")]
    UnexpectedShape {
        /// JSON type that was found.
        found: &'static str,
    },

    /// One element of `results` could not be decoded as an entry.
    #[error("Malformed entry at index {index}: {message}")]
    MalformedEntry {
        /// Position in the `results` array.
        index: usize,
        /// Decoder message.
        message: String,
    },
}
