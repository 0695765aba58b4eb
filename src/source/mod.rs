//! Catalog input sources.
//!
//! A catalog response is a single JSON document, so both sources read their
//! input to the end in one go:
//! - File input from a path argument
//! - Stdin for piped input (`curl ... | seqcat`)

use crate::model::error::InputError;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use tracing::debug;

/// Where the catalog document comes from.
///
/// Sum type enforces exactly one variant.
#[derive(Debug)]
pub enum InputSource {
    /// Read from a file on disk.
    File(PathBuf),
    /// Read from piped stdin.
    Stdin,
}

impl InputSource {
    /// Read the whole document.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` for read failures, including invalid UTF-8.
    pub fn read_to_string(&self) -> Result<String, InputError> {
        match self {
            InputSource::File(path) => {
                let text = std::fs::read_to_string(path)?;
                debug!(path = %path.display(), bytes = text.len(), "Read catalog file");
                Ok(text)
            }
            InputSource::Stdin => read_all(std::io::stdin().lock()),
        }
    }

    /// Short human-readable description for the status bar.
    pub fn describe(&self) -> String {
        match self {
            InputSource::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            InputSource::Stdin => "stdin".to_string(),
        }
    }
}

/// Read any reader to the end as UTF-8.
pub fn read_all(mut reader: impl Read) -> Result<String, InputError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    debug!(bytes = text.len(), "Read catalog from stream");
    Ok(text)
}

/// Detect and create the input source.
///
/// # Logic:
/// 1. If a file path is provided: use it (must exist)
/// 2. If stdin is piped: use stdin
/// 3. Else: `InputError::NoInput`
///
/// # Errors
///
/// Returns `InputError::FileNotFound` if the file does not exist and
/// `InputError::NoInput` when stdin is an interactive terminal.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) if !path.exists() => Err(InputError::FileNotFound { path }),
        Some(path) => Ok(InputSource::File(path)),
        None if std::io::stdin().is_terminal() => Err(InputError::NoInput),
        None => Ok(InputSource::Stdin),
    }
}
