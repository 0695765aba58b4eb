//! Language marker detection.
//!
//! A marker is a bracketed language label that opens a new listing, either on
//! a line of its own:
//!
//! ```text
//! (Python)
//! print(1)
//! ```
//!
//! or, when inline markers are enabled, directly in front of the first line of
//! code:
//!
//! ```text
//! (PARI) a(n) = fibonacci(n)
//! ```

use super::language::LanguageTable;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default maximum label length in characters.
pub const DEFAULT_MAX_LABEL_LEN: usize = 40;

/// Punctuation allowed inside a label besides letters, digits and spaces.
const LABEL_PUNCTUATION: &[char] = &['+', '#', '.', '/', '_', '-', ','];

// ===== DelimiterPair =====

/// Opening and closing characters around a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimiterPair {
    /// Opening delimiter.
    pub open: char,
    /// Closing delimiter.
    pub close: char,
}

impl DelimiterPair {
    /// Construct a pair.
    pub const fn new(open: char, close: char) -> Self {
        Self { open, close }
    }
}

impl fmt::Display for DelimiterPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.open, self.close)
    }
}

/// A delimiter string was not exactly two distinct characters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid delimiter pair {0:?}: expected two distinct characters such as \"()\"")]
pub struct InvalidDelimiterPair(pub String);

impl FromStr for DelimiterPair {
    type Err = InvalidDelimiterPair;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(open), Some(close), None) if open != close => Ok(Self::new(open, close)),
            _ => Err(InvalidDelimiterPair(s.to_string())),
        }
    }
}

// ===== Marker =====

/// A detected marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker<'a> {
    /// The line is only the bracketed label.
    Standalone {
        /// Trimmed label text.
        label: &'a str,
    },
    /// The label is followed by the first line of code.
    Inline {
        /// Trimmed label text.
        label: &'a str,
        /// Remainder of the line after the label and its following whitespace.
        code: &'a str,
    },
}

impl<'a> Marker<'a> {
    /// Label text regardless of form.
    pub fn label(&self) -> &'a str {
        match self {
            Marker::Standalone { label } | Marker::Inline { label, .. } => *label,
        }
    }
}

// ===== MarkerSyntax =====

/// Rules for recognizing marker lines.
///
/// A label is accepted when it is non-empty, no longer than
/// `max_label_len`, starts with an ASCII letter, contains only letters,
/// digits, spaces and `+ # . / _ - ,`, and is either known to the language
/// table or capitalized. Inline markers additionally require a known label,
/// since `(Just x) -> ...` is ordinary code in several languages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSyntax {
    /// Recognized delimiter pairs.
    pub delimiters: Vec<DelimiterPair>,
    /// Whether a label may be followed by code on the same line.
    pub inline_markers: bool,
    /// Maximum label length in characters.
    pub max_label_len: usize,
}

impl Default for MarkerSyntax {
    fn default() -> Self {
        Self {
            delimiters: vec![DelimiterPair::new('(', ')'), DelimiterPair::new('[', ']')],
            inline_markers: true,
            max_label_len: DEFAULT_MAX_LABEL_LEN,
        }
    }
}

impl MarkerSyntax {
    /// Classify `line` as a marker, or `None` for ordinary code.
    pub fn detect<'a>(&self, line: &'a str, languages: &LanguageTable) -> Option<Marker<'a>> {
        let text = line.trim_start();
        let open = text.chars().next()?;
        let pair = self.delimiters.iter().find(|pair| pair.open == open)?;

        let inner = &text[open.len_utf8()..];
        let close_at = inner.find(pair.close)?;
        let label = inner[..close_at].trim();
        let rest = &inner[close_at + pair.close.len_utf8()..];

        if !self.is_label(label, languages) {
            return None;
        }

        if rest.trim().is_empty() {
            return Some(Marker::Standalone { label });
        }

        let separated = rest.starts_with(char::is_whitespace);
        if self.inline_markers && separated && languages.is_known(label) {
            return Some(Marker::Inline {
                label,
                code: rest.trim_start(),
            });
        }

        None
    }

    fn is_label(&self, label: &str, languages: &LanguageTable) -> bool {
        let Some(first) = label.chars().next() else {
            return false;
        };

        first.is_ascii_alphabetic()
            && label.chars().count() <= self.max_label_len
            && label
                .chars()
                .all(|c| c.is_alphanumeric() || c == ' ' || LABEL_PUNCTUATION.contains(&c))
            && (first.is_ascii_uppercase() || languages.is_known(label))
    }
}
