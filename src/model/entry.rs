//! Catalog entry record and identifier types.
//!
//! Entries are read-only once deserialized. Optional sections are kept as
//! `Option<Vec<String>>` so "absent" and "present but empty" stay distinct.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use std::fmt;

// ===== EntryId =====

/// Catalog identifier (the "A-number").
///
/// Displays as `A` followed by the number zero-padded to six digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(u64);

impl EntryId {
    /// Wrap a raw catalog number.
    pub fn new(number: u64) -> Self {
        Self(number)
    }

    /// The raw catalog number.
    pub fn number(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A{:06}", self.0)
    }
}

// ===== Entry =====

/// One catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Entry {
    /// Catalog number.
    pub number: u64,
    /// Sequence terms as comma-separated text.
    pub data: String,
    /// Display name.
    pub name: String,

    /// Comma-separated keyword list (`nonn,easy,core`).
    #[serde(default)]
    pub keyword: String,
    /// Author line.
    #[serde(default)]
    pub author: String,
    /// Last revision timestamp (RFC 3339).
    #[serde(default)]
    pub time: String,
    /// Creation timestamp (RFC 3339).
    #[serde(default)]
    pub created: String,

    /// Number of references the catalog knows about.
    #[serde(default)]
    pub references: u32,
    /// Revision counter.
    #[serde(default)]
    pub revision: u32,

    /// Index offset of the first term (`"0,4"`).
    #[serde(default)]
    pub offset: Option<String>,

    /// Worked examples.
    #[serde(default)]
    pub example: Option<Vec<String>>,
    /// External links.
    #[serde(default)]
    pub link: Option<Vec<String>>,
    /// Formulas.
    #[serde(default)]
    pub formula: Option<Vec<String>>,
    /// Maple listing.
    #[serde(default)]
    pub maple: Option<Vec<String>>,
    /// Mathematica listing.
    #[serde(default)]
    pub mathematica: Option<Vec<String>>,
    /// Other programs, each introduced by a bracketed language label.
    #[serde(default)]
    pub program: Option<Vec<String>>,
    /// Cross references.
    #[serde(default)]
    pub xref: Option<Vec<String>>,
    /// Extensions.
    #[serde(default)]
    pub ext: Option<Vec<String>>,
    /// Comments.
    #[serde(default)]
    pub comment: Option<Vec<String>>,
    /// Literature references.
    #[serde(default)]
    pub reference: Option<Vec<String>>,
}

impl Entry {
    /// Minimal entry with only the required fields set.
    pub fn new(number: u64, name: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            number,
            data: data.into(),
            name: name.into(),
            keyword: String::new(),
            author: String::new(),
            time: String::new(),
            created: String::new(),
            references: 0,
            revision: 0,
            offset: None,
            example: None,
            link: None,
            formula: None,
            maple: None,
            mathematica: None,
            program: None,
            xref: None,
            ext: None,
            comment: None,
            reference: None,
        }
    }

    /// Catalog identifier.
    pub fn id(&self) -> EntryId {
        EntryId::new(self.number)
    }

    /// Keywords with empty items dropped.
    pub fn keywords(&self) -> Vec<&str> {
        self.keyword
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .collect()
    }

    /// Last revision time, if `time` is a valid RFC 3339 timestamp.
    pub fn last_revised(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(self.time.trim()).ok()
    }

    /// True if any program listing has at least one line.
    pub fn has_program_code(&self) -> bool {
        [&self.program, &self.maple, &self.mathematica]
            .into_iter()
            .any(|listing| listing.as_ref().is_some_and(|lines| !lines.is_empty()))
    }
}

// ===== CatalogResponse =====

/// Raw search response envelope as served by the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogResponse {
    /// Server greeting line.
    #[serde(default)]
    pub greeting: Option<String>,
    /// The query the response answers.
    #[serde(default)]
    pub query: Option<String>,
    /// Total number of hits.
    #[serde(default)]
    pub count: Option<u64>,
    /// Index of the first returned hit.
    #[serde(default)]
    pub start: Option<u64>,
    /// Result records; `null` when nothing matched.
    #[serde(default)]
    pub results: Option<Vec<serde_json::Value>>,
}
