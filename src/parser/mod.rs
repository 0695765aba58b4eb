//! Catalog response parser.
//!
//! Decodes a search response (or a bare array of entries) into a [`Catalog`].
//! Elements of `results` are decoded one by one so a single bad record does
//! not hide the rest of the page.

use crate::model::{CatalogResponse, Entry, ParseError};
use serde_json::Value;
use tracing::{debug, warn};

/// Decoded catalog page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    /// Query the response answers, if the document carried one.
    pub query: Option<String>,
    /// Total hit count reported by the server.
    pub total: Option<u64>,
    /// Index of the first entry within the full hit list.
    pub start: Option<u64>,
    /// Successfully decoded entries, in document order.
    pub entries: Vec<Entry>,
    /// Elements that could not be decoded.
    pub malformed: Vec<ParseError>,
}

impl Catalog {
    /// True when no entry decoded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse a catalog document.
///
/// # Errors
///
/// Returns `ParseError::InvalidJson` for invalid JSON and
/// `ParseError::UnexpectedShape` when the top level is neither an object nor
/// an array. Malformed elements are collected in [`Catalog::malformed`].
pub fn parse_catalog(text: &str) -> Result<Catalog, ParseError> {
    let document: Value = serde_json::from_str(text).map_err(|e| ParseError::InvalidJson {
        message: e.to_string(),
    })?;

    let catalog = match document {
        Value::Object(_) => {
            let response: CatalogResponse =
                serde_json::from_value(document).map_err(|e| ParseError::InvalidJson {
                    message: e.to_string(),
                })?;
            let (entries, malformed) = decode_results(response.results.unwrap_or_default());
            Catalog {
                query: response.query.filter(|q| !q.trim().is_empty()),
                total: response.count,
                start: response.start,
                entries,
                malformed,
            }
        }
        Value::Array(items) => {
            let (entries, malformed) = decode_results(items);
            Catalog {
                entries,
                malformed,
                ..Catalog::default()
            }
        }
        other => {
            return Err(ParseError::UnexpectedShape {
                found: json_type_name(&other),
            })
        }
    };

    debug!(
        entries = catalog.entries.len(),
        malformed = catalog.malformed.len(),
        total = ?catalog.total,
        "Parsed catalog"
    );

    Ok(catalog)
}

fn decode_results(items: Vec<Value>) -> (Vec<Entry>, Vec<ParseError>) {
    let mut entries = Vec::with_capacity(items.len());
    let mut malformed = Vec::new();

    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<Entry>(item) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed catalog entry");
                malformed.push(ParseError::MalformedEntry {
                    index,
                    message: e.to_string(),
                });
            }
        }
    }

    (entries, malformed)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIBONACCI: &str = r#"{
        "number": 45,
        "data": "0,1,1,2,3,5,8,13,21,34",
        "name": "Fibonacci numbers: F(n) = F(n-1) + F(n-2) with F(0) = 0 and F(1) = 1.",
        "keyword": "core,nonn,easy,nice",
        "offset": "0,4",
        "author": "_N. J. A. Sloane_",
        "time": "2024-01-01T10:00:00-05:00",
        "created": "1991-04-30T03:00:00-04:00",
        "references": 135,
        "revision": 1200,
        "program": ["(PARI) a(n)=fibonacci(n)"],
        "maple": ["with(combinat): fibonacci(n);"],
        "mathematica": ["Fibonacci[Range[0, 40]]"]
    }"#;

    #[test]
    fn parses_full_response() {
        let text = format!(
            r#"{{"greeting":"Greetings","query":"1 2 3 5 8","count":1,"start":0,"results":[{}]}}"#,
            FIBONACCI
        );
        let catalog = parse_catalog(&text).unwrap();
        assert_eq!(catalog.query.as_deref(), Some("1 2 3 5 8"));
        assert_eq!(catalog.total, Some(1));
        assert_eq!(catalog.start, Some(0));
        assert_eq!(catalog.entries.len(), 1);
        assert!(catalog.malformed.is_empty());

        let entry = &catalog.entries[0];
        assert_eq!(entry.number, 45);
        assert_eq!(entry.references, 135);
        assert_eq!(entry.offset.as_deref(), Some("0,4"));
        assert!(entry.comment.is_none());
    }

    #[test]
    fn null_results_is_an_empty_catalog() {
        let catalog =
            parse_catalog(r#"{"greeting":"hi","query":"1 999 3","count":0,"start":0,"results":null}"#)
                .unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.total, Some(0));
    }

    #[test]
    fn blank_query_is_dropped() {
        let catalog = parse_catalog(r#"{"query":"  ","results":[]}"#).unwrap();
        assert_eq!(catalog.query, None);
    }

    #[test]
    fn parses_bare_entry_array() {
        let text = format!("[{}]", FIBONACCI);
        let catalog = parse_catalog(&text).unwrap();
        assert_eq!(catalog.entries.len(), 1);
        assert_eq!(catalog.query, None);
    }

    #[test]
    fn malformed_element_is_skipped_not_fatal() {
        let text = format!(r#"[{{"number":"oops"}}, {}]"#, FIBONACCI);
        let catalog = parse_catalog(&text).unwrap();
        assert_eq!(catalog.entries.len(), 1);
        assert_eq!(catalog.malformed.len(), 1);
        assert!(matches!(
            catalog.malformed[0],
            ParseError::MalformedEntry { index: 0, .. }
        ));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let result = parse_catalog("{not json");
        assert!(matches!(result, Err(ParseError::InvalidJson { .. })));
    }

    #[test]
    fn scalar_document_is_unexpected_shape() {
        assert_eq!(
            parse_catalog(r#""hello""#),
            Err(ParseError::UnexpectedShape { found: "string" })
        );
        assert_eq!(
            parse_catalog("42"),
            Err(ParseError::UnexpectedShape { found: "number" })
        );
    }
}
