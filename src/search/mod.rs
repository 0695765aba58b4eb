//! Sequence query matching.
//!
//! Locates every contiguous run of data values that equals the numeric tokens
//! of a free-text query. Pure functions only: nothing here allocates state
//! beyond its return value, and nothing here can fail. Garbage in the query
//! degrades to "no tokens, no emphasis".

use tracing::trace;

/// Delimiters accepted between query tokens.
const QUERY_DELIMITERS: [char; 2] = [',', ' '];

// ===== MatchSpan =====

/// Half-open interval `[start, end)` over data value indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchSpan {
    /// First matched value index.
    pub start: usize,
    /// One past the last matched value index.
    pub end: usize,
}

impl MatchSpan {
    /// Whether `index` falls inside this span.
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    /// Number of values covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for a zero-length span.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

// ===== SequenceQuery =====

/// Tokenized numeric query. Never empty.
///
/// Tokens are kept as the text the user typed; matching is exact string
/// equality, so `1.0` does not match `1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceQuery {
    raw: String,
    tokens: Vec<String>,
}

impl SequenceQuery {
    /// Smart constructor: tokenizes `raw`.
    ///
    /// Returns `None` when no numeric token survives.
    pub fn parse(raw: &str) -> Option<Self> {
        let tokens: Vec<String> = raw
            .split(QUERY_DELIMITERS)
            .filter(|token| is_numeric_token(token))
            .map(str::to_string)
            .collect();

        if tokens.is_empty() {
            None
        } else {
            Some(Self {
                raw: raw.to_string(),
                tokens,
            })
        }
    }

    /// The query text as supplied.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Numeric tokens in query order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Find every start position in `data` where the tokens match.
    pub fn locate(&self, data: &str) -> Vec<MatchSpan> {
        let values: Vec<&str> = split_values(data).collect();
        let spans = locate_in_values(&values, &self.tokens);
        trace!(
            query = %self.raw,
            values = values.len(),
            matches = spans.len(),
            "Located query matches"
        );
        spans
    }
}

/// A token counts when it is non-empty and reads as a number literal.
///
/// Accepted, after trimming surrounding whitespace: decimals with optional
/// sign, fraction and exponent (`-3`, `.5`, `1.`, `2E+5`), `Infinity` with
/// optional sign, and unsigned `0x`/`0o`/`0b` integers. A token of only
/// whitespace reads as zero. `inf`, `NaN` and `1_000` are rejected.
fn is_numeric_token(token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    let trimmed = token.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    trimmed.is_empty() || is_radix_integer(trimmed) || is_decimal_literal(trimmed)
}

fn is_radix_integer(text: &str) -> bool {
    let radix = match text.get(..2) {
        Some("0x" | "0X") => 16,
        Some("0o" | "0O") => 8,
        Some("0b" | "0B") => 2,
        _ => return false,
    };
    let digits = &text[2..];
    !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix))
}

fn is_decimal_literal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    if unsigned == "Infinity" {
        return true;
    }

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(at) => (&unsigned[..at], Some(&unsigned[at + 1..])),
        None => (unsigned, None),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let mantissa_ok =
        !(whole.is_empty() && fraction.is_empty()) && all_digits(whole) && all_digits(fraction);
    let exponent_ok = exponent.is_none_or(|exp| {
        let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
        !exp.is_empty() && all_digits(exp)
    });
    mantissa_ok && exponent_ok
}

/// Split a data string into its comma-separated values (no trimming).
pub fn split_values(data: &str) -> impl Iterator<Item = &str> {
    data.split(',')
}

fn locate_in_values<T: AsRef<str>>(values: &[&str], tokens: &[T]) -> Vec<MatchSpan> {
    let len = tokens.len();
    if len == 0 {
        return Vec::new();
    }

    (0..values.len())
        .filter(|&start| {
            tokens
                .iter()
                .enumerate()
                .all(|(offset, token)| values.get(start + offset) == Some(&token.as_ref()))
        })
        .map(|start| MatchSpan {
            start,
            end: start + len,
        })
        .collect()
}

// ===== Public entry points =====

/// Locate all matches of `query` inside `data`.
///
/// An absent, empty or non-numeric query yields no spans. Overlapping
/// matches are all reported, ordered by start index.
pub fn locate_matches(data: &str, query: Option<&str>) -> Vec<MatchSpan> {
    match query.and_then(SequenceQuery::parse) {
        Some(query) => query.locate(data),
        None => Vec::new(),
    }
}

/// Whether the value at `index` lies inside at least one span.
pub fn is_emphasized(index: usize, spans: &[MatchSpan]) -> bool {
    spans.iter().any(|span| span.contains(index))
}

/// One data value ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataValue<'a> {
    /// Value text exactly as split from the data string.
    pub text: &'a str,
    /// Whether the value is part of a match.
    pub emphasized: bool,
}

/// Pair every data value with its emphasis flag, preserving order.
pub fn emphasize_values<'a>(data: &'a str, spans: &[MatchSpan]) -> Vec<DataValue<'a>> {
    split_values(data)
        .enumerate()
        .map(|(index, text)| DataValue {
            text,
            emphasized: is_emphasized(index, spans),
        })
        .collect()
}

// ===== Tests =====

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
