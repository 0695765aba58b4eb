//! Program listing parser.
//!
//! Turns an entry's program sections into an ordered list of
//! language-tagged blocks ready for highlighting:
//!
//! 1. pre-labeled listings (Maple, then Mathematica) come first, unmodified,
//! 2. the generic `program` lines follow, split at every language marker.
//!
//! Lines before the first marker belong to an `unknown` block. Code lines
//! are never trimmed or reordered. Parsing cannot fail.

pub mod language;
pub mod marker;

pub use language::{HighlightMode, LanguageSpec, LanguageTable, UNKNOWN_LANGUAGE};
pub use marker::{DelimiterPair, InvalidDelimiterPair, Marker, MarkerSyntax};

use crate::model::Entry;
use tracing::debug;

// ===== ProgramBlock =====

/// One language-tagged listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramBlock {
    /// Canonical language identifier.
    pub language: String,
    /// Label as written in the source, used as the block title.
    pub label: String,
    /// Code lines in source order.
    pub code: Vec<String>,
}

impl ProgramBlock {
    /// Empty block with the given language and label.
    pub fn new(language: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            label: label.into(),
            code: Vec::new(),
        }
    }

    fn unknown() -> Self {
        Self::new(UNKNOWN_LANGUAGE, UNKNOWN_LANGUAGE)
    }

    /// Code joined with newlines, as handed to the highlighter.
    pub fn source(&self) -> String {
        self.code.join("\n")
    }
}

// ===== ProgramListing =====

/// A listing whose language is already known (e.g. the Maple section).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramListing<'a> {
    /// Declared language (canonical identifier).
    pub language: &'a str,
    /// Block title.
    pub label: &'a str,
    /// Code lines.
    pub code: &'a [String],
}

/// Pre-labeled listings of an entry in display order: Maple, then Mathematica.
pub fn program_listings(entry: &Entry) -> Vec<ProgramListing<'_>> {
    [
        ("maple", "Maple", &entry.maple),
        ("mathematica", "Mathematica", &entry.mathematica),
    ]
    .into_iter()
    .filter_map(|(language, label, code)| {
        code.as_deref().map(|code| ProgramListing {
            language,
            label,
            code,
        })
    })
    .collect()
}

// ===== Parsing =====

/// Split `lines` into blocks, after emitting `extras` in order.
///
/// Extras with no code are skipped. See [`MarkerSyntax`] for what counts as a
/// marker line.
pub fn parse_program_blocks<S: AsRef<str>>(
    lines: &[S],
    extras: &[ProgramListing<'_>],
    syntax: &MarkerSyntax,
    languages: &LanguageTable,
) -> Vec<ProgramBlock> {
    let mut blocks: Vec<ProgramBlock> = extras
        .iter()
        .filter(|listing| !listing.code.is_empty())
        .map(|listing| ProgramBlock {
            language: listing.language.to_string(),
            label: listing.label.to_string(),
            code: listing.code.to_vec(),
        })
        .collect();

    let mut current: Option<ProgramBlock> = None;

    for line in lines {
        let line = line.as_ref();
        match syntax.detect(line, languages) {
            Some(marker) => {
                blocks.extend(current.take());
                let label = marker.label();
                let mut block = ProgramBlock::new(languages.canonicalize(label), label);
                if let Marker::Inline { code, .. } = marker {
                    block.code.push(code.to_string());
                }
                current = Some(block);
            }
            None => current
                .get_or_insert_with(ProgramBlock::unknown)
                .code
                .push(line.to_string()),
        }
    }

    blocks.extend(current);
    blocks
}

// ===== ProgramParser =====

/// Marker rules and language table bundled for repeated use.
#[derive(Debug, Clone, Default)]
pub struct ProgramParser {
    syntax: MarkerSyntax,
    languages: LanguageTable,
}

impl ProgramParser {
    /// Parser with explicit rules.
    pub fn new(syntax: MarkerSyntax, languages: LanguageTable) -> Self {
        Self { syntax, languages }
    }

    /// Marker rules in use.
    pub fn syntax(&self) -> &MarkerSyntax {
        &self.syntax
    }

    /// Language table in use.
    pub fn languages(&self) -> &LanguageTable {
        &self.languages
    }

    /// See [`parse_program_blocks`].
    pub fn parse<S: AsRef<str>>(
        &self,
        lines: &[S],
        extras: &[ProgramListing<'_>],
    ) -> Vec<ProgramBlock> {
        parse_program_blocks(lines, extras, &self.syntax, &self.languages)
    }

    /// All program blocks of an entry.
    pub fn parse_entry(&self, entry: &Entry) -> Vec<ProgramBlock> {
        let lines = entry.program.as_deref().unwrap_or_default();
        let blocks = self.parse(lines, &program_listings(entry));
        debug!(
            entry = %entry.id(),
            blocks = blocks.len(),
            "Parsed program listings"
        );
        blocks
    }

    /// Highlighter mode for a block.
    pub fn highlight_mode(&self, block: &ProgramBlock) -> HighlightMode {
        self.languages.highlight_mode(&block.language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(lines: &[&str]) -> Vec<ProgramBlock> {
        ProgramParser::default().parse(lines, &[])
    }

    fn block(language: &str, label: &str, code: &[&str]) -> ProgramBlock {
        ProgramBlock {
            language: language.to_string(),
            label: label.to_string(),
            code: code.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn splits_at_standalone_markers() {
        let blocks = parse(&["(Python)", "print(1)", "(Maple)", "seq(1,1);"]);
        assert_eq!(
            blocks,
            vec![
                block("python", "Python", &["print(1)"]),
                block("maple", "Maple", &["seq(1,1);"]),
            ]
        );
    }

    #[test]
    fn code_before_first_marker_is_unknown() {
        let blocks = parse(&["x = 1"]);
        assert_eq!(blocks, vec![block("unknown", "unknown", &["x = 1"])]);
    }

    #[test]
    fn leading_code_then_marker_gives_two_blocks() {
        let blocks = parse(&["x = 1", "(Haskell)", "main = pure ()"]);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].language, UNKNOWN_LANGUAGE);
        assert_eq!(blocks[1].language, "haskell");
    }

    #[test]
    fn extras_come_first_in_given_order() {
        let maple = vec!["A:=n->n;".to_string()];
        let mma = vec!["Table[n, n]".to_string()];
        let extras = [
            ProgramListing {
                language: "maple",
                label: "Maple",
                code: &maple,
            },
            ProgramListing {
                language: "mathematica",
                label: "Mathematica",
                code: &mma,
            },
        ];
        let blocks = ProgramParser::default().parse(&["(PARI) a(n)=n"], &extras);
        let languages: Vec<&str> = blocks.iter().map(|b| b.language.as_str()).collect();
        assert_eq!(languages, vec!["maple", "mathematica", "pari"]);
    }

    #[test]
    fn extras_only_when_lines_empty() {
        let mma = vec!["Table[n, n]".to_string()];
        let extras = [ProgramListing {
            language: "mathematica",
            label: "Mathematica",
            code: &mma,
        }];
        let lines: [&str; 0] = [];
        let blocks = ProgramParser::default().parse(&lines, &extras);
        assert_eq!(
            blocks,
            vec![block("mathematica", "Mathematica", &["Table[n, n]"])]
        );
    }

    #[test]
    fn empty_extras_are_skipped() {
        let empty: Vec<String> = Vec::new();
        let extras = [ProgramListing {
            language: "maple",
            label: "Maple",
            code: &empty,
        }];
        let lines: [&str; 0] = [];
        assert!(ProgramParser::default().parse(&lines, &extras).is_empty());
    }

    #[test]
    fn no_input_gives_no_blocks() {
        assert!(parse(&[]).is_empty());
    }

    #[test]
    fn marker_without_code_gives_empty_block() {
        let blocks = parse(&["(Python)", "(Ruby)", "puts 1"]);
        assert_eq!(
            blocks,
            vec![
                block("python", "Python", &[]),
                block("ruby", "Ruby", &["puts 1"]),
            ]
        );
    }

    #[test]
    fn code_lines_keep_whitespace() {
        let blocks = parse(&["(Python)", "def f(n):", "    return n  "]);
        assert_eq!(blocks[0].code, vec!["def f(n):", "    return n  "]);
    }

    #[test]
    fn inline_markers_start_blocks_with_code() {
        let blocks = parse(&[
            "(PARI) a(n)=fibonacci(n) \\\\ Author",
            "(Haskell)",
            "fibs = 0 : 1 : zipWith (+) fibs (tail fibs)",
            "(Python) def a(n): return n",
            "    # continuation",
        ]);
        assert_eq!(
            blocks,
            vec![
                block("pari", "PARI", &["a(n)=fibonacci(n) \\\\ Author"]),
                block(
                    "haskell",
                    "Haskell",
                    &["fibs = 0 : 1 : zipWith (+) fibs (tail fibs)"]
                ),
                block(
                    "python",
                    "Python",
                    &["def a(n): return n", "    # continuation"]
                ),
            ]
        );
    }

    #[test]
    fn unknown_label_keeps_lowercased_id() {
        let blocks = parse(&["(Brainfuck)", "+[-->-[>>+>-----<<]<--<---]>-"]);
        assert_eq!(blocks[0].language, "brainfuck");
        assert_eq!(blocks[0].label, "Brainfuck");
        assert_eq!(
            ProgramParser::default().highlight_mode(&blocks[0]),
            HighlightMode::PlainText
        );
    }

    #[test]
    fn parse_entry_orders_maple_mathematica_program() {
        let mut entry = Entry::new(45, "Fibonacci numbers", "0,1,1,2");
        entry.program = Some(vec!["(Python)".to_string(), "print(1)".to_string()]);
        entry.mathematica = Some(vec!["Fibonacci[Range[0, 20]]".to_string()]);
        entry.maple = Some(vec!["with(combinat): fibonacci(n);".to_string()]);

        let blocks = ProgramParser::default().parse_entry(&entry);
        let languages: Vec<&str> = blocks.iter().map(|b| b.language.as_str()).collect();
        assert_eq!(languages, vec!["maple", "mathematica", "python"]);
        let labels: Vec<&str> = blocks.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Maple", "Mathematica", "Python"]);
    }

    #[test]
    fn parse_entry_without_programs_is_empty() {
        let entry = Entry::new(1, "x", "1");
        assert!(ProgramParser::default().parse_entry(&entry).is_empty());
    }

    #[test]
    fn program_listings_follow_presence() {
        let mut entry = Entry::new(1, "x", "1");
        assert!(program_listings(&entry).is_empty());
        entry.mathematica = Some(vec![]);
        let listings = program_listings(&entry);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].language, "mathematica");
        assert_eq!(listings[0].label, "Mathematica");
    }

    #[test]
    fn source_joins_with_newlines() {
        let b = block("python", "Python", &["a = 1", "b = 2"]);
        assert_eq!(b.source(), "a = 1\nb = 2");
    }
}
