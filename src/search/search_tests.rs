//! Tests for sequence query matching.

use super::*;

fn span(start: usize, end: usize) -> MatchSpan {
    MatchSpan { start, end }
}

// ===== SequenceQuery::parse =====

#[test]
fn parse_splits_on_commas_and_spaces() {
    let query = SequenceQuery::parse("1, 2 3,,4").unwrap();
    assert_eq!(query.tokens(), &["1", "2", "3", "4"]);
}

#[test]
fn parse_drops_non_numeric_tokens() {
    let query = SequenceQuery::parse("fib 1 x 2").unwrap();
    assert_eq!(query.tokens(), &["1", "2"]);
}

#[test]
fn parse_keeps_signed_and_decimal_tokens_verbatim() {
    let query = SequenceQuery::parse("-3 +4 1.0").unwrap();
    assert_eq!(query.tokens(), &["-3", "+4", "1.0"]);
}

#[test]
fn parse_rejects_nan() {
    assert!(SequenceQuery::parse("NaN").is_none());
}

#[test]
fn parse_rejects_rust_only_float_spellings() {
    for text in ["inf", "+inf", "INF", "infinity", "1_000", "1e", ".", "e5", "-0x2"] {
        assert!(SequenceQuery::parse(text).is_none(), "{text:?} should not be numeric");
    }
}

#[test]
fn parse_accepts_number_literal_forms() {
    let query = SequenceQuery::parse("Infinity -Infinity .5 1. 2E+5 0x1F 0o7 0b1").unwrap();
    assert_eq!(
        query.tokens(),
        &["Infinity", "-Infinity", ".5", "1.", "2E+5", "0x1F", "0o7", "0b1"]
    );
}

#[test]
fn parse_keeps_radix_tokens() {
    let query = SequenceQuery::parse("1 0x2").unwrap();
    assert_eq!(query.tokens(), &["1", "0x2"]);
}

#[test]
fn whitespace_only_token_reads_as_number() {
    let query = SequenceQuery::parse("1,\t").unwrap();
    assert_eq!(query.tokens(), &["1", "\t"]);
}

#[test]
fn parse_returns_none_without_numeric_tokens() {
    assert!(SequenceQuery::parse("").is_none());
    assert!(SequenceQuery::parse("   ,, ").is_none());
    assert!(SequenceQuery::parse("abc").is_none());
}

#[test]
fn parse_preserves_raw_text() {
    let query = SequenceQuery::parse("id:A000045 1 2").unwrap();
    assert_eq!(query.as_str(), "id:A000045 1 2");
}

// ===== locate_matches =====

#[test]
fn absent_query_yields_no_spans() {
    assert!(locate_matches("1,2,3", None).is_empty());
}

#[test]
fn empty_query_yields_no_spans() {
    assert!(locate_matches("1,2,3", Some("")).is_empty());
}

#[test]
fn non_numeric_query_yields_no_spans() {
    assert!(locate_matches("1,2,3", Some("abc")).is_empty());
}

#[test]
fn stray_inf_word_is_ignored() {
    assert_eq!(locate_matches("1,2", Some("1 inf")), vec![span(0, 1)]);
}

#[test]
fn finds_every_non_overlapping_match() {
    let spans = locate_matches("1,2,3,2,3,4", Some("2,3"));
    assert_eq!(spans, vec![span(1, 3), span(3, 5)]);
}

#[test]
fn keeps_overlapping_matches() {
    let spans = locate_matches("1,2,2,2", Some("2,2"));
    assert_eq!(spans, vec![span(1, 3), span(2, 4)]);
}

#[test]
fn space_separated_query_matches_like_commas() {
    let spans = locate_matches("0,1,1,2,3,5,8", Some("2 3 5"));
    assert_eq!(spans, vec![span(3, 6)]);
}

#[test]
fn comparison_is_textual_not_numeric() {
    assert!(locate_matches("1,2,3", Some("1.0")).is_empty());
    assert!(locate_matches("01,2", Some("1")).is_empty());
}

#[test]
fn values_are_not_trimmed() {
    assert!(locate_matches("1, 2, 3", Some("2")).is_empty());
    assert_eq!(locate_matches("1,2,3", Some("2")), vec![span(1, 2)]);
}

#[test]
fn query_longer_than_data_matches_nothing() {
    assert!(locate_matches("1,2", Some("1 2 3")).is_empty());
}

#[test]
fn match_at_tail_is_found_but_partial_tail_is_not() {
    assert_eq!(locate_matches("5,6,7", Some("6,7")), vec![span(1, 3)]);
    assert!(locate_matches("5,6,7", Some("7,8")).is_empty());
}

#[test]
fn empty_data_is_a_single_empty_value() {
    assert_eq!(split_values("").collect::<Vec<_>>(), vec![""]);
    assert!(locate_matches("", Some("1")).is_empty());
}

#[test]
fn matching_is_idempotent() {
    let first = locate_matches("1,1,1,1", Some("1 1"));
    let second = locate_matches("1,1,1,1", Some("1 1"));
    assert_eq!(first, second);
    assert_eq!(first, vec![span(0, 2), span(1, 3), span(2, 4)]);
}

// ===== emphasis =====

#[test]
fn is_emphasized_uses_half_open_membership() {
    let spans = [span(1, 3)];
    assert!(!is_emphasized(0, &spans));
    assert!(is_emphasized(1, &spans));
    assert!(is_emphasized(2, &spans));
    assert!(!is_emphasized(3, &spans));
}

#[test]
fn emphasize_values_flags_union_of_spans() {
    let data = "1,2,2,2,5";
    let spans = locate_matches(data, Some("2 2"));
    let flags: Vec<bool> = emphasize_values(data, &spans)
        .iter()
        .map(|v| v.emphasized)
        .collect();
    assert_eq!(flags, vec![false, true, true, true, false]);
}

#[test]
fn emphasize_values_preserves_order_and_text() {
    let values = emphasize_values("3,1,4", &[]);
    let texts: Vec<&str> = values.iter().map(|v| v.text).collect();
    assert_eq!(texts, vec!["3", "1", "4"]);
    assert!(values.iter().all(|v| !v.emphasized));
}

#[test]
fn match_span_len_and_empty() {
    assert_eq!(span(2, 5).len(), 3);
    assert!(span(4, 4).is_empty());
    assert!(!span(4, 5).is_empty());
}
