//! Parser Tests
//!
//! Tests verify:
//! - Line classification priority
//! - Group headers and the default group
//! - Value splitting, quote-span merging and trailing comments
//! - Bare list lines
//! - Format errors

use inistore::format::{classify, parse_str, Line, Parser};
use inistore::{IniError, Store, DEFAULT_GROUP_NAME};

// =============================================================================
// Helper Functions
// =============================================================================

fn parse(text: &str) -> Store {
    let store = Store::new();
    parse_str(text, &store).unwrap();
    store
}

fn values(store: &Store, group: &str, key: &str) -> Vec<String> {
    store.values(group, key).unwrap()
}

// =============================================================================
// Classification Tests
// =============================================================================

#[test]
fn test_classify_comments() {
    assert_eq!(classify("# note"), Line::Comment);
    assert_eq!(classify("; note"), Line::Comment);
    assert_eq!(classify("// note"), Line::Comment);
    assert_eq!(classify("#key=value"), Line::Comment);
}

#[test]
fn test_classify_header() {
    assert_eq!(classify("[main]"), Line::Header("main"));
    assert_eq!(classify("[ spaced ]"), Line::Header(" spaced "));
    assert_eq!(classify("[a]b]"), Line::Header("a"));
    assert_eq!(classify("[]"), Line::Header(""));
}

#[test]
fn test_classify_unclosed_header_falls_through() {
    assert_eq!(classify("[open"), Line::Ignored);
    assert_eq!(classify("[a=1"), Line::KeyValue { key: "[a", value: "1" });
}

#[test]
fn test_classify_key_value() {
    assert_eq!(classify("k=1,2"), Line::KeyValue { key: "k", value: "1,2" });
    assert_eq!(classify("k = v "), Line::KeyValue { key: "k", value: " v " });
    assert_eq!(classify("k=a=b"), Line::KeyValue { key: "k", value: "a=b" });
}

#[test]
fn test_classify_key_guard() {
    // A comma before the '=' means the line is a list, not a key
    assert_eq!(classify("a,b=c"), Line::Array("a,b=c"));
    // ...unless the key is one quoted token
    assert_eq!(
        classify("\"a,b\"=c"),
        Line::KeyValue { key: "\"a,b\"", value: "c" }
    );
}

#[test]
fn test_classify_array_and_ignored() {
    assert_eq!(classify("1,2,3"), Line::Array("1,2,3"));
    assert_eq!(classify("plain words"), Line::Ignored);
    assert_eq!(classify(""), Line::Ignored);
}

// =============================================================================
// Group Tests
// =============================================================================

#[test]
fn test_parse_single_group() {
    let store = parse("[a]\nk=1,2,3");

    assert_eq!(store.group_names(), vec!["a"]);
    assert_eq!(values(&store, "a", "k"), vec!["1", "2", "3"]);
}

#[test]
fn test_header_name_is_trimmed() {
    let store = parse("[  spaced  ]\nk=v");

    assert_eq!(store.group_names(), vec!["spaced"]);
    assert_eq!(store.value("spaced", "k"), Some("v".to_string()));
}

#[test]
fn test_reopened_group_appends() {
    let store = parse("[a]\nx=1\n[b]\ny=2\n[a]\nz=3");

    assert_eq!(store.group_names(), vec!["a", "b"]);
    let group = store.group("a").unwrap();
    assert_eq!(group.keys(), vec!["x", "z"]);
}

#[test]
fn test_records_before_header_go_to_default_group() {
    let store = parse("top=1\n[a]\nk=2");

    assert_eq!(store.group_names(), vec![DEFAULT_GROUP_NAME, "a"]);
    assert_eq!(store.value("", "top"), Some("1".to_string()));
}

#[test]
fn test_no_default_group_without_records() {
    let store = parse("# only a comment\n\n[a]\nk=1");

    assert_eq!(store.group_names(), vec!["a"]);
}

#[test]
fn test_empty_header_selects_default_group() {
    let store = parse("[]\nk=1");

    assert_eq!(store.group_names(), vec![""]);
    assert_eq!(store.value("", "k"), Some("1".to_string()));
}

// =============================================================================
// Value Tests
// =============================================================================

#[test]
fn test_duplicate_key_keeps_first_value() {
    let store = parse("[a]\nk=first\nk=second");

    assert_eq!(values(&store, "a", "k"), vec!["first"]);
}

#[test]
fn test_values_are_not_trimmed() {
    let store = parse("[a]\nk = 1, 2");

    assert_eq!(values(&store, "a", "k"), vec![" 1", " 2"]);
}

#[test]
fn test_inner_empty_fields_kept_trailing_dropped() {
    let store = parse("[a]\nk=1,,3,,");

    assert_eq!(values(&store, "a", "k"), vec!["1", "", "3"]);
}

#[test]
fn test_empty_value() {
    let store = parse("[a]\nk=");

    assert_eq!(values(&store, "a", "k"), vec![""]);
    assert_eq!(store.value("a", "k"), None);
    assert_eq!(store.value_or("a", "k", "unset"), "unset");
}

#[test]
fn test_only_commas_gives_single_empty_value() {
    let store = parse("[a]\nk=,,");

    assert_eq!(values(&store, "a", "k"), vec![""]);
}

#[test]
fn test_line_terminators() {
    let store = parse("[a]\r\nx=1\ry=2\nz=3\r\n");

    assert_eq!(store.group("a").unwrap().keys(), vec!["x", "y", "z"]);
}

#[test]
fn test_surrounding_whitespace_trimmed() {
    let store = parse("   [a]   \n\t k=v \t");

    assert_eq!(values(&store, "a", "k"), vec!["v"]);
}

// =============================================================================
// Quote Tests
// =============================================================================

#[test]
fn test_quoted_value_keeps_comma() {
    let store = parse("[a]\nk=\"x,y\",z");

    assert_eq!(values(&store, "a", "k"), vec!["x,y", "z"]);
}

#[test]
fn test_quoted_span_across_several_commas() {
    let store = parse("[a]\nk=first,\"a, b, c\",last");

    assert_eq!(values(&store, "a", "k"), vec!["first", "a, b, c", "last"]);
}

#[test]
fn test_quoted_span_with_padding() {
    let store = parse("[a]\nk= \"x, y\" ,z");

    assert_eq!(values(&store, "a", "k"), vec!["x, y", "z"]);
}

#[test]
fn test_fully_quoted_single_value_is_verbatim() {
    let store = parse("[a]\nk=\"plain\"");

    assert_eq!(values(&store, "a", "k"), vec!["\"plain\""]);
}

#[test]
fn test_unclosed_quote_leaves_fields_split() {
    let store = parse("[a]\nk=\"open,b,c");

    assert_eq!(values(&store, "a", "k"), vec!["\"open", "b", "c"]);
}

#[test]
fn test_two_quoted_spans() {
    let store = parse("[a]\nk=\"a,b\",\"c,d\"");

    assert_eq!(values(&store, "a", "k"), vec!["a,b", "c,d"]);
}

// =============================================================================
// Comment Tests
// =============================================================================

#[test]
fn test_trailing_comment_stripped() {
    let store = parse("[a]\nk=1,2 // trailing note");

    assert_eq!(values(&store, "a", "k"), vec!["1", "2"]);
}

#[test]
fn test_trailing_comment_single_value() {
    let store = parse("[a]\nk=value // note");

    assert_eq!(values(&store, "a", "k"), vec!["value"]);
}

#[test]
fn test_comment_marker_without_space_is_kept() {
    let store = parse("[a]\nurl=http://example.com");

    assert_eq!(values(&store, "a", "url"), vec!["http://example.com"]);
}

#[test]
fn test_only_last_field_is_comment_stripped() {
    let store = parse("[a]\nk=1 // one,2");

    assert_eq!(values(&store, "a", "k"), vec!["1 // one", "2"]);
}

#[test]
fn test_comment_lines_skipped() {
    let store = parse("# a\n; b\n// c\n[a]\n#k=1\nk=2");

    assert_eq!(store.group_names(), vec!["a"]);
    assert_eq!(values(&store, "a", "k"), vec!["2"]);
}

// =============================================================================
// Bare List Tests
// =============================================================================

#[test]
fn test_bare_list_in_default_group() {
    let store = parse("1,2,3");

    assert_eq!(store.group_names(), vec![""]);
    assert_eq!(values(&store, "", "1,2,3"), vec!["1", "2", "3"]);
}

#[test]
fn test_bare_list_keeps_whole_line_as_key() {
    let store = parse("[a]\nred, green // colours");

    let group = store.group("a").unwrap();
    assert_eq!(group.keys(), vec!["red, green // colours"]);
    assert_eq!(
        values(&store, "a", "red, green // colours"),
        vec!["red", "green"]
    );
}

#[test]
fn test_guard_rejected_key_becomes_bare_list() {
    let store = parse("[a]\nx,y=z");

    assert_eq!(values(&store, "a", "x,y=z"), vec!["x", "y=z"]);
}

#[test]
fn test_unrecognised_lines_ignored() {
    let store = Store::new();
    let stats = parse_str("[a]\njust text\n\nk=v", &store).unwrap();

    assert_eq!(store.group("a").unwrap().record_count(), 1);
    assert_eq!(stats.ignored, 2);
}

// =============================================================================
// Error Tests
// =============================================================================

#[test]
fn test_empty_key_is_format_error() {
    let store = Store::new();
    let err = parse_str("[a]\nk=1\n=value\nlater=2", &store).unwrap_err();

    match err {
        IniError::UnsupportedFormat { line_number, line } => {
            assert_eq!(line_number, 3);
            assert_eq!(line, "=value");
        }
        other => panic!("unexpected error: {other}"),
    }

    // Lines before the error stay applied, lines after are not read
    assert!(store.record("a", "k").is_some());
    assert!(store.record("a", "later").is_none());
}

#[test]
fn test_indented_empty_key_is_format_error() {
    let store = Store::new();
    let err = parse_str("   =x", &store).unwrap_err();

    assert!(err.is_format_error());
}

#[test]
fn test_invalid_utf8_is_io_error() {
    let store = Store::new();
    let bytes: &[u8] = &[b'[', 0xff, b']'];
    let err = Parser::new(&store).parse_reader(bytes).unwrap_err();

    match err {
        IniError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::InvalidData),
        other => panic!("unexpected error: {other}"),
    }
}

// =============================================================================
// Adjacent Quote Pair Tests
// =============================================================================

#[test]
fn test_adjacent_quotes_disabled_by_default() {
    let store = parse("[a]\nk=\"a,b\" // note");

    assert_eq!(values(&store, "a", "k"), vec!["\"a", "b\""]);
}

#[test]
fn test_adjacent_quotes_skip_closed_token() {
    let store = Store::new();
    Parser::new(&store)
        .merge_adjacent_quotes(true)
        .parse_str("[a]\nk=\"a\",b\"")
        .unwrap();

    assert_eq!(values(&store, "a", "k"), vec!["\"a\"", "b\""]);
}

#[test]
fn test_adjacent_quotes_join_after_comment_strip() {
    let store = Store::new();
    Parser::new(&store)
        .merge_adjacent_quotes(true)
        .parse_str("[a]\nk=\"a,b\" // note")
        .unwrap();

    assert_eq!(values(&store, "a", "k"), vec!["\"a,b\""]);
}

// =============================================================================
// Stats Tests
// =============================================================================

#[test]
fn test_parse_stats() {
    let store = Store::new();
    let stats = parse_str("# c\n[a]\nk=1\n1,2\n\n[b]", &store).unwrap();

    assert_eq!(stats.lines, 6);
    assert_eq!(stats.comments, 1);
    assert_eq!(stats.headers, 2);
    assert_eq!(stats.records, 2);
    assert_eq!(stats.ignored, 1);
}
