//! Line parser
//!
//! Turns text into groups and records on a [`Store`].
//!
//! ## Line Classification (first match wins)
//! 1. `#`, `;` or `//` prefix: comment, skipped
//! 2. `[` prefix with a `]` somewhere: group header, becomes the current group
//! 3. contains `=` and the key guard accepts: key/value record
//! 4. contains `,`: bare list, the whole line is the key
//! 5. anything else: ignored
//!
//! ## Value Pipeline (key/value lines)
//! ```text
//!  raw value ──split ','──► fields ──quote-span merge──► fields
//!            ──strip " //" on last──► [adjacent quote pairs]──► record values
//! ```

use std::io::Read;
use std::sync::Arc;

use crate::error::{IniError, Result};
use crate::model::{Group, Store, DEFAULT_GROUP_NAME};
use super::text::{self, is_quoted_token, quote_count, split_fields, strip_trailing_comment};
use super::{COMMENT_PREFIXES, GROUP_END, GROUP_START, KEY_VALUE_DIVIDER, QUOTE, VALUE_DELIMITER};

// =============================================================================
// Classification
// =============================================================================

/// Shape of a single trimmed line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// Whole-line comment
    Comment,

    /// `[name]`, name not yet trimmed
    Header(&'a str),

    /// `key=value`, key trimmed, value raw
    KeyValue { key: &'a str, value: &'a str },

    /// Comma list without an accepted key
    Array(&'a str),

    /// Blank or unrecognised
    Ignored,
}

/// Classify an already trimmed line
pub fn classify(line: &str) -> Line<'_> {
    if COMMENT_PREFIXES.iter().any(|prefix| line.starts_with(prefix)) {
        return Line::Comment;
    }

    if line.starts_with(GROUP_START) {
        if let Some(end) = line.find(GROUP_END) {
            return Line::Header(&line[GROUP_START.len_utf8()..end]);
        }
    }

    if let Some(index) = line.find(KEY_VALUE_DIVIDER) {
        let key = line[..index].trim();
        if accepts_key(key) {
            return Line::KeyValue {
                key,
                value: &line[index + KEY_VALUE_DIVIDER.len_utf8()..],
            };
        }
    }

    if line.contains(VALUE_DELIMITER) {
        return Line::Array(line);
    }

    Line::Ignored
}

/// A candidate key with a comma is a value list, unless it is one quoted token
fn accepts_key(key: &str) -> bool {
    !key.contains(VALUE_DELIMITER) || is_quoted_token(key)
}

// =============================================================================
// Parser
// =============================================================================

/// Counters gathered over one parse
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParseStats {
    /// Lines read, blank ones included
    pub lines: usize,

    /// Comment lines skipped
    pub comments: usize,

    /// Group headers seen (reopened groups counted again)
    pub headers: usize,

    /// Key/value and bare list lines
    pub records: usize,

    /// Blank and unrecognised lines
    pub ignored: usize,
}

/// Stateful parser writing into a borrowed store
///
/// The store is mutated line by line, so concurrent readers can see a
/// partially loaded document. Records that already exist keep their values.
pub struct Parser<'s> {
    store: &'s Store,
    merge_adjacent_quotes: bool,
    current: Option<Arc<Group>>,
    stats: ParseStats,
}

impl<'s> Parser<'s> {
    /// Create a parser whose current group is the default group
    pub fn new(store: &'s Store) -> Self {
        Self {
            store,
            merge_adjacent_quotes: false,
            current: None,
            stats: ParseStats::default(),
        }
    }

    /// Enable the adjacent quote pair fallback
    pub fn merge_adjacent_quotes(mut self, enabled: bool) -> Self {
        self.merge_adjacent_quotes = enabled;
        self
    }

    /// Read the whole stream, then parse it
    ///
    /// Invalid UTF-8 surfaces as an I/O error of kind `InvalidData`.
    pub fn parse_reader<R: Read>(self, mut reader: R) -> Result<ParseStats> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.parse_str(&text)
    }

    /// Parse a complete document
    ///
    /// Stops at the first format error; lines before it stay applied.
    pub fn parse_str(mut self, input: &str) -> Result<ParseStats> {
        for (index, raw) in text::lines(input).enumerate() {
            self.parse_line(index + 1, raw)?;
        }
        Ok(self.stats)
    }

    fn parse_line(&mut self, line_number: usize, raw: &str) -> Result<()> {
        self.stats.lines += 1;
        let line = raw.trim();
        let kind = classify(line);
        tracing::trace!("line {}: {:?}", line_number, kind);

        match kind {
            Line::Comment => self.stats.comments += 1,
            Line::Header(name) => {
                self.current = Some(self.store.get_or_create_group(name));
                self.stats.headers += 1;
            }
            Line::KeyValue { key, value } => {
                if key.is_empty() {
                    return Err(IniError::UnsupportedFormat {
                        line_number,
                        line: line.to_string(),
                    });
                }
                let values = self.parse_values(value);
                self.current_group().get_or_create_record(key, values);
                self.stats.records += 1;
            }
            Line::Array(list) => {
                let mut values: Vec<&str> = split_fields(list, VALUE_DELIMITER);
                if let Some(last) = values.last_mut() {
                    *last = strip_trailing_comment(*last);
                }
                self.current_group().get_or_create_record(list, values);
                self.stats.records += 1;
            }
            Line::Ignored => self.stats.ignored += 1,
        }

        Ok(())
    }

    /// Run a raw value through the field pipeline
    fn parse_values(&self, value: &str) -> Vec<String> {
        let fields = split_fields(value, VALUE_DELIMITER);
        let mut values = merge_quoted_spans(&fields);

        if let Some(last) = values.last_mut() {
            let stripped = strip_trailing_comment(last).to_string();
            *last = stripped;
        }

        if self.merge_adjacent_quotes {
            values = merge_adjacent_quote_pairs(values);
        }
        values
    }

    /// Current group, registering the default group on first use
    fn current_group(&mut self) -> Arc<Group> {
        let store = self.store;
        Arc::clone(
            self.current
                .get_or_insert_with(|| store.get_or_create_group(DEFAULT_GROUP_NAME)),
        )
    }
}

/// Parse a stream into `store`
pub fn parse<R: Read>(reader: R, store: &Store) -> Result<ParseStats> {
    Parser::new(store).parse_reader(reader)
}

/// Parse text into `store`
pub fn parse_str(text: &str, store: &Store) -> Result<ParseStats> {
    Parser::new(store).parse_str(text)
}

// =============================================================================
// Quote Handling
// =============================================================================

/// Rejoin fields that were split inside a double-quoted value.
///
/// A field with exactly one quote opens a span; a later field with exactly one
/// quote and a trailing quote closes it; quote-free fields in between are
/// carried along. The closed span becomes one field without its outer quotes.
/// Anything else abandons the open span, and a span still open at the end is
/// left split.
fn merge_quoted_spans(fields: &[&str]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(fields.len());
    let mut span: Vec<&str> = Vec::new();

    for &field in fields {
        let quotes = quote_count(field);

        if !span.is_empty() {
            if quotes == 0 {
                span.push(field);
                continue;
            }
            if quotes == 1 && field.trim().ends_with(QUOTE) {
                span.push(field);
                merged.push(join_span(&span));
                span.clear();
                continue;
            }
            merged.extend(span.drain(..).map(str::to_string));
        }

        if quotes == 1 {
            span.push(field);
        } else {
            merged.push(field.to_string());
        }
    }

    merged.extend(span.into_iter().map(str::to_string));
    merged
}

/// Comma-join a closed span, dropping its opening and closing quote
fn join_span(span: &[&str]) -> String {
    let last_index = span.len() - 1;
    let mut parts: Vec<&str> = Vec::with_capacity(span.len());
    let opening = span[0].trim_start().replacen(QUOTE, "", 1);

    for (index, field) in span.iter().enumerate().skip(1) {
        if index == last_index {
            let closing = field.trim_end();
            parts.push(&closing[..closing.len() - QUOTE.len_utf8()]);
        } else {
            parts.push(field);
        }
    }

    let mut joined = opening;
    for part in parts {
        joined.push(VALUE_DELIMITER);
        joined.push_str(part);
    }
    joined
}

/// Join a `"a` field with a following `b"` field
fn merge_adjacent_quote_pairs(values: Vec<String>) -> Vec<String> {
    let mut merged = Vec::with_capacity(values.len());
    let mut iter = values.into_iter().peekable();

    while let Some(current) = iter.next() {
        let opens = current.starts_with(QUOTE) && !current.ends_with(QUOTE);
        if opens {
            if let Some(next) =
                iter.next_if(|next| !next.starts_with(QUOTE) && next.ends_with(QUOTE))
            {
                merged.push(format!("{}{}{}", current, VALUE_DELIMITER, next));
                continue;
            }
        }
        merged.push(current);
    }

    merged
}
