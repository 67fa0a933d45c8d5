//! String helpers shared by the parser

use super::{QUOTE, TRAILING_COMMENT};

/// Iterator over lines ending in `\r\n`, `\n` or `\r`
pub(crate) struct Lines<'a> {
    rest: Option<&'a str>,
}

pub(crate) fn lines(text: &str) -> Lines<'_> {
    Lines { rest: Some(text) }
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(index) => {
                let terminator = if rest[index..].starts_with("\r\n") { 2 } else { 1 };
                let tail = &rest[index + terminator..];
                // A final terminator does not open another line
                self.rest = if tail.is_empty() { None } else { Some(tail) };
                Some(&rest[..index])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}

/// Split on `delimiter`, dropping empty fields at the very end.
///
/// Text without the delimiter comes back as a single field, even when empty.
/// Empty fields between delimiters are kept.
pub(crate) fn split_fields(text: &str, delimiter: char) -> Vec<&str> {
    if !text.contains(delimiter) {
        return vec![text];
    }
    let mut fields: Vec<&str> = text.split(delimiter).collect();
    while matches!(fields.last(), Some(field) if field.is_empty()) {
        fields.pop();
    }
    fields
}

/// Cut a trailing ` //` note and trim what is left
pub(crate) fn strip_trailing_comment(field: &str) -> &str {
    match field.find(TRAILING_COMMENT) {
        Some(index) => field[..index].trim(),
        None => field,
    }
}

pub(crate) fn quote_count(field: &str) -> usize {
    field.matches(QUOTE).count()
}

/// `"x,y"` style token: quoted at both ends
pub(crate) fn is_quoted_token(text: &str) -> bool {
    text.len() >= 2 && text.starts_with(QUOTE) && text.ends_with(QUOTE)
}
