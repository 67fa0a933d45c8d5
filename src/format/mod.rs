//! Format Module
//!
//! Reads and writes the extended INI text format.
//!
//! ## Text Format
//! ```text
//! # comment            ; comment            // comment
//! key=value                          <- default (unnamed) group
//! [network]
//! hosts=alpha,beta,gamma             <- multi-value record
//! motd="hello, world",second         <- quoted value keeps its comma
//! ports=80,443 // inline note        <- trailing note dropped
//! 1,2,3                              <- bare list, key is the whole line
//! ```
//!
//! ## Canonical Output
//! ```text
//! [network]
//! hosts=alpha,beta,gamma
//!
//! [storage]
//! path=/var/lib
//! ```
//!
//! Values are written exactly as stored: no quoting, no trimming. Reading is
//! lossy for quoted spans and inline comments, so text with either does not
//! round-trip byte for byte.

mod parser;
mod serializer;
mod text;

pub use parser::{classify, parse, parse_str, Line, ParseStats, Parser};
pub use serializer::{serialize, serialize_to_string};

/// Line prefixes that mark a whole-line comment
pub const COMMENT_PREFIXES: [&str; 3] = ["#", ";", "//"];

/// Marker for a note after the last value
pub const TRAILING_COMMENT: &str = " //";

pub const GROUP_START: char = '[';
pub const GROUP_END: char = ']';
pub const KEY_VALUE_DIVIDER: char = '=';
pub const VALUE_DELIMITER: char = ',';
pub const QUOTE: char = '"';
