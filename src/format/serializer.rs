//! Serializer
//!
//! Canonical text for a [`Store`]: groups in creation order, records in
//! creation order, a blank line between groups, no trailing newline.

use std::io::Write;

use crate::error::Result;
use crate::model::Store;
use super::{GROUP_END, GROUP_START, KEY_VALUE_DIVIDER, VALUE_DELIMITER};

/// Render the store as text
pub fn serialize_to_string(store: &Store) -> String {
    let mut out = String::new();

    for (index, group) in store.groups().iter().enumerate() {
        if index > 0 {
            out.push_str("\n\n");
        }
        out.push(GROUP_START);
        out.push_str(group.name());
        out.push(GROUP_END);

        for record in group.records() {
            out.push('\n');
            out.push_str(record.key());
            out.push(KEY_VALUE_DIVIDER);
            for (position, value) in record.values().iter().enumerate() {
                if position > 0 {
                    out.push(VALUE_DELIMITER);
                }
                out.push_str(value);
            }
        }
    }

    out
}

/// Write the store to a stream and flush it
///
/// Returns the number of bytes written.
pub fn serialize<W: Write>(store: &Store, mut writer: W) -> Result<usize> {
    let text = serialize_to_string(store);
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(text.len())
}
