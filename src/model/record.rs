//! Record: one key and its ordered values

/// An immutable key with one or more string values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    key: String,
    values: Vec<String>,
}

impl Record {
    /// Create a record. The key is trimmed; an empty value list becomes `[""]`.
    ///
    /// Returns `None` when the trimmed key is empty.
    pub fn new<I, S>(key: &str, values: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = key.trim();
        if key.is_empty() {
            return None;
        }

        let mut values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            values.push(String::new());
        }
        Some(Self {
            key: key.to_string(),
            values,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// First value
    pub fn value(&self) -> &str {
        &self.values[0]
    }

    /// All values in order
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// True when the first value is non-blank
    pub fn has_value(&self) -> bool {
        !self.values[0].trim().is_empty()
    }
}
