//! Store implementation
//!
//! The root aggregate: an insertion-ordered table of groups behind a RwLock.
//! None of the accessors fail; absent entries yield `None` or the default.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use super::{Group, Record};

/// In-memory configuration document
#[derive(Debug, Default)]
pub struct Store {
    groups: RwLock<IndexMap<String, Arc<Group>>>,
}

impl Store {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Groups
    // =========================================================================

    /// Return the group named `name` (trimmed), registering an empty one if absent
    pub fn get_or_create_group(&self, name: &str) -> Arc<Group> {
        let name = name.trim();
        if let Some(group) = self.groups.read().get(name) {
            return Arc::clone(group);
        }

        // Re-check under the write lock; another thread may have won the race
        let mut groups = self.groups.write();
        let group = groups
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Group::new(name)));
        Arc::clone(group)
    }

    /// Look up a group without creating it
    pub fn group(&self, name: &str) -> Option<Arc<Group>> {
        self.groups.read().get(name.trim()).cloned()
    }

    /// Remove a group, keeping the order of the rest
    pub fn remove_group(&self, name: &str) -> Option<Arc<Group>> {
        self.groups.write().shift_remove(name.trim())
    }

    /// Snapshot of group names in creation order
    pub fn group_names(&self) -> Vec<String> {
        self.groups.read().keys().cloned().collect()
    }

    /// Snapshot of groups in creation order
    pub fn groups(&self) -> Vec<Arc<Group>> {
        self.groups.read().values().cloned().collect()
    }

    pub fn group_count(&self) -> usize {
        self.groups.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.read().is_empty()
    }

    /// Remove every group
    pub fn clear(&self) {
        self.groups.write().clear();
    }

    // =========================================================================
    // Records
    // =========================================================================

    /// Get-or-create `group`, then get-or-create `key` with `values`.
    ///
    /// First write wins: if the record already exists its values are kept and
    /// the existing record is returned. Returns `None` only for a blank key.
    pub fn set_value<I, S>(&self, group: &str, key: &str, values: I) -> Option<Arc<Record>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if key.trim().is_empty() {
            return None;
        }
        self.get_or_create_group(group).get_or_create_record(key, values)
    }

    /// Look up a record without creating anything
    pub fn record(&self, group: &str, key: &str) -> Option<Arc<Record>> {
        self.group(group)?.record(key)
    }

    /// First value of the record, if it exists and is non-blank
    pub fn value(&self, group: &str, key: &str) -> Option<String> {
        self.record(group, key)
            .filter(|record| record.has_value())
            .map(|record| record.value().to_string())
    }

    /// First value of the record, or `default`
    pub fn value_or(&self, group: &str, key: &str, default: impl Into<String>) -> String {
        self.value(group, key).unwrap_or_else(|| default.into())
    }

    /// All values of the record
    pub fn values(&self, group: &str, key: &str) -> Option<Vec<String>> {
        self.record(group, key).map(|record| record.values().to_vec())
    }

    /// All values of the record, or `default`
    pub fn values_or<I, S>(&self, group: &str, key: &str, default: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values(group, key)
            .unwrap_or_else(|| default.into_iter().map(Into::into).collect())
    }

    /// Remove a record from a group; the group itself stays
    pub fn remove_record(&self, group: &str, key: &str) -> Option<Arc<Record>> {
        self.group(group)?.remove_record(key)
    }
}
