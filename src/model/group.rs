//! Group implementation
//!
//! IndexMap-based record table behind a Mutex.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;

use super::Record;

/// A named section holding records in creation order
#[derive(Debug)]
pub struct Group {
    name: String,
    records: Mutex<IndexMap<String, Arc<Record>>>,
}

impl Group {
    /// Create an empty group; the name is trimmed
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            records: Mutex::new(IndexMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the record under `key`, creating it from `values` if absent.
    ///
    /// An existing record is returned untouched; `values` are then ignored.
    /// A blank key creates nothing and yields `None`.
    pub fn get_or_create_record<I, S>(&self, key: &str, values: I) -> Option<Arc<Record>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = key.trim();
        if key.is_empty() {
            return None;
        }

        let mut records = self.records.lock();
        if let Some(record) = records.get(key) {
            return Some(Arc::clone(record));
        }
        let record = Arc::new(Record::new(key, values)?);
        records.insert(record.key().to_string(), Arc::clone(&record));
        Some(record)
    }

    /// Look up a record without creating it
    pub fn record(&self, key: &str) -> Option<Arc<Record>> {
        self.records.lock().get(key.trim()).cloned()
    }

    /// Remove a record, keeping the order of the rest
    pub fn remove_record(&self, key: &str) -> Option<Arc<Record>> {
        self.records.lock().shift_remove(key.trim())
    }

    /// Snapshot of all records in creation order
    pub fn records(&self) -> Vec<Arc<Record>> {
        self.records.lock().values().cloned().collect()
    }

    /// Snapshot of all keys in creation order
    pub fn keys(&self) -> Vec<String> {
        self.records.lock().keys().cloned().collect()
    }

    pub fn record_count(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

/// Same name and the same records by key; record order is not compared
impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        if self.name != other.name {
            return false;
        }

        // Never hold both record locks at once
        let records = self.records();
        records.len() == other.record_count()
            && records
                .iter()
                .all(|record| other.record(record.key()).as_deref() == Some(&**record))
    }
}

impl Eq for Group {}
