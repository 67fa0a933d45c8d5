//! In-memory storage
//!
//! Cloning a `MemoryStorage` shares the underlying buffer, so a test can keep
//! one handle while the engine owns another.

use std::io::{self, Cursor, Read, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;
use super::{Readable, Writable};

/// Shared byte buffer usable as both source and sink
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemoryStorage {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer pre-filled with `text`
    pub fn with_content(text: impl AsRef<[u8]>) -> Self {
        Self {
            buffer: Arc::new(Mutex::new(text.as_ref().to_vec())),
        }
    }

    /// Copy of the current bytes
    pub fn bytes(&self) -> Vec<u8> {
        self.buffer.lock().clone()
    }

    /// Current content as text (lossy for invalid UTF-8)
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    /// Replace the current content
    pub fn set_contents(&self, text: impl AsRef<[u8]>) {
        *self.buffer.lock() = text.as_ref().to_vec();
    }
}

impl Readable for MemoryStorage {
    fn read(&self) -> Result<Box<dyn Read + Send>> {
        Ok(Box::new(Cursor::new(self.bytes())))
    }
}

impl Writable for MemoryStorage {
    fn write(&self) -> Result<Box<dyn Write + Send>> {
        self.buffer.lock().clear();
        Ok(Box::new(MemoryWriter {
            buffer: Arc::clone(&self.buffer),
        }))
    }
}

/// Appends straight into the shared buffer
struct MemoryWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
