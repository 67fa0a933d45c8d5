//! Storage Module
//!
//! Byte-stream collaborators that feed the parser and receive serializer
//! output.
//!
//! ## Responsibilities
//! - `Readable`: hand out a fresh reader, at most once per load
//! - `Writable`: hand out a fresh writer, at most once per store
//!
//! ## Implementations
//! - [`FileStorage`]: a path on disk (both directions)
//! - [`MemoryStorage`]: a shared in-memory buffer (both directions)

mod file;
mod memory;

use std::io::{Read, Write};

use crate::error::Result;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Source of raw bytes to parse
pub trait Readable: Send + Sync {
    /// Open a new stream positioned at the start of the content
    fn read(&self) -> Result<Box<dyn Read + Send>>;
}

/// Destination for serialized bytes
pub trait Writable: Send + Sync {
    /// Open a new stream that replaces any previous content
    fn write(&self) -> Result<Box<dyn Write + Send>>;
}
