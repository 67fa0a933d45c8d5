//! Configuration for inistore
//!
//! Centralized configuration with sensible defaults. A [`Config`] is consumed
//! by [`crate::Engine`] to wire up where text comes from, where it goes, and
//! on which thread the work runs.

use std::fmt;
use std::sync::Arc;

use crate::storage::{Readable, Writable};

/// Main configuration for an Engine instance
#[derive(Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Where `load` reads text from. `None` makes every load fail.
    pub source: Option<Arc<dyn Readable>>,

    /// Where `store` writes text to. `None` makes every store fail.
    pub sink: Option<Arc<dyn Writable>>,

    // -------------------------------------------------------------------------
    // Scheduling Configuration
    // -------------------------------------------------------------------------
    /// Run load/store inline or on a dedicated worker
    pub mode: ExecutionMode,

    /// Thread name given to the async worker
    pub worker_name: String,

    // -------------------------------------------------------------------------
    // Parser Configuration
    // -------------------------------------------------------------------------
    /// Join `"a` / `b"` neighbours left split after the quote-span pass
    pub merge_adjacent_quotes: bool,
}

/// Where load/store operations execute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// On the calling thread; the completion fires before the call returns
    Sync,

    /// On the engine's single worker thread, in submission order
    Async,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: None,
            sink: None,
            mode: ExecutionMode::Sync,
            worker_name: "inistore-worker".to_string(),
            merge_adjacent_quotes: false,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("source", &self.source.is_some())
            .field("sink", &self.sink.is_some())
            .field("mode", &self.mode)
            .field("worker_name", &self.worker_name)
            .field("merge_adjacent_quotes", &self.merge_adjacent_quotes)
            .finish()
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the source text is loaded from
    pub fn source(mut self, source: impl Readable + 'static) -> Self {
        self.config.source = Some(Arc::new(source) as Arc<dyn Readable>);
        self
    }

    /// Set the sink text is stored to
    pub fn sink(mut self, sink: impl Writable + 'static) -> Self {
        self.config.sink = Some(Arc::new(sink) as Arc<dyn Writable>);
        self
    }

    /// Use one storage value as both source and sink
    pub fn storage<S>(mut self, storage: S) -> Self
    where
        S: Readable + Writable + 'static,
    {
        let shared = Arc::new(storage);
        self.config.source = Some(shared.clone() as Arc<dyn Readable>);
        self.config.sink = Some(shared as Arc<dyn Writable>);
        self
    }

    /// Set the execution mode
    pub fn mode(mut self, mode: ExecutionMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Shorthand for `mode(ExecutionMode::Async)`
    pub fn asynchronous(self) -> Self {
        self.mode(ExecutionMode::Async)
    }

    /// Set the worker thread name
    pub fn worker_name(mut self, name: impl Into<String>) -> Self {
        self.config.worker_name = name.into();
        self
    }

    /// Enable the adjacent quote pair fallback in the parser
    pub fn merge_adjacent_quotes(mut self, enabled: bool) -> Self {
        self.config.merge_adjacent_quotes = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
