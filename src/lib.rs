//! # inistore
//!
//! A grouped key/multi-value configuration store backed by an extended INI
//! text format:
//! - `[group]` headers, `key=v1,v2,...` records
//! - double-quoted values that keep their commas
//! - `#`, `;`, `//` line comments and trailing ` //` notes
//! - load/store on the calling thread or on a dedicated worker
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          Engine                              │
//! │            (load / store, completion callbacks)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ jobs
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Scheduler                             │
//! │              (inline  or  single worker thread)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Parser    │          │ Serializer  │
//!   │ text → model│          │ model → text│
//!   └──────┬──────┘          └──────▲──────┘
//!          │                        │
//!          ▼                        │
//!   ┌───────────────────────────────┴─────┐        ┌─────────────┐
//!   │  Store → Group → Record (RwLock /   │◄──────►│   Storage   │
//!   │          per-group Mutex)           │  bytes │ (Readable / │
//!   └─────────────────────────────────────┘        │  Writable)  │
//!                                                  └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use inistore::{Config, Engine, MemoryStorage};
//!
//! let storage = MemoryStorage::with_content("[server]\nhosts=alpha,beta\n");
//! let engine = Engine::new(Config::builder().storage(storage.clone()).build()).unwrap();
//!
//! let store = engine.load_blocking().unwrap();
//! assert_eq!(store.values("server", "hosts").unwrap(), vec!["alpha", "beta"]);
//!
//! store.set_value("server", "port", ["8080"]);
//! engine.store_blocking().unwrap();
//! assert_eq!(storage.contents(), "[server]\nhosts=alpha,beta\nport=8080");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod model;
pub mod format;
pub mod storage;
pub mod scheduler;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{IniError, Result};
pub use config::{Config, ExecutionMode};
pub use model::{Group, Record, Store, DEFAULT_GROUP_NAME};
pub use storage::{FileStorage, MemoryStorage, Readable, Writable};
pub use engine::{Completion, Engine};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of inistore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
