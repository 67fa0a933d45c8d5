//! Model Module
//!
//! In-memory representation of a configuration document.
//!
//! ## Responsibilities
//! - Keep groups and records in creation order (serialization order)
//! - Get-or-create access for both levels
//! - Structural safety under concurrent access
//!
//! ## Locking
//! Two independent lock scopes:
//! - `Store`: `RwLock` over the group-name table
//! - `Group`: `Mutex` over its own key table
//!
//! Neither lock is held across a whole parse or serialize pass, so a reader
//! may observe a partially loaded store.

mod group;
mod record;
mod store;

pub use group::Group;
pub use record::Record;
pub use store::Store;

/// Name of the group that holds records appearing before any header
pub const DEFAULT_GROUP_NAME: &str = "";
