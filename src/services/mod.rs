//! Service layer for persistence.
//!
//! This module contains the storage boundary the session controllers talk
//! to, keeping file-system and serialization details out of the core.

pub mod store;

// Re-export commonly used types
pub use store::{BundleStore, JsonFileStore, MemoryStore};
