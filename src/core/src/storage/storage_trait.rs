//! Storage Trait
//!
//! This module defines the `TimeStorage` trait, the interface between the web
//! handlers and whatever persists the recorded times.
//!
//! All methods return a `Result` so that I/O failures reach the caller.

use crate::error_handling::types::StorageError;
use crate::storage::types::TimeRecord;

/// Ordered, durable collection of `TimeRecord`s.
///
/// Records come back in the order they were appended. Duplicates are allowed.
pub trait TimeStorage: Send + Sync {
    /// Creates the backing resource if it does not exist yet. Calling it again
    /// on an existing resource leaves its contents untouched.
    fn initialize(&self) -> Result<(), StorageError>;

    /// Returns every stored record in order. A missing resource reads as empty.
    fn read_all(&self) -> Result<Vec<TimeRecord>, StorageError>;

    /// Adds `record` after the last stored one.
    fn append(&self, record: &TimeRecord) -> Result<(), StorageError>;

    /// Removes one occurrence of `record`.
    ///
    /// Returns `false`, without touching the resource, when nothing matched.
    fn delete(&self, record: &TimeRecord) -> Result<bool, StorageError>;
}
