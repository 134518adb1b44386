//! Storage subsystem
//!
//! This module provides the abstraction and the flat-file implementation used
//! to persist recorded times.
//!
//! Components:
//! - `storage_trait`: the `TimeStorage` trait the web handlers depend on.
//! - `types`: the `TimeRecord` value stored one per line.
//! - `file_storage`: newline-delimited text file backend.

pub mod file_storage;
pub mod storage_trait;
pub mod types;

pub use file_storage::FileStorage;
pub use storage_trait::TimeStorage;
pub use types::TimeRecord;
