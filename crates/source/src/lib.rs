//! Inventory sources for Pantry.
//!
//! This crate provides the trait the calling layer fetches item lists
//! through, with a JSON export file and an in-memory implementation.

#![warn(missing_docs)]

pub mod trait_;
pub mod update;
pub mod json_file;
pub mod memory;

pub use trait_::{InventorySource, Result, SourceError};
pub use update::StatusUpdate;
pub use json_file::JsonFileSource;
pub use memory::MemorySource;
