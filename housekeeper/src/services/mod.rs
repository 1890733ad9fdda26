//! Store implementations
//!
//! This module contains the implementations of the store traits: a purely
//! in-memory store and a file-backed store built on top of it.

pub mod file_store;
pub mod memory_store;

#[cfg(test)]
mod tests;

// Re-export all store implementations
pub use file_store::FileStore;
pub use memory_store::{InMemoryStore, StoreSnapshot, normalize_email};
