//! Document storage.
//!
//! Handlers only see the [`DocumentStore`] trait; the in-memory backend is
//! what the server ships with.

pub mod memory;
pub mod r#trait;

pub use memory::{MemoryStore, SeedData};
pub use r#trait::{DocumentStore, StoreError, StoreResult};
