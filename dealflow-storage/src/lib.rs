//! Dealflow Storage - Record-Store Trait and In-Memory Implementation
//!
//! Defines the CRUD abstraction over the external record-storage
//! collaborator. The HTTP-backed implementation lives in dealflow-client;
//! `InMemoryStore` serves tests and offline use.

pub mod memory;
pub mod store;

pub use memory::InMemoryStore;
pub use store::RecordStore;
