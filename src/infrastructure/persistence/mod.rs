//! Storage backend implementations.
//!
//! # Backends
//!
//! - [`MemoryStorage`] - Process-local maps, seeded on construction
//! - [`PgStorage`] - PostgreSQL via SQLx, seeded only when the catalog is empty
//!
//! The backend is selected once at startup from [`crate::config::StorageBackend`].

pub mod memory_storage;
pub mod pg_storage;

pub use memory_storage::MemoryStorage;
pub use pg_storage::PgStorage;
