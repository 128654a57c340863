//! Domain layer containing the storefront records and the storage contract.
//!
//! # Architecture
//!
//! - [`entities`] - Record types and their creation inputs
//! - [`storage`] - The [`storage::Storage`] trait implemented by every backend
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on the HTTP layer
//! - Backends live in [`crate::infrastructure::persistence`] and are chosen at startup
//! - Absence of a record is `Ok(None)`, never an error

pub mod entities;
pub mod storage;
