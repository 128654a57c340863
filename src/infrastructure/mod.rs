//! Infrastructure layer for storage backends.
//!
//! This layer implements the storage contract defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - In-memory and PostgreSQL storage implementations
//! - [`seed`] - Fixture records loaded into a fresh store

pub mod persistence;
pub mod seed;
