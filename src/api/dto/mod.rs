//! Data Transfer Objects for API requests and responses.
//!
//! Entity records serialize directly as response bodies; this module holds
//! the request shapes that need validation and the health report.

pub mod health;
pub mod newsletter;
