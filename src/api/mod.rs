//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into storage calls and serializes the
//! resulting records. It holds no business logic beyond input validation and
//! status-code mapping.
//!
//! # Modules
//!
//! - [`dto`] - Request bodies and health report shapes
//! - [`extract`] - Validating JSON extractor and path id parsing
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Rate limiting and request tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
