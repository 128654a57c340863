//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`  - Health check (public)
//! - `/api/*`        - Storefront REST API (public, rate limited)
//! - everything else - Built storefront assets, when a static directory is configured
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on `/api` (configurable for proxy deployments)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::rate_limit::{self, RateLimit};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use std::path::Path;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::{ServeDir, ServeFile};

/// Constructs the application router with all routes and middleware.
///
/// Wraps [`router`] with trailing-slash normalization, which has to run
/// before routing and so cannot be a `Router` layer.
pub fn app_router(
    state: AppState,
    rate_limit: Option<RateLimit>,
    static_dir: Option<&Path>,
) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, rate_limit, static_dir))
}

/// Routes and per-route middleware without path normalization.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limit` - per-IP limit for `/api`; requires the server to provide
///   connect info, so pass `None` when serving without a socket (tests).
///   With `behind_proxy` set the client IP is read from forwarding headers.
/// - `static_dir` - built single-page app; unknown paths fall back to its `index.html`
pub fn router(state: AppState, rate_limit: Option<RateLimit>, static_dir: Option<&Path>) -> Router {
    let api_router = match rate_limit {
        Some(limit) => rate_limit::apply(api::routes::routes(), limit),
        None => api::routes::routes(),
    };

    let mut router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router);

    if let Some(dir) = static_dir {
        let spa = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
        router = router.fallback_service(spa);
    }

    router.with_state(state).layer(tracing::layer())
}
