//! Rate limiting middleware using token bucket algorithm.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::state::AppState;

/// Token bucket parameters applied per client IP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    /// Seconds between token replenishments.
    pub per_second: u64,
    /// Requests a client may issue in a burst before being throttled.
    pub burst: u32,
    /// Key buckets by `X-Forwarded-For` / `X-Real-IP` / `Forwarded` instead
    /// of the peer address. Only safe behind a trusted reverse proxy.
    pub behind_proxy: bool,
}

/// Wraps `router` in a per-client rate limiter.
///
/// Requests exceeding the limit receive `429 Too Many Requests`. Without
/// `behind_proxy` the key is the peer socket address; with it, the forwarded
/// client IP, falling back to the peer address when no header is present.
/// Either way the server must be started with connect info.
///
/// The router is returned unchanged if either parameter is zero.
///
/// # Example
///
/// ```rust,ignore
/// let limit = RateLimit { per_second: 1, burst: 60, behind_proxy: false };
/// let api = rate_limit::apply(api::routes::routes(), limit);
/// ```
pub fn apply(router: Router<AppState>, limit: RateLimit) -> Router<AppState> {
    if limit.behind_proxy {
        match layer(limit, SmartIpKeyExtractor) {
            Some(governor) => router.layer(governor),
            None => router,
        }
    } else {
        match layer(limit, PeerIpKeyExtractor) {
            Some(governor) => router.layer(governor),
            None => router,
        }
    }
}

/// Builds the governor layer for `limit`, keyed by `key_extractor`.
///
/// Returns `None` if either parameter is zero.
pub fn layer<K: KeyExtractor>(
    limit: RateLimit,
    key_extractor: K,
) -> Option<GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>> {
    let governor_conf = GovernorConfigBuilder::default()
        .key_extractor(key_extractor)
        .per_second(limit.per_second)
        .burst_size(limit.burst)
        .finish()?;

    Some(GovernorLayer::new(Arc::new(governor_conf)))
}
