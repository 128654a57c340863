//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::domain::storage::Storage;

/// Handle to the storage backend chosen at startup.
///
/// Cloned per request; the backend itself is shared behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}
