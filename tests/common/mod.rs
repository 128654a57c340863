#![allow(dead_code)]

use axum_test::TestServer;
use giftbit_storefront::infrastructure::persistence::MemoryStorage;
use giftbit_storefront::routes;
use giftbit_storefront::state::AppState;
use std::sync::Arc;

/// State backed by a freshly seeded in-memory store.
pub async fn seeded_state() -> AppState {
    AppState::new(Arc::new(MemoryStorage::seeded().await.unwrap()))
}

/// State backed by an in-memory store with no records at all.
pub fn empty_state() -> AppState {
    AppState::new(Arc::new(MemoryStorage::empty()))
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(routes::router(state, None, None)).unwrap()
}

pub async fn seeded_server() -> TestServer {
    test_server(seeded_state().await)
}
