//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthResponse};
use crate::state::AppState;

/// Returns service health status.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Storage answered a catalog query
/// - **503 Service Unavailable**: Storage query failed
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "storage": {
///     "status": "ok",
///     "backend": "postgres",
///     "message": "5 categories"
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let storage_check = check_storage(&state).await;
    let healthy = storage_check.status == "ok";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: storage_check,
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Queries the storage backend with a category listing.
async fn check_storage(state: &AppState) -> CheckStatus {
    let backend = state.storage.backend_name().to_string();

    match state.storage.get_all_gift_card_categories().await {
        Ok(categories) => CheckStatus {
            status: "ok".to_string(),
            backend,
            message: Some(format!("{} categories", categories.len())),
        },
        Err(e) => {
            tracing::warn!("Health check storage query failed: {}", e);
            CheckStatus {
                status: "error".to_string(),
                backend,
                message: Some("Storage unavailable".to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::storage::{MockStorage, StorageError};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_failed_storage_query_reports_degraded() {
        let mut storage = MockStorage::new();
        storage.expect_backend_name().return_const("postgres");
        storage
            .expect_get_all_gift_card_categories()
            .times(1)
            .returning(|| Err(StorageError::Database(sqlx::Error::PoolTimedOut)));
        let state = AppState::new(Arc::new(storage));

        let (status, Json(body)) = health_handler(State(state)).await.unwrap_err();

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "degraded");
        assert_eq!(body.storage.status, "error");
        assert_eq!(body.storage.backend, "postgres");
    }
}
