//! Handler for the Bitcoin price endpoint.

use axum::{Json, extract::State};

use crate::domain::entities::BitcoinPriceUpdate;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the most recent Bitcoin price snapshot.
///
/// # Endpoint
///
/// `GET /api/bitcoin/price`
///
/// # Errors
///
/// Returns 404 if no price has been recorded yet.
pub async fn bitcoin_price_handler(
    State(state): State<AppState>,
) -> Result<Json<BitcoinPriceUpdate>, AppError> {
    let latest = state
        .storage
        .get_latest_bitcoin_price_update()
        .await
        .map_err(AppError::storage("Failed to fetch Bitcoin price"))?
        .ok_or_else(|| AppError::not_found("No Bitcoin price data available"))?;

    Ok(Json(latest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::storage::{MockStorage, StorageError};
    use axum::http::StatusCode;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_storage_failure_is_generic_500() {
        let mut storage = MockStorage::new();
        storage
            .expect_get_latest_bitcoin_price_update()
            .times(1)
            .returning(|| Err(StorageError::Database(sqlx::Error::PoolClosed)));
        let state = AppState::new(Arc::new(storage));

        let error = bitcoin_price_handler(State(state)).await.unwrap_err();

        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message(), "Failed to fetch Bitcoin price");
    }
}
