//! HTTP handlers for purchase and selling batches

use axum::{extract::State, Json};
use shared::{BatchResponse, PurchasesRequest, SellingsRequest};

use crate::error::AppResult;
use crate::services::LedgerService;
use crate::AppState;

/// Record a batch of purchases
pub async fn record_purchases(
    State(state): State<AppState>,
    Json(request): Json<PurchasesRequest>,
) -> AppResult<Json<BatchResponse>> {
    let service = LedgerService::new(state.db, state.config.ledger.max_batch_size);
    let response = service.record_purchases(request.purchases).await?;
    Ok(Json(response))
}

/// Record a batch of sellings
pub async fn record_sellings(
    State(state): State<AppState>,
    Json(request): Json<SellingsRequest>,
) -> AppResult<Json<BatchResponse>> {
    let service = LedgerService::new(state.db, state.config.ledger.max_batch_size);
    let response = service.record_sellings(request.sellings).await?;
    Ok(Json(response))
}
