//! Route definitions for the FIFO ledger API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/products", product_routes())
        .route("/purchases", post(handlers::record_purchases))
        .route("/sellings", post(handlers::record_sellings))
        .nest("/reports", report_routes())
}

/// Product routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_products).post(handlers::create_product))
        .route("/:name", get(handlers::get_product))
}

/// Report routes
fn report_routes() -> Router<AppState> {
    Router::new().route("/profit/:name/:date", get(handlers::get_profit_report))
}
