//! HTTP handlers for product endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use shared::{CreateProductInput, Product};

use crate::error::AppResult;
use crate::services::ProductService;
use crate::AppState;

/// Create a product
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service.create_product(input).await?;
    Ok(Json(product))
}

/// List all products with their balances
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let service = ProductService::new(state.db);
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// Get one product by name
pub async fn get_product(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service.get_product(&name).await?;
    Ok(Json(product))
}
