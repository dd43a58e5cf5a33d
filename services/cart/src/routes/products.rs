//! Product endpoints

use axum::extract::State;
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    extract::{AppJson, AppPath},
    models::{ApiResponse, NewProduct, Product, UpdateProduct},
    state::AppState,
    validation,
};

/// Get all products
pub async fn get_products(State(state): State<AppState>) -> ApiResult<ApiResponse<Vec<Product>>> {
    let products = state.product_repository.get_all().await?;

    Ok(ApiResponse::ok("Found.", products))
}

/// Get a product by ID
pub async fn get_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<ApiResponse<Product>> {
    let product = state
        .product_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found.".to_string()))?;

    Ok(ApiResponse::ok("Found.", product))
}

/// Create a new product
pub async fn create_product(
    State(state): State<AppState>,
    AppJson(payload): AppJson<NewProduct>,
) -> ApiResult<ApiResponse<Product>> {
    let new_product = payload.trimmed();
    validation::validate_new_product(&new_product).map_err(ApiError::Validation)?;

    if state
        .product_repository
        .find_by_name(&new_product.name)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict("Product already exists.".to_string()));
    }

    let product = state.product_repository.create(&new_product).await?;
    info!("Product with name '{}' created successfully", product.name);

    Ok(ApiResponse::created("Product created successfully.", product))
}

/// Replace a product's fields
pub async fn update_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateProduct>,
) -> ApiResult<ApiResponse<Product>> {
    if payload.id.is_some_and(|body_id| body_id != id) {
        return Err(ApiError::Validation("Invalid Product or Id.".to_string()));
    }

    let product = NewProduct::from(payload).trimmed();
    validation::validate_new_product(&product).map_err(ApiError::Validation)?;

    let not_found = || ApiError::NotFound("Product not found.".to_string());
    state
        .product_repository
        .find_by_id(id)
        .await?
        .ok_or_else(not_found)?;

    if let Some(other) = state.product_repository.find_by_name(&product.name).await? {
        if other.id != id {
            return Err(ApiError::Conflict("Product already exists.".to_string()));
        }
    }

    let updated = state
        .product_repository
        .update(id, &product)
        .await?
        .ok_or_else(not_found)?;
    info!("Product with id {} updated successfully", id);

    Ok(ApiResponse::ok("Product updated successfully.", updated))
}

/// Delete a product and every cart line holding it
pub async fn delete_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<ApiResponse<()>> {
    if !state.product_repository.delete(id).await? {
        return Err(ApiError::NotFound("Product not found.".to_string()));
    }
    info!("Product with id {} deleted successfully", id);

    Ok(ApiResponse::message("Product deleted successfully."))
}
