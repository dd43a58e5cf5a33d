//! Cart item endpoints

use axum::{extract::State, http::StatusCode};

use crate::{
    error::ApiResult,
    extract::{AppJson, AppPath, AppQuery},
    models::{
        ApiResponse, CartItem, CartItemDetails, CartItemQuery, CartItemRequest, CartItemView,
        UpdateCartItemRequest,
    },
    state::AppState,
};

/// List cart items, optionally filtered by phone number and product
pub async fn list_cart_items(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<CartItemQuery>,
) -> ApiResult<ApiResponse<Vec<CartItemDetails>>> {
    let items = state.cart_service.list(&query.normalized()).await?;

    Ok(ApiResponse::ok("Found.", items))
}

/// Cart contents of one user
pub async fn get_user_cart(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<i64>,
) -> ApiResult<ApiResponse<Vec<CartItemView>>> {
    let items = state.cart_service.cart_for_user(user_id).await?;

    Ok(ApiResponse::ok("Found.", items))
}

/// One cart line by id
pub async fn get_cart_item(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<ApiResponse<CartItemDetails>> {
    let item = state.cart_service.get(id).await?;

    Ok(ApiResponse::ok("Found.", item))
}

/// Add a product to a user's cart, merging into an existing line
pub async fn add_to_cart(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CartItemRequest>,
) -> ApiResult<ApiResponse<CartItem>> {
    let item = state
        .cart_service
        .add_to_cart(payload.user_id, payload.product_id, payload.quantity)
        .await?;

    Ok(ApiResponse::created("Product added to cart successfully.", item))
}

/// Take a quantity of a product out of a user's cart
pub async fn remove_from_cart(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CartItemRequest>,
) -> ApiResult<StatusCode> {
    state
        .cart_service
        .remove_from_cart(payload.user_id, payload.product_id, payload.quantity)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Overwrite the quantity of a cart item
pub async fn update_cart_item(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateCartItemRequest>,
) -> ApiResult<ApiResponse<CartItem>> {
    let item = state.cart_service.set_quantity(id, payload.quantity).await?;

    Ok(ApiResponse::ok("Cart item updated successfully.", item))
}

/// Delete a cart item by ID
pub async fn delete_cart_item(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<ApiResponse<()>> {
    state.cart_service.delete(id).await?;

    Ok(ApiResponse::message("Cart item deleted successfully."))
}
