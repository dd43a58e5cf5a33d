//! Shopping cart service routes

use axum::{Json, Router, response::IntoResponse, routing::get};
use serde_json::json;

use crate::state::AppState;

pub mod cart_items;
pub mod products;
pub mod users;

/// Create the router for the shopping cart service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/users", get(users::get_users).post(users::create_user))
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/products",
            get(products::get_products).post(products::create_product),
        )
        .route(
            "/products/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route(
            "/cart-items",
            get(cart_items::list_cart_items)
                .post(cart_items::add_to_cart)
                .delete(cart_items::remove_from_cart),
        )
        .route("/cart-items/user/:id", get(cart_items::get_user_cart))
        .route(
            "/cart-items/:id",
            get(cart_items::get_cart_item)
                .put(cart_items::update_cart_item)
                .delete(cart_items::delete_cart_item),
        )
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "cart-service"
    }))
}
