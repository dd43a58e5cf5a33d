//! Application state shared across handlers

use std::sync::Arc;

use crate::{
    cart::CartService,
    repositories::{CartItemRepository, ProductRepository, UserRepository},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub user_repository: Arc<dyn UserRepository>,
    pub product_repository: Arc<dyn ProductRepository>,
    pub cart_service: CartService,
}

impl AppState {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        product_repository: Arc<dyn ProductRepository>,
        cart_item_repository: Arc<dyn CartItemRepository>,
    ) -> Self {
        let cart_service = CartService::new(
            user_repository.clone(),
            product_repository.clone(),
            cart_item_repository,
        );

        Self {
            user_repository,
            product_repository,
            cart_service,
        }
    }
}
