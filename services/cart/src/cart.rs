//! Cart aggregation
//!
//! A user holds at most one cart line per product. Adding a product that is
//! already in the cart grows the existing line; removing shrinks it and drops
//! the line once its quantity would fall below one. The decision of what to
//! write is made by [`plan_add`] and [`plan_remove`]; repositories apply the
//! resulting [`CartChange`] atomically.

use std::sync::Arc;

use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    models::{CartItem, CartItemDetails, CartItemQuery, CartItemView, RemoveOutcome},
    repositories::{CartItemRepository, ProductRepository, UserRepository},
    validation,
};

/// Quantity used when a request does not name one
pub const DEFAULT_QUANTITY: i32 = 1;

/// Write to perform against the cart line of a (user, product) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// No line exists yet
    Insert { quantity: i32 },
    /// Overwrite the quantity of an existing line
    Update { id: i64, quantity: i32 },
    /// Drop an existing line
    Delete { id: i64 },
}

/// Merge `quantity` into the existing line, or start a new one.
///
/// Returns `None` when the merged quantity does not fit in an `i32`.
pub fn plan_add(existing: Option<&CartItem>, quantity: i32) -> Option<CartChange> {
    match existing {
        Some(item) => item
            .quantity
            .checked_add(quantity)
            .map(|quantity| CartChange::Update {
                id: item.id,
                quantity,
            }),
        None => Some(CartChange::Insert { quantity }),
    }
}

/// Take `quantity` off an existing line, deleting it when nothing is left.
pub fn plan_remove(existing: &CartItem, quantity: i32) -> CartChange {
    let remaining = existing.quantity.saturating_sub(quantity);
    if remaining >= 1 {
        CartChange::Update {
            id: existing.id,
            quantity: remaining,
        }
    } else {
        CartChange::Delete { id: existing.id }
    }
}

/// Resolve the requested quantity: absent means one, non-positive is rejected.
pub fn resolve_quantity(requested: Option<i32>) -> ApiResult<i32> {
    let quantity = requested.unwrap_or(DEFAULT_QUANTITY);
    validation::validate_quantity(quantity).map_err(ApiError::Validation)?;
    Ok(quantity)
}

/// Cart operations over the user, product and cart item repositories
#[derive(Clone)]
pub struct CartService {
    users: Arc<dyn UserRepository>,
    products: Arc<dyn ProductRepository>,
    cart_items: Arc<dyn CartItemRepository>,
}

impl CartService {
    /// Create a new cart service
    pub fn new(
        users: Arc<dyn UserRepository>,
        products: Arc<dyn ProductRepository>,
        cart_items: Arc<dyn CartItemRepository>,
    ) -> Self {
        Self {
            users,
            products,
            cart_items,
        }
    }

    /// Add `quantity` of a product to a user's cart
    pub async fn add_to_cart(
        &self,
        user_id: i64,
        product_id: i64,
        quantity: Option<i32>,
    ) -> ApiResult<CartItem> {
        let quantity = resolve_quantity(quantity)?;

        if self.products.find_by_id(product_id).await?.is_none() {
            return Err(ApiError::Validation("Product not found.".to_string()));
        }
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(ApiError::Validation("User not found.".to_string()));
        }

        let item = self
            .cart_items
            .add_quantity(user_id, product_id, quantity)
            .await?;

        info!(
            "Cart item {} for user {} and product {} now has quantity {}",
            item.id, user_id, product_id, item.quantity
        );
        Ok(item)
    }

    /// Remove `quantity` of a product from a user's cart
    pub async fn remove_from_cart(
        &self,
        user_id: i64,
        product_id: i64,
        quantity: Option<i32>,
    ) -> ApiResult<RemoveOutcome> {
        let quantity = resolve_quantity(quantity)?;

        let outcome = self
            .cart_items
            .remove_quantity(user_id, product_id, quantity)
            .await?
            .ok_or_else(|| ApiError::NotFound("Cart item not found.".to_string()))?;

        match &outcome {
            RemoveOutcome::Updated(item) => info!(
                "Cart item {} for user {} reduced to quantity {}",
                item.id, user_id, item.quantity
            ),
            RemoveOutcome::Deleted(item) => info!(
                "Cart item {} for user {} and product {} removed",
                item.id, user_id, product_id
            ),
        }
        Ok(outcome)
    }

    /// Lines in a user's cart, oldest first
    pub async fn cart_for_user(&self, user_id: i64) -> ApiResult<Vec<CartItemView>> {
        Ok(self.cart_items.list_for_user(user_id).await?)
    }

    /// Lines across all carts matching the optional filters
    pub async fn list(&self, query: &CartItemQuery) -> ApiResult<Vec<CartItemDetails>> {
        Ok(self.cart_items.list(query).await?)
    }

    /// A single cart line with its user and product
    pub async fn get(&self, id: i64) -> ApiResult<CartItemDetails> {
        self.cart_items
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Cart item not found.".to_string()))
    }

    /// Overwrite the quantity of a cart line
    pub async fn set_quantity(&self, id: i64, quantity: i32) -> ApiResult<CartItem> {
        validation::validate_quantity(quantity).map_err(ApiError::Validation)?;

        let item = self
            .cart_items
            .set_quantity(id, quantity)
            .await?
            .ok_or_else(|| ApiError::NotFound("Cart item not found.".to_string()))?;

        info!("Cart item {} set to quantity {}", id, quantity);
        Ok(item)
    }

    /// Delete a cart line regardless of its quantity
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        if !self.cart_items.delete(id).await? {
            return Err(ApiError::NotFound("Cart item not found.".to_string()));
        }

        info!("Cart item {} deleted", id);
        Ok(())
    }
}
