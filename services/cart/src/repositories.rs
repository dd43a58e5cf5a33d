//! Repositories for database operations
//!
//! Each entity is reached through a trait so handlers and the cart service
//! can run against PostgreSQL in production and an in-memory store in tests.

use async_trait::async_trait;
use common::error::DatabaseResult;

use crate::models::{
    CartItem, CartItemDetails, CartItemQuery, CartItemView, NewProduct, NewUser, Product,
    RemoveOutcome, User,
};

pub mod cart_items;
#[cfg(test)]
pub mod memory;
pub mod products;
pub mod users;

pub use cart_items::PgCartItemRepository;
pub use products::PgProductRepository;
pub use users::PgUserRepository;

/// Persistence operations on users
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users, by id
    async fn get_all(&self) -> DatabaseResult<Vec<User>>;
    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<User>>;
    async fn find_by_phone_number(&self, phone_number: &str) -> DatabaseResult<Option<User>>;
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User>;
    /// Replace the fields of a user; `None` when the id is unknown
    async fn update(&self, id: i64, user: &NewUser) -> DatabaseResult<Option<User>>;
    /// Delete a user and their cart; returns true if a row was deleted
    async fn delete(&self, id: i64) -> DatabaseResult<bool>;
}

/// Persistence operations on products
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products, by id
    async fn get_all(&self) -> DatabaseResult<Vec<Product>>;
    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Product>>;
    async fn find_by_name(&self, name: &str) -> DatabaseResult<Option<Product>>;
    async fn create(&self, new_product: &NewProduct) -> DatabaseResult<Product>;
    /// Replace the fields of a product; `None` when the id is unknown
    async fn update(&self, id: i64, product: &NewProduct) -> DatabaseResult<Option<Product>>;
    /// Delete a product and every cart line holding it
    async fn delete(&self, id: i64) -> DatabaseResult<bool>;
}

/// Persistence operations on cart items
///
/// `add_quantity` and `remove_quantity` are each one atomic read-modify-write
/// on the line identified by (user_id, product_id).
#[async_trait]
pub trait CartItemRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<CartItemDetails>>;
    /// Lines of one user's cart ordered by creation time
    async fn list_for_user(&self, user_id: i64) -> DatabaseResult<Vec<CartItemView>>;
    /// Lines across all carts matching the filters
    async fn list(&self, query: &CartItemQuery) -> DatabaseResult<Vec<CartItemDetails>>;
    /// Merge `quantity` into the pair's line, creating it if needed.
    /// Fails with `OutOfRange` when the sum does not fit the column.
    async fn add_quantity(
        &self,
        user_id: i64,
        product_id: i64,
        quantity: i32,
    ) -> DatabaseResult<CartItem>;
    /// Take `quantity` off the pair's line; `None` when no line exists
    async fn remove_quantity(
        &self,
        user_id: i64,
        product_id: i64,
        quantity: i32,
    ) -> DatabaseResult<Option<RemoveOutcome>>;
    async fn set_quantity(&self, id: i64, quantity: i32) -> DatabaseResult<Option<CartItem>>;
    async fn delete(&self, id: i64) -> DatabaseResult<bool>;
}
