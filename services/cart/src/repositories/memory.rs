//! In-memory store implementing every repository trait, for tests.
//!
//! All tables sit behind one mutex, so each trait call is atomic the way a
//! transaction is against PostgreSQL. Unique and foreign key constraints are
//! checked the same way the schema checks them.

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use tokio::sync::Mutex;

use super::{CartItemRepository, ProductRepository, UserRepository};
use crate::{
    cart::{CartChange, CartService, plan_add, plan_remove},
    models::{
        CartItem, CartItemDetails, CartItemQuery, CartItemView, NewProduct, NewUser, Product,
        RemoveOutcome, User,
    },
    state::AppState,
};

#[derive(Debug, Default)]
struct Tables {
    next_id: i64,
    users: BTreeMap<i64, User>,
    products: BTreeMap<i64, Product>,
    cart_items: BTreeMap<i64, CartItem>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn details(&self, item: &CartItem) -> Option<CartItemDetails> {
        Some(CartItemDetails {
            id: item.id,
            quantity: item.quantity,
            created_at: item.created_at,
            user: self.users.get(&item.user_id)?.clone(),
            product: self.products.get(&item.product_id)?.clone(),
        })
    }

    fn line(&self, user_id: i64, product_id: i64) -> Option<CartItem> {
        self.cart_items
            .values()
            .find(|item| item.user_id == user_id && item.product_id == product_id)
            .cloned()
    }

    fn apply(&mut self, user_id: i64, product_id: i64, change: CartChange) -> Option<CartItem> {
        match change {
            CartChange::Insert { quantity } => {
                let id = self.next_id();
                let item = CartItem {
                    id,
                    user_id,
                    product_id,
                    quantity,
                    created_at: Utc::now(),
                };
                self.cart_items.insert(id, item.clone());
                Some(item)
            }
            CartChange::Update { id, quantity } => {
                let item = self.cart_items.get_mut(&id)?;
                item.quantity = quantity;
                Some(item.clone())
            }
            CartChange::Delete { id } => {
                self.cart_items.remove(&id);
                None
            }
        }
    }
}

/// Shared in-memory tables; clones see the same data
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub async fn create_user(&self, new_user: &NewUser) -> DatabaseResult<User> {
        UserRepository::create(self, new_user).await
    }

    pub async fn create_product(&self, new_product: &NewProduct) -> DatabaseResult<Product> {
        ProductRepository::create(self, new_product).await
    }

    pub async fn cart_item_count(&self) -> usize {
        self.tables.lock().await.cart_items.len()
    }

    pub async fn cart_line(&self, user_id: i64, product_id: i64) -> Option<CartItem> {
        self.tables.lock().await.line(user_id, product_id)
    }

    pub fn cart_service(&self) -> CartService {
        CartService::new(
            Arc::new(self.clone()),
            Arc::new(self.clone()),
            Arc::new(self.clone()),
        )
    }

    pub fn app_state(&self) -> AppState {
        AppState::new(
            Arc::new(self.clone()),
            Arc::new(self.clone()),
            Arc::new(self.clone()),
        )
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn get_all(&self) -> DatabaseResult<Vec<User>> {
        Ok(self.tables.lock().await.users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<User>> {
        Ok(self.tables.lock().await.users.get(&id).cloned())
    }

    async fn find_by_phone_number(&self, phone_number: &str) -> DatabaseResult<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .values()
            .find(|user| user.phone_number == phone_number)
            .cloned())
    }

    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User> {
        let mut tables = self.tables.lock().await;
        if tables
            .users
            .values()
            .any(|user| user.phone_number == new_user.phone_number)
        {
            return Err(DatabaseError::UniqueViolation(
                "users_phone_number_key".to_string(),
            ));
        }

        let user = User {
            id: tables.next_id(),
            name: new_user.name.clone(),
            phone_number: new_user.phone_number.clone(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: i64, user: &NewUser) -> DatabaseResult<Option<User>> {
        let mut tables = self.tables.lock().await;
        if tables
            .users
            .values()
            .any(|other| other.id != id && other.phone_number == user.phone_number)
        {
            return Err(DatabaseError::UniqueViolation(
                "users_phone_number_key".to_string(),
            ));
        }

        Ok(tables.users.get_mut(&id).map(|existing| {
            existing.name = user.name.clone();
            existing.phone_number = user.phone_number.clone();
            existing.clone()
        }))
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        let mut tables = self.tables.lock().await;
        let deleted = tables.users.remove(&id).is_some();
        tables.cart_items.retain(|_, item| item.user_id != id);
        Ok(deleted)
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn get_all(&self) -> DatabaseResult<Vec<Product>> {
        Ok(self.tables.lock().await.products.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Product>> {
        Ok(self.tables.lock().await.products.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> DatabaseResult<Option<Product>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .products
            .values()
            .find(|product| product.name == name)
            .cloned())
    }

    async fn create(&self, new_product: &NewProduct) -> DatabaseResult<Product> {
        let mut tables = self.tables.lock().await;
        if tables
            .products
            .values()
            .any(|product| product.name == new_product.name)
        {
            return Err(DatabaseError::UniqueViolation("products_name_key".to_string()));
        }

        let product = Product {
            id: tables.next_id(),
            name: new_product.name.clone(),
            price: new_product.price,
            in_stock: new_product.in_stock,
        };
        tables.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: i64, product: &NewProduct) -> DatabaseResult<Option<Product>> {
        let mut tables = self.tables.lock().await;
        if tables
            .products
            .values()
            .any(|other| other.id != id && other.name == product.name)
        {
            return Err(DatabaseError::UniqueViolation("products_name_key".to_string()));
        }

        Ok(tables.products.get_mut(&id).map(|existing| {
            existing.name = product.name.clone();
            existing.price = product.price;
            existing.in_stock = product.in_stock;
            existing.clone()
        }))
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        let mut tables = self.tables.lock().await;
        let deleted = tables.products.remove(&id).is_some();
        tables.cart_items.retain(|_, item| item.product_id != id);
        Ok(deleted)
    }
}

#[async_trait]
impl CartItemRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<CartItemDetails>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .cart_items
            .get(&id)
            .and_then(|item| tables.details(item)))
    }

    async fn list_for_user(&self, user_id: i64) -> DatabaseResult<Vec<CartItemView>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .cart_items
            .values()
            .filter(|item| item.user_id == user_id)
            .filter_map(|item| tables.details(item))
            .map(|details| CartItemView {
                id: details.id,
                quantity: details.quantity,
                created_at: details.created_at,
                product: details.product,
            })
            .collect())
    }

    async fn list(&self, query: &CartItemQuery) -> DatabaseResult<Vec<CartItemDetails>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .cart_items
            .values()
            .filter_map(|item| tables.details(item))
            .filter(|details| {
                query
                    .phone_number
                    .as_ref()
                    .is_none_or(|phone| &details.user.phone_number == phone)
            })
            .filter(|details| {
                query
                    .product_id
                    .is_none_or(|product_id| details.product.id == product_id)
            })
            .collect())
    }

    async fn add_quantity(
        &self,
        user_id: i64,
        product_id: i64,
        quantity: i32,
    ) -> DatabaseResult<CartItem> {
        let mut tables = self.tables.lock().await;
        if !tables.users.contains_key(&user_id) || !tables.products.contains_key(&product_id) {
            return Err(DatabaseError::ForeignKeyViolation(
                "cart_items_references".to_string(),
            ));
        }

        let existing = tables.line(user_id, product_id);
        let change = plan_add(existing.as_ref(), quantity)
            .ok_or_else(|| DatabaseError::OutOfRange("cart_items.quantity".to_string()))?;
        tables
            .apply(user_id, product_id, change)
            .ok_or(DatabaseError::Query(sqlx::Error::RowNotFound))
    }

    async fn remove_quantity(
        &self,
        user_id: i64,
        product_id: i64,
        quantity: i32,
    ) -> DatabaseResult<Option<RemoveOutcome>> {
        let mut tables = self.tables.lock().await;
        let Some(existing) = tables.line(user_id, product_id) else {
            return Ok(None);
        };

        let change = plan_remove(&existing, quantity);
        Ok(Some(match tables.apply(user_id, product_id, change) {
            Some(item) => RemoveOutcome::Updated(item),
            None => RemoveOutcome::Deleted(existing),
        }))
    }

    async fn set_quantity(&self, id: i64, quantity: i32) -> DatabaseResult<Option<CartItem>> {
        let mut tables = self.tables.lock().await;
        Ok(tables.cart_items.get_mut(&id).map(|item| {
            item.quantity = quantity;
            item.clone()
        }))
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        Ok(self.tables.lock().await.cart_items.remove(&id).is_some())
    }
}
