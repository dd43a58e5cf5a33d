//! Cart item repository backed by PostgreSQL
//!
//! Merges run in a transaction holding a row lock on the existing line. The
//! insert path additionally resolves a concurrent first insert through the
//! `(user_id, product_id)` unique constraint, so two racing adds both land on
//! one row.

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgConnection, PgPool, Row, postgres::PgRow};
use tracing::debug;

use super::CartItemRepository;
use crate::{
    cart::{CartChange, plan_add, plan_remove},
    models::{CartItem, CartItemDetails, CartItemQuery, CartItemView, Product, RemoveOutcome, User},
};

const DETAILS_SELECT: &str = r#"
    SELECT ci.id, ci.quantity, ci.created_at,
           u.id AS user_id, u.name AS user_name, u.phone_number AS user_phone_number,
           p.id AS product_id, p.name AS product_name, p.price AS product_price,
           p.in_stock AS product_in_stock
    FROM cart_items ci
    JOIN users u ON u.id = ci.user_id
    JOIN products p ON p.id = ci.product_id
"#;

fn product_from_row(row: &PgRow) -> Product {
    Product {
        id: row.get("product_id"),
        name: row.get("product_name"),
        price: row.get("product_price"),
        in_stock: row.get("product_in_stock"),
    }
}

fn details_from_row(row: &PgRow) -> CartItemDetails {
    CartItemDetails {
        id: row.get("id"),
        quantity: row.get("quantity"),
        created_at: row.get("created_at"),
        user: User {
            id: row.get("user_id"),
            name: row.get("user_name"),
            phone_number: row.get("user_phone_number"),
        },
        product: product_from_row(row),
    }
}

/// Cart item repository for database operations
#[derive(Clone)]
pub struct PgCartItemRepository {
    pool: PgPool,
}

impl PgCartItemRepository {
    /// Create a new cart item repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn lock_line(
        conn: &mut PgConnection,
        user_id: i64,
        product_id: i64,
    ) -> DatabaseResult<Option<CartItem>> {
        let item = sqlx::query_as::<_, CartItem>(
            r#"
            SELECT id, user_id, product_id, quantity, created_at
            FROM cart_items
            WHERE user_id = $1 AND product_id = $2
            FOR UPDATE
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_optional(conn)
        .await?;

        Ok(item)
    }

    /// Write a planned change; returns the surviving row, if any
    async fn apply_change(
        conn: &mut PgConnection,
        user_id: i64,
        product_id: i64,
        change: CartChange,
    ) -> DatabaseResult<Option<CartItem>> {
        debug!(
            "Applying {:?} to cart line ({}, {})",
            change, user_id, product_id
        );

        match change {
            CartChange::Insert { quantity } => {
                let item = sqlx::query_as::<_, CartItem>(
                    r#"
                    INSERT INTO cart_items (user_id, product_id, quantity)
                    VALUES ($1, $2, $3)
                    ON CONFLICT (user_id, product_id)
                    DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity
                    RETURNING id, user_id, product_id, quantity, created_at
                    "#,
                )
                .bind(user_id)
                .bind(product_id)
                .bind(quantity)
                .fetch_one(conn)
                .await?;
                Ok(Some(item))
            }
            CartChange::Update { id, quantity } => {
                let item = sqlx::query_as::<_, CartItem>(
                    r#"
                    UPDATE cart_items
                    SET quantity = $2
                    WHERE id = $1
                    RETURNING id, user_id, product_id, quantity, created_at
                    "#,
                )
                .bind(id)
                .bind(quantity)
                .fetch_one(conn)
                .await?;
                Ok(Some(item))
            }
            CartChange::Delete { id } => {
                sqlx::query("DELETE FROM cart_items WHERE id = $1")
                    .bind(id)
                    .execute(conn)
                    .await?;
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl CartItemRepository for PgCartItemRepository {
    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<CartItemDetails>> {
        let sql = format!("{} WHERE ci.id = $1", DETAILS_SELECT);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(details_from_row))
    }

    async fn list_for_user(&self, user_id: i64) -> DatabaseResult<Vec<CartItemView>> {
        let sql = format!(
            "{} WHERE ci.user_id = $1 ORDER BY ci.created_at, ci.id",
            DETAILS_SELECT
        );
        let rows = sqlx::query(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        let items = rows
            .iter()
            .map(|row| CartItemView {
                id: row.get("id"),
                quantity: row.get("quantity"),
                created_at: row.get("created_at"),
                product: product_from_row(row),
            })
            .collect();

        Ok(items)
    }

    async fn list(&self, query: &CartItemQuery) -> DatabaseResult<Vec<CartItemDetails>> {
        let sql = format!(
            "{} WHERE ($1::TEXT IS NULL OR u.phone_number = $1) \
             AND ($2::BIGINT IS NULL OR ci.product_id = $2) \
             ORDER BY ci.created_at, ci.id",
            DETAILS_SELECT
        );
        let rows = sqlx::query(&sql)
            .bind(query.phone_number.as_deref())
            .bind(query.product_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(details_from_row).collect())
    }

    async fn add_quantity(
        &self,
        user_id: i64,
        product_id: i64,
        quantity: i32,
    ) -> DatabaseResult<CartItem> {
        let mut tx = self.pool.begin().await?;

        let existing = Self::lock_line(&mut tx, user_id, product_id).await?;
        let change = plan_add(existing.as_ref(), quantity)
            .ok_or_else(|| DatabaseError::OutOfRange("cart_items.quantity".to_string()))?;
        let item = Self::apply_change(&mut tx, user_id, product_id, change)
            .await?
            .ok_or(DatabaseError::Query(sqlx::Error::RowNotFound))?;

        tx.commit().await?;
        Ok(item)
    }

    async fn remove_quantity(
        &self,
        user_id: i64,
        product_id: i64,
        quantity: i32,
    ) -> DatabaseResult<Option<RemoveOutcome>> {
        let mut tx = self.pool.begin().await?;

        let Some(existing) = Self::lock_line(&mut tx, user_id, product_id).await? else {
            tx.rollback().await?;
            return Ok(None);
        };

        let change = plan_remove(&existing, quantity);
        let outcome = match Self::apply_change(&mut tx, user_id, product_id, change).await? {
            Some(item) => RemoveOutcome::Updated(item),
            None => RemoveOutcome::Deleted(existing),
        };

        tx.commit().await?;
        Ok(Some(outcome))
    }

    async fn set_quantity(&self, id: i64, quantity: i32) -> DatabaseResult<Option<CartItem>> {
        let item = sqlx::query_as::<_, CartItem>(
            r#"
            UPDATE cart_items
            SET quantity = $2
            WHERE id = $1
            RETURNING id, user_id, product_id, quantity, created_at
            "#,
        )
        .bind(id)
        .bind(quantity)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
