//! Product repository backed by PostgreSQL

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::PgPool;
use tracing::info;

use super::ProductRepository;
use crate::models::{NewProduct, Product};

/// Product repository for database operations
#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    /// Create a new product repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn get_all(&self) -> DatabaseResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, in_stock
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, in_stock
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn find_by_name(&self, name: &str) -> DatabaseResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, in_stock
            FROM products
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn create(&self, new_product: &NewProduct) -> DatabaseResult<Product> {
        info!("Creating new product: {}", new_product.name);

        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, price, in_stock)
            VALUES ($1, $2, $3)
            RETURNING id, name, price, in_stock
            "#,
        )
        .bind(&new_product.name)
        .bind(new_product.price)
        .bind(new_product.in_stock)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    async fn update(&self, id: i64, product: &NewProduct) -> DatabaseResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $2, price = $3, in_stock = $4
            WHERE id = $1
            RETURNING id, name, price, in_stock
            "#,
        )
        .bind(id)
        .bind(&product.name)
        .bind(product.price)
        .bind(product.in_stock)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
