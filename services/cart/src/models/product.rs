//! Product model and related payloads

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: i32,
    pub in_stock: bool,
}

/// New product creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: i32,
    #[serde(default)]
    pub in_stock: bool,
}

impl NewProduct {
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            ..self.clone()
        }
    }
}

/// Product update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub price: i32,
    #[serde(default)]
    pub in_stock: bool,
}

impl From<UpdateProduct> for NewProduct {
    fn from(update: UpdateProduct) -> Self {
        Self {
            name: update.name,
            price: update.price,
            in_stock: update.in_stock,
        }
    }
}
