//! Cart item models and projections

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Product, User};

/// Cart item entity, unique per (user_id, product_id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

/// A cart line as seen from its owner's cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemView {
    pub id: i64,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub product: Product,
}

/// A cart line with both its owner and its product resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemDetails {
    pub id: i64,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub user: User,
    pub product: Product,
}

/// Body of add-to-cart and remove-from-cart requests
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemRequest {
    pub user_id: i64,
    pub product_id: i64,
    /// Defaults to 1 when absent
    #[serde(default)]
    pub quantity: Option<i32>,
}

/// Body of a quantity overwrite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCartItemRequest {
    pub quantity: i32,
}

/// Filters for listing cart items; both combine with AND
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemQuery {
    pub phone_number: Option<String>,
    #[serde(rename = "product")]
    pub product_id: Option<i64>,
}

impl CartItemQuery {
    /// Treat a blank phone number or product id 0 as no filter
    pub fn normalized(self) -> Self {
        Self {
            phone_number: self
                .phone_number
                .map(|phone| phone.trim().to_string())
                .filter(|phone| !phone.is_empty()),
            product_id: self.product_id.filter(|id| *id != 0),
        }
    }
}

/// Result of decrementing a cart line
#[derive(Debug, Clone, PartialEq)]
pub enum RemoveOutcome {
    /// Quantity stayed positive; holds the updated row
    Updated(CartItem),
    /// Quantity reached zero; holds the row as it was before deletion
    Deleted(CartItem),
}
