//! User model and related payloads

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub phone_number: String,
}

/// New user creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub phone_number: String,
}

impl NewUser {
    /// Copy with surrounding whitespace stripped from every field
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
        }
    }
}

/// User update payload
///
/// `id` is optional; when present it must match the id in the path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub phone_number: String,
}

impl From<UpdateUser> for NewUser {
    fn from(update: UpdateUser) -> Self {
        Self {
            name: update.name,
            phone_number: update.phone_number,
        }
    }
}
