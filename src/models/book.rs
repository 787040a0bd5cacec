//! Book (catalog entry) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book model from database.
///
/// `stock` counts copies available to borrow, `borrowed` counts copies out
/// on loan. Borrow/return move a single copy between the two counters; the
/// sum only changes through catalog edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub author: String,
    pub stock: i32,
    pub borrowed: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub active: bool,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    #[validate(range(min = 0, message = "Stock must not be negative"))]
    #[serde(default)]
    pub stock: i32,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Partial update request. A field left out of the payload keeps its stored
/// value; a field that is present overwrites it, zero and empty included.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    #[validate(range(min = 0, message = "Stock must not be negative"))]
    pub stock: Option<i32>,
    pub active: Option<bool>,
}
