//! Product model and DTOs.

use catalog_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::category::CategorySummary;
use crate::models::status::StatusId;
use crate::models::theme::ThemeSummary;
use crate::models::validation::{validate_key, validate_not_blank};

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub key: String,
    pub slug: String,
    pub name: String,
    pub image: Option<String>,
    /// Minor currency units.
    pub price: Option<i64>,
    pub description: Option<String>,
    pub enabled: bool,
    pub status_id: StatusId,
    pub theme_key: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A product with its theme and live categories resolved.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub theme: Option<ThemeSummary>,
    pub categories: Vec<CategorySummary>,
}

/// DTO for creating a product.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProduct {
    #[validate(custom(function = "validate_key"))]
    pub key: String,
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    #[validate(length(max = 2048))]
    pub image: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub enabled: Option<bool>,
    /// Defaults to 1 (Available) if omitted.
    pub status_id: Option<StatusId>,
    pub theme_key: Option<String>,
    #[serde(default)]
    pub category_keys: Vec<String>,
}

/// DTO for updating a product. All fields are optional; the key is immutable.
///
/// `category_keys`, when present, replaces the whole category set.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    #[validate(length(max = 2048))]
    pub image: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub enabled: Option<bool>,
    pub status_id: Option<StatusId>,
    pub theme_key: Option<String>,
    pub category_keys: Option<Vec<String>>,
}

/// Active predicates for the admin product list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub enabled: Option<bool>,
    pub status_id: Option<StatusId>,
    pub theme_key: Option<String>,
    pub category_key: Option<String>,
    /// Case-insensitive substring match on name or slug.
    pub search: Option<String>,
}

/// Result of a product create or update.
#[derive(Debug)]
pub enum ProductWriteOutcome {
    Saved(ProductDetail),
    NotFound,
    KeyTaken,
    NameTaken,
    UnknownTheme(String),
    UnknownCategory(String),
}
