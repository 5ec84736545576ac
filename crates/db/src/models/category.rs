//! Category model and DTOs. Products and categories are many-to-many via
//! `products_to_categories`.

use catalog_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::validation::{validate_key, validate_not_blank};

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub key: String,
    pub slug: String,
    pub name: String,
    pub enabled: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Category fields embedded in a product view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategorySummary {
    pub key: String,
    pub slug: String,
    pub name: String,
}

/// DTO for creating a category.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategory {
    #[validate(custom(function = "validate_key"))]
    pub key: String,
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
    pub enabled: Option<bool>,
}
