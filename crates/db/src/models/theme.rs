//! Theme model and DTOs. Themes group products (one theme, many products).

use catalog_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::validation::{validate_key, validate_not_blank};

/// A row from the `themes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Theme {
    pub key: String,
    pub slug: String,
    pub name: String,
    pub enabled: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Theme fields embedded in a product view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ThemeSummary {
    pub key: String,
    pub slug: String,
    pub name: String,
}

/// DTO for creating a theme.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTheme {
    #[validate(custom(function = "validate_key"))]
    pub key: String,
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
    pub enabled: Option<bool>,
}
