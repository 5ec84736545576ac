//! Repository for the `categories` table.

use catalog_core::naming::slugify;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::category::{Category, CreateCategory};

/// Column list for the `categories` table.
const COLUMNS: &str = "key, slug, name, enabled, created_at, updated_at";

/// Provides create/list operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a category. Returns `None` if the key or the name is already
    /// taken, including by a soft-deleted category.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (key, slug, name, enabled) \
             VALUES ($1, $2, $3, COALESCE($4, true)) \
             ON CONFLICT DO NOTHING \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.key)
            .bind(slugify(&input.key))
            .bind(&input.name)
            .bind(input.enabled)
            .fetch_optional(pool)
            .await
    }

    /// List live categories ordered by key.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM categories WHERE deleted_at IS NULL ORDER BY key ASC");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// Keys from `keys` that name no live category, in input order.
    pub(crate) async fn missing_keys(
        tx: &mut Transaction<'_, Postgres>,
        keys: &[String],
    ) -> Result<Vec<String>, sqlx::Error> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let found = sqlx::query_scalar::<_, String>(
            "SELECT key FROM categories WHERE key = ANY($1) AND deleted_at IS NULL",
        )
        .bind(keys)
        .fetch_all(&mut **tx)
        .await?;

        Ok(keys
            .iter()
            .filter(|k| !found.contains(k))
            .cloned()
            .collect())
    }
}
