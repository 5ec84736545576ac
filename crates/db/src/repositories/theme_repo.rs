//! Repository for the `themes` table.

use catalog_core::naming::slugify;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::theme::{CreateTheme, Theme};

/// Column list for the `themes` table.
const COLUMNS: &str = "key, slug, name, enabled, created_at, updated_at";

/// Provides create/list operations for themes.
pub struct ThemeRepo;

impl ThemeRepo {
    /// Insert a theme. Returns `None` if the key or the name is already
    /// taken, including by a soft-deleted theme.
    pub async fn create(pool: &PgPool, input: &CreateTheme) -> Result<Option<Theme>, sqlx::Error> {
        let query = format!(
            "INSERT INTO themes (key, slug, name, enabled) \
             VALUES ($1, $2, $3, COALESCE($4, true)) \
             ON CONFLICT DO NOTHING \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Theme>(&query)
            .bind(&input.key)
            .bind(slugify(&input.key))
            .bind(&input.name)
            .bind(input.enabled)
            .fetch_optional(pool)
            .await
    }

    /// List live themes ordered by key.
    pub async fn list(pool: &PgPool) -> Result<Vec<Theme>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM themes WHERE deleted_at IS NULL ORDER BY key ASC");
        sqlx::query_as::<_, Theme>(&query).fetch_all(pool).await
    }

    /// Whether a live theme with this key exists.
    pub(crate) async fn exists_live(
        tx: &mut Transaction<'_, Postgres>,
        key: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM themes WHERE key = $1 AND deleted_at IS NULL)",
        )
        .bind(key)
        .fetch_one(&mut **tx)
        .await
    }
}
