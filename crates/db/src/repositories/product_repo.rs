//! Repository for the `products` table and its category links.

use std::collections::HashMap;

use catalog_core::naming::slugify;
use catalog_core::pagination::{Page, PageRequest};
use sqlx::{FromRow, PgConnection, PgPool, Postgres, QueryBuilder, Transaction};

use crate::models::category::CategorySummary;
use crate::models::product::{
    CreateProduct, Product, ProductDetail, ProductQuery, ProductWriteOutcome, UpdateProduct,
};
use crate::models::status::ProductStatus;
use crate::models::theme::ThemeSummary;
use crate::repositories::{contains_pattern, CategoryRepo, ThemeRepo};

/// Column list for the `products` table.
const COLUMNS: &str = "key, slug, name, image, price, description, enabled, status_id, \
    theme_key, created_at, updated_at";

/// Same columns qualified with the `p` alias used by list reads.
const P_COLUMNS: &str = "p.key, p.slug, p.name, p.image, p.price, p.description, p.enabled, \
    p.status_id, p.theme_key, p.created_at, p.updated_at";

#[derive(Debug, FromRow)]
struct ProductCategoryRow {
    product_key: String,
    key: String,
    slug: String,
    name: String,
}

fn push_product_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &ProductQuery) {
    qb.push(" FROM products p WHERE p.deleted_at IS NULL");

    if let Some(enabled) = query.enabled {
        qb.push(" AND p.enabled = ");
        qb.push_bind(enabled);
    }
    if let Some(status_id) = query.status_id {
        qb.push(" AND p.status_id = ");
        qb.push_bind(status_id);
    }
    if let Some(theme_key) = query.theme_key.as_deref().filter(|s| !s.is_empty()) {
        qb.push(" AND p.theme_key = ");
        qb.push_bind(theme_key.to_string());
    }
    if let Some(category_key) = query.category_key.as_deref().filter(|s| !s.is_empty()) {
        qb.push(
            " AND EXISTS (SELECT 1 FROM products_to_categories pc \
             WHERE pc.product_key = p.key AND pc.category_key = ",
        );
        qb.push_bind(category_key.to_string());
        qb.push(")");
    }
    if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = contains_pattern(search);
        qb.push(" AND (p.name ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR p.slug ILIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }
}

/// Provides CRUD operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Create a product and its category links.
    ///
    /// Key and name checks include soft-deleted products, since both
    /// constraints span the whole table.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProduct,
    ) -> Result<ProductWriteOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let key_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM products WHERE key = $1)",
        )
        .bind(&input.key)
        .fetch_one(&mut *tx)
        .await?;
        if key_taken {
            return Ok(ProductWriteOutcome::KeyTaken);
        }

        if Self::name_taken(&mut tx, &input.name, None).await? {
            return Ok(ProductWriteOutcome::NameTaken);
        }

        if let Some(blocked) = Self::check_relations(
            &mut tx,
            input.theme_key.as_deref(),
            Some(input.category_keys.as_slice()),
        )
        .await?
        {
            return Ok(blocked);
        }

        let query = format!(
            "INSERT INTO products \
                (key, slug, name, image, price, description, enabled, status_id, theme_key) \
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, true), COALESCE($8, $9), $10) \
             RETURNING {COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(&input.key)
            .bind(slugify(&input.key))
            .bind(&input.name)
            .bind(&input.image)
            .bind(input.price)
            .bind(&input.description)
            .bind(input.enabled)
            .bind(input.status_id)
            .bind(ProductStatus::Available.id())
            .bind(&input.theme_key)
            .fetch_one(&mut *tx)
            .await?;

        Self::insert_links(&mut tx, &product.key, &input.category_keys).await?;

        let detail = Self::attach_relations(&mut tx, vec![product]).await?;
        tx.commit().await?;
        Ok(detail
            .into_iter()
            .next()
            .map_or(ProductWriteOutcome::NotFound, ProductWriteOutcome::Saved))
    }

    /// Find a live product with its theme and categories.
    pub async fn find_one(
        pool: &PgPool,
        key: &str,
        enabled: Option<bool>,
    ) -> Result<Option<ProductDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products \
             WHERE key = $1 AND deleted_at IS NULL \
               AND ($2::BOOLEAN IS NULL OR enabled = $2)"
        );
        let mut conn = pool.acquire().await?;
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(key)
            .bind(enabled)
            .fetch_optional(&mut *conn)
            .await?;

        match product {
            Some(product) => Ok(Self::attach_relations(&mut conn, vec![product])
                .await?
                .into_iter()
                .next()),
            None => Ok(None),
        }
    }

    /// List one page of live products ordered by key.
    pub async fn list_page(
        pool: &PgPool,
        query: &ProductQuery,
        page: PageRequest,
    ) -> Result<Page<ProductDetail>, sqlx::Error> {
        let mut conn = pool.acquire().await?;

        let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*)");
        push_product_filters(&mut count_qb, query);
        let total = count_qb
            .build_query_scalar::<i64>()
            .fetch_one(&mut *conn)
            .await?;

        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {P_COLUMNS}"));
        push_product_filters(&mut qb, query);
        qb.push(" ORDER BY p.key ASC LIMIT ");
        qb.push_bind(page.limit);
        qb.push(" OFFSET ");
        qb.push_bind(page.offset());

        let products = qb
            .build_query_as::<Product>()
            .fetch_all(&mut *conn)
            .await?;
        let items = Self::attach_relations(&mut conn, products).await?;
        Ok(Page::new(items, total, page))
    }

    /// Partially update a live product. `category_keys`, when given,
    /// replaces the link set.
    pub async fn update(
        pool: &PgPool,
        key: &str,
        input: &UpdateProduct,
    ) -> Result<ProductWriteOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let found = sqlx::query_scalar::<_, String>(
            "SELECT key FROM products WHERE key = $1 AND deleted_at IS NULL FOR UPDATE",
        )
        .bind(key)
        .fetch_optional(&mut *tx)
        .await?;
        if found.is_none() {
            return Ok(ProductWriteOutcome::NotFound);
        }

        if let Some(name) = input.name.as_deref() {
            if Self::name_taken(&mut tx, name, Some(key)).await? {
                return Ok(ProductWriteOutcome::NameTaken);
            }
        }

        if let Some(blocked) = Self::check_relations(
            &mut tx,
            input.theme_key.as_deref(),
            input.category_keys.as_deref(),
        )
        .await?
        {
            return Ok(blocked);
        }

        let query = format!(
            "UPDATE products SET \
                name = COALESCE($2, name), \
                price = COALESCE($3, price), \
                image = COALESCE($4, image), \
                description = COALESCE($5, description), \
                enabled = COALESCE($6, enabled), \
                status_id = COALESCE($7, status_id), \
                theme_key = COALESCE($8, theme_key) \
             WHERE key = $1 \
             RETURNING {COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(key)
            .bind(&input.name)
            .bind(input.price)
            .bind(&input.image)
            .bind(&input.description)
            .bind(input.enabled)
            .bind(input.status_id)
            .bind(&input.theme_key)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(category_keys) = &input.category_keys {
            sqlx::query("DELETE FROM products_to_categories WHERE product_key = $1")
                .bind(key)
                .execute(&mut *tx)
                .await?;
            Self::insert_links(&mut tx, key, category_keys).await?;
        }

        let detail = Self::attach_relations(&mut tx, vec![product]).await?;
        tx.commit().await?;
        Ok(detail
            .into_iter()
            .next()
            .map_or(ProductWriteOutcome::NotFound, ProductWriteOutcome::Saved))
    }

    /// Soft-delete a product and drop its category links.
    /// Returns `false` if no live product has this key.
    pub async fn soft_delete(pool: &PgPool, key: &str) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let affected = sqlx::query(
            "UPDATE products SET deleted_at = NOW() WHERE key = $1 AND deleted_at IS NULL",
        )
        .bind(key)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        if affected == 0 {
            return Ok(false);
        }

        let links = sqlx::query("DELETE FROM products_to_categories WHERE product_key = $1")
            .bind(key)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        tracing::debug!(product_key = %key, links, "Product soft-deleted");
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn name_taken(
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
        exclude_key: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM products \
             WHERE name = $1 AND ($2::TEXT IS NULL OR key <> $2))",
        )
        .bind(name)
        .bind(exclude_key)
        .fetch_one(&mut **tx)
        .await
    }

    /// Resolve the theme and category references of a write.
    async fn check_relations(
        tx: &mut Transaction<'_, Postgres>,
        theme_key: Option<&str>,
        category_keys: Option<&[String]>,
    ) -> Result<Option<ProductWriteOutcome>, sqlx::Error> {
        if let Some(theme_key) = theme_key {
            if !ThemeRepo::exists_live(tx, theme_key).await? {
                return Ok(Some(ProductWriteOutcome::UnknownTheme(theme_key.to_string())));
            }
        }
        if let Some(category_keys) = category_keys {
            let missing = CategoryRepo::missing_keys(tx, category_keys).await?;
            if let Some(first) = missing.into_iter().next() {
                return Ok(Some(ProductWriteOutcome::UnknownCategory(first)));
            }
        }
        Ok(None)
    }

    async fn insert_links(
        tx: &mut Transaction<'_, Postgres>,
        product_key: &str,
        category_keys: &[String],
    ) -> Result<(), sqlx::Error> {
        if category_keys.is_empty() {
            return Ok(());
        }
        sqlx::query(
            "INSERT INTO products_to_categories (product_key, category_key) \
             SELECT $1, UNNEST($2::TEXT[]) \
             ON CONFLICT ON CONSTRAINT uq_products_to_categories_pair DO NOTHING",
        )
        .bind(product_key)
        .bind(category_keys)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Load the live theme and categories of each product, preserving order.
    async fn attach_relations(
        conn: &mut PgConnection,
        products: Vec<Product>,
    ) -> Result<Vec<ProductDetail>, sqlx::Error> {
        if products.is_empty() {
            return Ok(Vec::new());
        }

        let product_keys: Vec<String> = products.iter().map(|p| p.key.clone()).collect();
        let theme_keys: Vec<String> = products
            .iter()
            .filter_map(|p| p.theme_key.clone())
            .collect();

        let themes: HashMap<String, ThemeSummary> = sqlx::query_as::<_, ThemeSummary>(
            "SELECT key, slug, name FROM themes WHERE key = ANY($1) AND deleted_at IS NULL",
        )
        .bind(&theme_keys)
        .fetch_all(&mut *conn)
        .await?
        .into_iter()
        .map(|t| (t.key.clone(), t))
        .collect();

        let category_rows = sqlx::query_as::<_, ProductCategoryRow>(
            "SELECT pc.product_key, c.key, c.slug, c.name \
             FROM products_to_categories pc \
             INNER JOIN categories c ON c.key = pc.category_key AND c.deleted_at IS NULL \
             WHERE pc.product_key = ANY($1) \
             ORDER BY c.key ASC",
        )
        .bind(&product_keys)
        .fetch_all(&mut *conn)
        .await?;

        let mut categories: HashMap<String, Vec<CategorySummary>> = HashMap::new();
        for row in category_rows {
            categories
                .entry(row.product_key)
                .or_default()
                .push(CategorySummary {
                    key: row.key,
                    slug: row.slug,
                    name: row.name,
                });
        }

        Ok(products
            .into_iter()
            .map(|product| {
                let theme = product
                    .theme_key
                    .as_ref()
                    .and_then(|k| themes.get(k).cloned());
                let categories = categories.remove(&product.key).unwrap_or_default();
                ProductDetail {
                    product,
                    theme,
                    categories,
                }
            })
            .collect())
    }
}
