//! Repository for the `topics` and `topic_translations` tables.
//!
//! Reads always inner-join the live translation in the requested language,
//! so a topic without a translation in that language is invisible to the
//! query. Writes that touch both tables run in one transaction.

use catalog_core::lang::Lang;
use catalog_core::naming::slugify;
use catalog_core::pagination::{Page, PageRequest};
use catalog_core::types::{DbId, Timestamp};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Transaction};

use crate::models::topic::{
    CreateTopic, FeatureTopic, SoftDeleteCounts, Topic, TopicCreateOutcome, TopicDeleteOutcome,
    TopicQuery, TopicTranslation, TopicUpdateOutcome, TopicWithTranslations, UpdateTopic,
};
use crate::repositories::contains_pattern;
use crate::repositories::TopicLinkRepo;

/// Column list for the `topics` table.
const COLUMNS: &str = "key, slug, description, enabled, created_at, updated_at";

/// Column list for the `topic_translations` table.
const TRANSLATION_COLUMNS: &str =
    "id, topic_key, lang, name, description, created_at, updated_at";

/// Column list for the topic ⨝ translation read. Translation columns are
/// prefixed `tr_` so both sides decode into one flat row.
const JOIN_COLUMNS: &str = "t.key, t.slug, t.description, t.enabled, t.created_at, t.updated_at, \
    tr.id AS tr_id, tr.lang AS tr_lang, tr.name AS tr_name, \
    tr.description AS tr_description, tr.created_at AS tr_created_at, \
    tr.updated_at AS tr_updated_at";

/// Flat row produced by the join read.
#[derive(Debug, FromRow)]
struct TopicJoinRow {
    key: String,
    slug: String,
    description: Option<String>,
    enabled: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
    tr_id: DbId,
    tr_lang: String,
    tr_name: String,
    tr_description: Option<String>,
    tr_created_at: Timestamp,
    tr_updated_at: Timestamp,
}

impl TopicJoinRow {
    fn split(self) -> (Topic, TopicTranslation) {
        let translation = TopicTranslation {
            id: self.tr_id,
            topic_key: self.key.clone(),
            lang: self.tr_lang,
            name: self.tr_name,
            description: self.tr_description,
            created_at: self.tr_created_at,
            updated_at: self.tr_updated_at,
        };
        let topic = Topic {
            key: self.key,
            slug: self.slug,
            description: self.description,
            enabled: self.enabled,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        (topic, translation)
    }
}

/// Fold key-ordered join rows into one entry per topic.
fn group_rows(rows: Vec<TopicJoinRow>) -> Vec<TopicWithTranslations> {
    let mut grouped: Vec<TopicWithTranslations> = Vec::with_capacity(rows.len());
    for row in rows {
        let (topic, translation) = row.split();
        match grouped.last_mut() {
            Some(last) if last.topic.key == topic.key => last.translations.push(translation),
            _ => grouped.push(TopicWithTranslations {
                topic,
                translations: vec![translation],
            }),
        }
    }
    grouped
}

/// Append the `FROM … JOIN … WHERE …` part shared by every topic read.
fn push_topic_source(qb: &mut QueryBuilder<'_, Postgres>, query: &TopicQuery, key: Option<&str>) {
    qb.push(
        " FROM topics t \
         INNER JOIN topic_translations tr \
            ON tr.topic_key = t.key AND tr.deleted_at IS NULL AND tr.lang = ",
    );
    qb.push_bind(query.lang.as_str());
    qb.push(" WHERE t.deleted_at IS NULL");

    if let Some(key) = key {
        qb.push(" AND t.key = ");
        qb.push_bind(key.to_string());
    }
    if let Some(enabled) = query.enabled {
        qb.push(" AND t.enabled = ");
        qb.push_bind(enabled);
    }
    if let Some(slug) = query.slug.as_deref().filter(|s| !s.is_empty()) {
        qb.push(" AND t.slug LIKE ");
        qb.push_bind(contains_pattern(slug));
    }
}

/// Provides CRUD and read-model queries for topics.
pub struct TopicRepo;

impl TopicRepo {
    // -----------------------------------------------------------------------
    // Create
    // -----------------------------------------------------------------------

    /// Create a topic and its first translation.
    ///
    /// The name check spans every live translation of every topic; the key
    /// check includes soft-deleted topics because the key stays occupied.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTopic,
    ) -> Result<TopicCreateOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        Self::lock_name(&mut tx, &input.name).await?;
        if Self::translation_name_owner(&mut tx, &input.name, None)
            .await?
            .is_some()
        {
            return Ok(TopicCreateOutcome::NameTaken);
        }

        let key_taken =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM topics WHERE key = $1)")
                .bind(&input.key)
                .fetch_one(&mut *tx)
                .await?;
        if key_taken {
            return Ok(TopicCreateOutcome::KeyTaken);
        }

        let insert_topic = format!(
            "INSERT INTO topics (key, slug, description, enabled) \
             VALUES ($1, $2, $3, COALESCE($4, true)) \
             RETURNING {COLUMNS}"
        );
        let topic = sqlx::query_as::<_, Topic>(&insert_topic)
            .bind(&input.key)
            .bind(slugify(&input.key))
            .bind(&input.description)
            .bind(input.enabled)
            .fetch_one(&mut *tx)
            .await?;

        let translation = Self::insert_translation(
            &mut tx,
            &topic.key,
            input.lang,
            &input.name,
            input.description.as_deref(),
        )
        .await?;

        tx.commit().await?;
        Ok(TopicCreateOutcome::Created(TopicWithTranslations {
            topic,
            translations: vec![translation],
        }))
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Find a live topic row by key, without translations.
    pub async fn find_by_key(pool: &PgPool, key: &str) -> Result<Option<Topic>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM topics WHERE key = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Topic>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// Find one topic with its translation in `query.lang`.
    ///
    /// Returns `None` when the topic is missing, soft-deleted, filtered out
    /// by `enabled`, or has no translation in that language.
    pub async fn find_one(
        pool: &PgPool,
        key: &str,
        query: &TopicQuery,
    ) -> Result<Option<TopicWithTranslations>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {JOIN_COLUMNS}"));
        push_topic_source(&mut qb, query, Some(key));
        qb.push(" ORDER BY t.key ASC");

        let rows = qb.build_query_as::<TopicJoinRow>().fetch_all(pool).await?;
        Ok(group_rows(rows).into_iter().next())
    }

    /// List every matching topic ordered by key.
    pub async fn list(
        pool: &PgPool,
        query: &TopicQuery,
    ) -> Result<Vec<TopicWithTranslations>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {JOIN_COLUMNS}"));
        push_topic_source(&mut qb, query, None);
        qb.push(" ORDER BY t.key ASC");

        let rows = qb.build_query_as::<TopicJoinRow>().fetch_all(pool).await?;
        Ok(group_rows(rows))
    }

    /// List one page of matching topics ordered by key.
    pub async fn list_page(
        pool: &PgPool,
        query: &TopicQuery,
        page: PageRequest,
    ) -> Result<Page<TopicWithTranslations>, sqlx::Error> {
        let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(DISTINCT t.key)");
        push_topic_source(&mut count_qb, query, None);
        let total = count_qb
            .build_query_scalar::<i64>()
            .fetch_one(pool)
            .await?;

        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {JOIN_COLUMNS}"));
        push_topic_source(&mut qb, query, None);
        qb.push(" ORDER BY t.key ASC LIMIT ");
        qb.push_bind(page.limit);
        qb.push(" OFFSET ");
        qb.push_bind(page.offset());

        let rows = qb.build_query_as::<TopicJoinRow>().fetch_all(pool).await?;
        Ok(Page::new(group_rows(rows), total, page))
    }

    /// The most-selected topics, by number of `users_to_topics` rows.
    ///
    /// Soft-deleted topics are skipped. Ties are broken by key.
    pub async fn feature_topics(
        pool: &PgPool,
        lang: Lang,
        limit: i64,
    ) -> Result<Vec<FeatureTopic>, sqlx::Error> {
        sqlx::query_as::<_, FeatureTopic>(
            "SELECT ut.topic_key, tr.name, COUNT(ut.topic_key) AS selections \
             FROM users_to_topics ut \
             INNER JOIN topics t ON t.key = ut.topic_key AND t.deleted_at IS NULL \
             LEFT JOIN topic_translations tr \
                ON tr.topic_key = t.key AND tr.lang = $1 AND tr.deleted_at IS NULL \
             GROUP BY ut.topic_key, tr.name \
             ORDER BY selections DESC, ut.topic_key ASC \
             LIMIT $2",
        )
        .bind(lang.as_str())
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Update
    // -----------------------------------------------------------------------

    /// Update a topic's `description`/`enabled` and upsert its translation
    /// in `lang`.
    ///
    /// The translation is updated in place when one exists for
    /// `(key, lang)`; otherwise it is inserted, which requires a name.
    pub async fn update(
        pool: &PgPool,
        key: &str,
        lang: Lang,
        input: &UpdateTopic,
    ) -> Result<TopicUpdateOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !Self::lock_live(&mut tx, key).await? {
            return Ok(TopicUpdateOutcome::NotFound);
        }

        if let Some(name) = input.name.as_deref() {
            Self::lock_name(&mut tx, name).await?;
            if Self::translation_name_owner(&mut tx, name, Some(key))
                .await?
                .is_some()
            {
                return Ok(TopicUpdateOutcome::NameTaken);
            }
        }

        sqlx::query(
            "UPDATE topics SET \
                description = COALESCE($2, description), \
                enabled = COALESCE($3, enabled) \
             WHERE key = $1",
        )
        .bind(key)
        .bind(&input.description)
        .bind(input.enabled)
        .execute(&mut *tx)
        .await?;

        let existing = sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM topic_translations \
             WHERE topic_key = $1 AND lang = $2 AND deleted_at IS NULL",
        )
        .bind(key)
        .bind(lang.as_str())
        .fetch_optional(&mut *tx)
        .await?;

        match (existing, input.name.as_deref()) {
            (Some(id), _) => {
                sqlx::query(
                    "UPDATE topic_translations SET \
                        name = COALESCE($2, name), \
                        description = COALESCE($3, description) \
                     WHERE id = $1",
                )
                .bind(id)
                .bind(&input.name)
                .bind(&input.description)
                .execute(&mut *tx)
                .await?;
            }
            (None, Some(name)) => {
                Self::insert_translation(&mut tx, key, lang, name, input.description.as_deref())
                    .await?;
            }
            (None, None) => return Ok(TopicUpdateOutcome::NameRequired),
        }

        tx.commit().await?;
        Ok(TopicUpdateOutcome::Updated)
    }

    // -----------------------------------------------------------------------
    // Soft delete
    // -----------------------------------------------------------------------

    /// Soft-delete one topic and all of its translations.
    ///
    /// Refused while any audio or video association references the key.
    pub async fn soft_delete(pool: &PgPool, key: &str) -> Result<TopicDeleteOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !Self::lock_live(&mut tx, key).await? {
            return Ok(TopicDeleteOutcome::NotFound);
        }

        let keys = [key.to_string()];
        if let Some(blocked) = Self::reference_guard(&mut tx, &keys).await? {
            return Ok(blocked);
        }

        let counts = Self::soft_delete_inner(&mut tx, &keys).await?;
        tx.commit().await?;
        Ok(TopicDeleteOutcome::Deleted(counts))
    }

    /// Soft-delete every live topic in `keys` and their translations.
    ///
    /// The reference guard covers the whole set: one linked key blocks the
    /// batch. Returns `NotFound` when no live topic matched.
    pub async fn soft_delete_many(
        pool: &PgPool,
        keys: &[String],
    ) -> Result<TopicDeleteOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        Self::lock_live_many(&mut tx, keys).await?;
        if let Some(blocked) = Self::reference_guard(&mut tx, keys).await? {
            return Ok(blocked);
        }

        let counts = Self::soft_delete_inner(&mut tx, keys).await?;
        if counts.topics == 0 {
            return Ok(TopicDeleteOutcome::NotFound);
        }

        tx.commit().await?;
        Ok(TopicDeleteOutcome::Deleted(counts))
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Key of a topic, other than `exclude_key`, owning a live translation
    /// named `name`.
    async fn translation_name_owner(
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
        exclude_key: Option<&str>,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT topic_key FROM topic_translations \
             WHERE name = $1 AND deleted_at IS NULL \
               AND ($2::TEXT IS NULL OR topic_key <> $2) \
             LIMIT 1",
        )
        .bind(name)
        .bind(exclude_key)
        .fetch_optional(&mut **tx)
        .await
    }

    /// Serialize writers of the same translation name until the transaction
    /// ends. No table constraint covers names across topics.
    async fn lock_name(tx: &mut Transaction<'_, Postgres>, name: &str) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(name)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Lock a live topic row for the rest of the transaction.
    /// Returns `false` if no live topic has this key.
    async fn lock_live(tx: &mut Transaction<'_, Postgres>, key: &str) -> Result<bool, sqlx::Error> {
        let found = sqlx::query_scalar::<_, String>(
            "SELECT key FROM topics WHERE key = $1 AND deleted_at IS NULL FOR UPDATE",
        )
        .bind(key)
        .fetch_optional(&mut **tx)
        .await?;
        Ok(found.is_some())
    }

    /// Lock every live topic row in `keys`, in key order.
    async fn lock_live_many(
        tx: &mut Transaction<'_, Postgres>,
        keys: &[String],
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "SELECT key FROM topics WHERE key = ANY($1) AND deleted_at IS NULL \
             ORDER BY key FOR UPDATE",
        )
        .bind(keys)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    async fn insert_translation(
        tx: &mut Transaction<'_, Postgres>,
        topic_key: &str,
        lang: Lang,
        name: &str,
        description: Option<&str>,
    ) -> Result<TopicTranslation, sqlx::Error> {
        let query = format!(
            "INSERT INTO topic_translations (topic_key, lang, name, description) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {TRANSLATION_COLUMNS}"
        );
        sqlx::query_as::<_, TopicTranslation>(&query)
            .bind(topic_key)
            .bind(lang.as_str())
            .bind(name)
            .bind(description)
            .fetch_one(&mut **tx)
            .await
    }

    /// Audio links are checked before video links.
    async fn reference_guard(
        tx: &mut Transaction<'_, Postgres>,
        keys: &[String],
    ) -> Result<Option<TopicDeleteOutcome>, sqlx::Error> {
        if TopicLinkRepo::any_audio_linked(tx, keys).await? {
            return Ok(Some(TopicDeleteOutcome::LinkedToAudio));
        }
        if TopicLinkRepo::any_video_linked(tx, keys).await? {
            return Ok(Some(TopicDeleteOutcome::LinkedToVideo));
        }
        Ok(None)
    }

    async fn soft_delete_inner(
        tx: &mut Transaction<'_, Postgres>,
        keys: &[String],
    ) -> Result<SoftDeleteCounts, sqlx::Error> {
        let topics = sqlx::query(
            "UPDATE topics SET deleted_at = NOW() \
             WHERE key = ANY($1) AND deleted_at IS NULL",
        )
        .bind(keys)
        .execute(&mut **tx)
        .await?
        .rows_affected();

        let translations = sqlx::query(
            "UPDATE topic_translations SET deleted_at = NOW() \
             WHERE topic_key = ANY($1) AND deleted_at IS NULL",
        )
        .bind(keys)
        .execute(&mut **tx)
        .await?
        .rows_affected();

        Ok(SoftDeleteCounts {
            topics,
            translations,
        })
    }
}
