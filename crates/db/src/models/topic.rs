//! Topic, topic translation and topic association models and DTOs.

use catalog_core::lang::Lang;
use catalog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::validation::{validate_key, validate_not_blank};

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `topics` table. `key` is the immutable primary key.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Topic {
    pub key: String,
    pub slug: String,
    pub description: Option<String>,
    pub enabled: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `topic_translations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TopicTranslation {
    pub id: DbId,
    pub topic_key: String,
    pub lang: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A topic together with the translations selected by the read query.
#[derive(Debug, Clone, Serialize)]
pub struct TopicWithTranslations {
    #[serde(flatten)]
    pub topic: Topic,
    pub translations: Vec<TopicTranslation>,
}

/// One row of the feature-topics ranking.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureTopic {
    pub topic_key: String,
    /// `None` when the topic has no translation in the requested language.
    pub name: Option<String>,
    pub selections: i64,
}

/// Row counts touched by a soft delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SoftDeleteCounts {
    pub topics: u64,
    pub translations: u64,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a topic together with its first translation.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTopic {
    #[validate(custom(function = "validate_key"))]
    pub key: String,
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
    pub lang: Lang,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub enabled: Option<bool>,
}

/// DTO for updating a topic. The key is immutable and is not accepted here;
/// a `key` field in the body is ignored.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTopic {
    /// Translation to update or insert. Defaults to the configured language.
    pub lang: Option<Lang>,
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub enabled: Option<bool>,
}

// ---------------------------------------------------------------------------
// Query specification
// ---------------------------------------------------------------------------

/// Active predicates for a topic read.
///
/// Every topic read inner-joins the live translation in `lang`, so topics
/// without a translation in that language are never returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicQuery {
    pub lang: Lang,
    pub enabled: Option<bool>,
    /// Substring match on `topics.slug`.
    pub slug: Option<String>,
}

impl TopicQuery {
    /// A query that only filters by language.
    pub fn for_lang(lang: Lang) -> Self {
        Self {
            lang,
            enabled: None,
            slug: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Write outcomes
// ---------------------------------------------------------------------------

/// Result of [`TopicRepo::create`](crate::repositories::TopicRepo::create).
#[derive(Debug)]
pub enum TopicCreateOutcome {
    Created(TopicWithTranslations),
    /// A live translation of some topic already uses the name.
    NameTaken,
    /// A topic (live or soft-deleted) already occupies the key.
    KeyTaken,
}

/// Result of [`TopicRepo::update`](crate::repositories::TopicRepo::update).
#[derive(Debug, PartialEq, Eq)]
pub enum TopicUpdateOutcome {
    Updated,
    NotFound,
    /// Another topic owns a live translation with the requested name.
    NameTaken,
    /// No translation exists for the language and no name was supplied.
    NameRequired,
}

/// Result of a topic soft delete (single or bulk).
#[derive(Debug, PartialEq, Eq)]
pub enum TopicDeleteOutcome {
    Deleted(SoftDeleteCounts),
    NotFound,
    LinkedToAudio,
    LinkedToVideo,
}
