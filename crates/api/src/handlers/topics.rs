//! Handlers for multilingual topics.
//!
//! Admin endpoints manage topics and their translations; client endpoints
//! are read-only and omit admin-only filters. `?lang=` selects the content
//! language, while `Accept-Language` selects the language of error messages.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::error::CoreError;
use catalog_core::i18n::{not_found, t, Message};
use catalog_core::lang::Lang;
use catalog_core::naming::parse_key_list;
use catalog_db::models::topic::{
    CreateTopic, TopicCreateOutcome, TopicDeleteOutcome, TopicQuery, TopicUpdateOutcome,
    UpdateTopic,
};
use catalog_db::repositories::TopicRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::lang::RequestLang;
use crate::query::{resolve_lang, KeysParams, LangParams, TopicListParams, TopicParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Number of entries returned by the feature-topics ranking.
pub const FEATURE_TOPICS_LIMIT: i64 = 4;

fn conflict(lang: Lang, msg: Message) -> AppError {
    AppError::Core(CoreError::Conflict(t(lang, msg).to_string()))
}

/// Map a delete outcome that did not succeed to its error.
fn delete_error(lang: Lang, key: &str, outcome: TopicDeleteOutcome) -> AppError {
    match outcome {
        TopicDeleteOutcome::LinkedToAudio => conflict(lang, Message::TopicLinkedToAudio),
        TopicDeleteOutcome::LinkedToVideo => conflict(lang, Message::TopicLinkedToVideo),
        TopicDeleteOutcome::NotFound | TopicDeleteOutcome::Deleted(_) => {
            AppError::Core(not_found(lang, Message::TopicNotFound, key))
        }
    }
}

// ---------------------------------------------------------------------------
// Admin endpoints
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/topics
///
/// Create a topic with its first translation.
pub async fn create_topic(
    RequestLang(msg_lang): RequestLang,
    State(state): State<AppState>,
    Json(input): Json<CreateTopic>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let created = match TopicRepo::create(&state.pool, &input).await? {
        TopicCreateOutcome::Created(topic) => topic,
        TopicCreateOutcome::NameTaken => return Err(conflict(msg_lang, Message::TopicNameTaken)),
        TopicCreateOutcome::KeyTaken => return Err(conflict(msg_lang, Message::TopicExists)),
    };

    tracing::info!(
        topic_key = %created.topic.key,
        lang = %input.lang,
        "Topic created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/admin/topics
///
/// Paginated topic list with admin filters (`enabled`, `slug`).
pub async fn list_topics_admin(
    State(state): State<AppState>,
    Query(params): Query<TopicListParams>,
) -> AppResult<impl IntoResponse> {
    let lang = resolve_lang(params.lang.as_deref(), state.config.default_lang)?;
    let query = TopicQuery {
        lang,
        enabled: params.enabled,
        slug: params.slug.clone(),
    };

    let page = TopicRepo::list_page(&state.pool, &query, params.page_request()).await?;

    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/admin/topics/{key}
///
/// A single topic with its translation in `lang`.
pub async fn get_topic(
    RequestLang(msg_lang): RequestLang,
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(params): Query<TopicParams>,
) -> AppResult<impl IntoResponse> {
    let lang = resolve_lang(params.lang.as_deref(), state.config.default_lang)?;
    let query = TopicQuery {
        enabled: params.enabled,
        ..TopicQuery::for_lang(lang)
    };

    let topic = TopicRepo::find_one(&state.pool, &key, &query)
        .await?
        .ok_or_else(|| AppError::Core(not_found(msg_lang, Message::TopicNotFound, &key)))?;

    Ok(Json(DataResponse { data: topic }))
}

/// PUT /api/v1/admin/topics/{key}
///
/// Update `description`/`enabled` and upsert the translation in `lang`.
/// Returns the refreshed view in that language.
pub async fn update_topic(
    RequestLang(msg_lang): RequestLang,
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(input): Json<UpdateTopic>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let lang = input.lang.unwrap_or(state.config.default_lang);

    match TopicRepo::update(&state.pool, &key, lang, &input).await? {
        TopicUpdateOutcome::Updated => {}
        TopicUpdateOutcome::NotFound => {
            return Err(AppError::Core(not_found(
                msg_lang,
                Message::TopicNotFound,
                &key,
            )))
        }
        TopicUpdateOutcome::NameTaken => return Err(conflict(msg_lang, Message::TopicNameTaken)),
        TopicUpdateOutcome::NameRequired => {
            return Err(AppError::Core(CoreError::Validation(
                t(msg_lang, Message::TranslationNameRequired).to_string(),
            )))
        }
    }

    tracing::info!(topic_key = %key, %lang, "Topic updated");

    let topic = TopicRepo::find_one(&state.pool, &key, &TopicQuery::for_lang(lang))
        .await?
        .ok_or_else(|| AppError::Core(not_found(msg_lang, Message::TopicNotFound, &key)))?;

    Ok(Json(DataResponse { data: topic }))
}

/// DELETE /api/v1/admin/topics/{key}
///
/// Soft-delete a topic and its translations. Refused while audio or video
/// associations reference it.
pub async fn delete_topic(
    RequestLang(msg_lang): RequestLang,
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<impl IntoResponse> {
    match TopicRepo::soft_delete(&state.pool, &key).await? {
        TopicDeleteOutcome::Deleted(counts) => {
            tracing::info!(
                topic_key = %key,
                translations = counts.translations,
                "Topic soft-deleted",
            );
            Ok(StatusCode::NO_CONTENT)
        }
        other => Err(delete_error(msg_lang, &key, other)),
    }
}

/// DELETE /api/v1/admin/topics?keys=a,b
///
/// Bulk soft delete. Returns the affected row counts.
pub async fn delete_topics(
    RequestLang(msg_lang): RequestLang,
    State(state): State<AppState>,
    Query(params): Query<KeysParams>,
) -> AppResult<impl IntoResponse> {
    let keys = parse_key_list(params.keys.as_deref().unwrap_or_default());
    if keys.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            t(msg_lang, Message::EmptyKeyList).to_string(),
        )));
    }

    match TopicRepo::soft_delete_many(&state.pool, &keys).await? {
        TopicDeleteOutcome::Deleted(counts) => {
            tracing::info!(
                requested = keys.len(),
                topics = counts.topics,
                translations = counts.translations,
                "Topics soft-deleted",
            );
            Ok(Json(DataResponse { data: counts }))
        }
        other => Err(delete_error(msg_lang, &keys.join(","), other)),
    }
}

// ---------------------------------------------------------------------------
// Client endpoints
// ---------------------------------------------------------------------------

/// GET /api/v1/topics
///
/// Every topic with a translation in `lang`, ordered by key.
pub async fn list_topics_client(
    State(state): State<AppState>,
    Query(params): Query<TopicParams>,
) -> AppResult<impl IntoResponse> {
    let lang = resolve_lang(params.lang.as_deref(), state.config.default_lang)?;
    let query = TopicQuery {
        enabled: params.enabled,
        ..TopicQuery::for_lang(lang)
    };

    let topics = TopicRepo::list(&state.pool, &query).await?;

    Ok(Json(DataResponse { data: topics }))
}

/// GET /api/v1/topics/paginated
pub async fn list_topics_client_paginated(
    State(state): State<AppState>,
    Query(params): Query<TopicListParams>,
) -> AppResult<impl IntoResponse> {
    let lang = resolve_lang(params.lang.as_deref(), state.config.default_lang)?;
    let query = TopicQuery {
        enabled: params.enabled,
        ..TopicQuery::for_lang(lang)
    };

    let page = TopicRepo::list_page(&state.pool, &query, params.page_request()).await?;

    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/topics/features
///
/// The most-selected topics.
pub async fn feature_topics(
    State(state): State<AppState>,
    Query(params): Query<LangParams>,
) -> AppResult<impl IntoResponse> {
    let lang = resolve_lang(params.lang.as_deref(), state.config.default_lang)?;

    let features = TopicRepo::feature_topics(&state.pool, lang, FEATURE_TOPICS_LIMIT).await?;

    Ok(Json(DataResponse { data: features }))
}
