//! Handlers for admin category management.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::error::CoreError;
use catalog_core::i18n::{t, Message};
use catalog_db::models::category::CreateCategory;
use catalog_db::repositories::CategoryRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::lang::RequestLang;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list(&state.pool).await?;

    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/v1/admin/categories
pub async fn create_category(
    RequestLang(msg_lang): RequestLang,
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let category = CategoryRepo::create(&state.pool, &input).await?.ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            t(msg_lang, Message::CategoryExists).to_string(),
        ))
    })?;

    tracing::info!(category_key = %category.key, "Category created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}
