//! Handlers for admin theme management.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::error::CoreError;
use catalog_core::i18n::{t, Message};
use catalog_db::models::theme::CreateTheme;
use catalog_db::repositories::ThemeRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::lang::RequestLang;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/themes
pub async fn list_themes(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let themes = ThemeRepo::list(&state.pool).await?;

    Ok(Json(DataResponse { data: themes }))
}

/// POST /api/v1/admin/themes
pub async fn create_theme(
    RequestLang(msg_lang): RequestLang,
    State(state): State<AppState>,
    Json(input): Json<CreateTheme>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let theme = ThemeRepo::create(&state.pool, &input).await?.ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            t(msg_lang, Message::ThemeExists).to_string(),
        ))
    })?;

    tracing::info!(theme_key = %theme.key, "Theme created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: theme })))
}
