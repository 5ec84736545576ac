//! Handlers for admin product management.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::error::CoreError;
use catalog_core::i18n::{not_found, t, Message};
use catalog_core::lang::Lang;
use catalog_db::models::product::{
    CreateProduct, ProductDetail, ProductQuery, ProductWriteOutcome, UpdateProduct,
};
use catalog_db::models::status::{ProductStatus, StatusId};
use catalog_db::repositories::ProductRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::lang::RequestLang;
use crate::query::{EnabledParams, ProductListParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Route the pagination links point at, relative to `/api/v1`.
pub const PRODUCTS_ROUTE: &str = "/admin/products";

fn check_status(lang: Lang, status_id: Option<StatusId>) -> AppResult<()> {
    match status_id {
        Some(id) if ProductStatus::from_id(id).is_none() => Err(AppError::Core(
            CoreError::Validation(t(lang, Message::UnknownStatus).to_string()),
        )),
        _ => Ok(()),
    }
}

/// Unwrap a saved product or map the failed outcome to its error.
fn saved_or_error(lang: Lang, key: &str, outcome: ProductWriteOutcome) -> AppResult<ProductDetail> {
    let conflict = |msg| AppError::Core(CoreError::Conflict(t(lang, msg).to_string()));
    match outcome {
        ProductWriteOutcome::Saved(detail) => Ok(detail),
        ProductWriteOutcome::NotFound => {
            Err(AppError::Core(not_found(lang, Message::ProductNotFound, key)))
        }
        ProductWriteOutcome::KeyTaken => Err(conflict(Message::ProductExists)),
        ProductWriteOutcome::NameTaken => Err(conflict(Message::ProductNameTaken)),
        ProductWriteOutcome::UnknownTheme(theme_key) => Err(AppError::Core(not_found(
            lang,
            Message::ThemeNotFound,
            theme_key,
        ))),
        ProductWriteOutcome::UnknownCategory(category_key) => Err(AppError::Core(not_found(
            lang,
            Message::CategoryNotFound,
            category_key,
        ))),
    }
}

/// POST /api/v1/admin/products
pub async fn create_product(
    RequestLang(msg_lang): RequestLang,
    State(state): State<AppState>,
    Json(input): Json<CreateProduct>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    check_status(msg_lang, input.status_id)?;

    let outcome = ProductRepo::create(&state.pool, &input).await?;
    let product = saved_or_error(msg_lang, &input.key, outcome)?;

    tracing::info!(
        product_key = %product.product.key,
        categories = product.categories.len(),
        "Product created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: product })))
}

/// GET /api/v1/admin/products
///
/// Paginated list with HATEOAS links rooted at the public base URL.
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> AppResult<impl IntoResponse> {
    let query = ProductQuery {
        enabled: params.enabled,
        status_id: params.status_id,
        theme_key: params.theme_key.clone(),
        category_key: params.category_key.clone(),
        search: params.search.clone(),
    };

    let page = ProductRepo::list_page(&state.pool, &query, params.page_request())
        .await?
        .with_route(&state.config.api_url(PRODUCTS_ROUTE));

    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/admin/products/{key}
pub async fn get_product(
    RequestLang(msg_lang): RequestLang,
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(params): Query<EnabledParams>,
) -> AppResult<impl IntoResponse> {
    let product = ProductRepo::find_one(&state.pool, &key, params.enabled)
        .await?
        .ok_or_else(|| AppError::Core(not_found(msg_lang, Message::ProductNotFound, &key)))?;

    Ok(Json(DataResponse { data: product }))
}

/// PATCH /api/v1/admin/products/{key}
///
/// Partial update. The key is immutable.
pub async fn update_product(
    RequestLang(msg_lang): RequestLang,
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    check_status(msg_lang, input.status_id)?;

    let outcome = ProductRepo::update(&state.pool, &key, &input).await?;
    let product = saved_or_error(msg_lang, &key, outcome)?;

    tracing::info!(product_key = %key, "Product updated");

    Ok(Json(DataResponse { data: product }))
}

/// DELETE /api/v1/admin/products/{key}
pub async fn delete_product(
    RequestLang(msg_lang): RequestLang,
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<impl IntoResponse> {
    if !ProductRepo::soft_delete(&state.pool, &key).await? {
        return Err(AppError::Core(not_found(
            msg_lang,
            Message::ProductNotFound,
            &key,
        )));
    }

    tracing::info!(product_key = %key, "Product soft-deleted");

    Ok(StatusCode::NO_CONTENT)
}
