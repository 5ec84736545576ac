//! Message-language extractor for Axum handlers.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::request::Parts;
use catalog_core::lang::Lang;

use crate::state::AppState;

/// Language for error and status messages in the response.
///
/// Taken from the first supported tag of `Accept-Language`; falls back to
/// the configured default. Never rejects.
///
/// ```ignore
/// async fn my_handler(RequestLang(lang): RequestLang) -> AppResult<Json<()>> {
///     tracing::debug!(%lang, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLang(pub Lang);

impl FromRequestParts<AppState> for RequestLang {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let lang = parts
            .headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok())
            .and_then(Lang::from_accept_language)
            .unwrap_or(state.config.default_lang);

        Ok(RequestLang(lang))
    }
}
