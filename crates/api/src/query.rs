//! Shared query parameter types for API handlers.
//!
//! `lang` is accepted as a raw string and resolved with [`resolve_lang`] so
//! an unsupported code produces the standard JSON validation error rather
//! than a plain-text query rejection.

use catalog_core::error::CoreError;
use catalog_core::lang::Lang;
use catalog_core::pagination::PageRequest;
use serde::Deserialize;

/// Resolve an optional `?lang=` value, falling back to `default`.
pub fn resolve_lang(raw: Option<&str>, default: Lang) -> Result<Lang, CoreError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(code) => code.parse(),
        None => Ok(default),
    }
}

/// `?lang=&enabled=` for single-topic and unpaginated topic reads.
#[derive(Debug, Default, Deserialize)]
pub struct TopicParams {
    pub lang: Option<String>,
    pub enabled: Option<bool>,
}

/// `?page=&limit=&lang=&enabled=&slug=` for the admin topic list.
/// `slug` is ignored by client routes.
#[derive(Debug, Default, Deserialize)]
pub struct TopicListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub lang: Option<String>,
    pub enabled: Option<bool>,
    pub slug: Option<String>,
}

impl TopicListParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

/// `?lang=` alone.
#[derive(Debug, Default, Deserialize)]
pub struct LangParams {
    pub lang: Option<String>,
}

/// `?keys=a,b,c` for bulk deletes.
#[derive(Debug, Default, Deserialize)]
pub struct KeysParams {
    pub keys: Option<String>,
}

/// `?enabled=` alone.
#[derive(Debug, Default, Deserialize)]
pub struct EnabledParams {
    pub enabled: Option<bool>,
}

/// Filters and pagination for the admin product list.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub enabled: Option<bool>,
    pub status_id: Option<i16>,
    pub theme_key: Option<String>,
    pub category_key: Option<String>,
    pub search: Option<String>,
}

impl ProductListParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}
