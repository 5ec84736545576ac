//! Offset pagination: request clamping, page metadata and HATEOAS links.
//!
//! The JSON shape (`items` / `meta` / `links`, camelCase meta fields) is what
//! existing admin frontends already consume.

use serde::Serialize;

/// Page used when the client sends none.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the client sends none.
pub const DEFAULT_LIMIT: i64 = 10;

/// Hard server-side ceiling on page size.
pub const MAX_LIMIT: i64 = 100;

/// Clamp a client-provided page size into `1..=MAX_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Clamp a client-provided page number to at least 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(DEFAULT_PAGE).max(1)
}

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Build a page request from raw query values, applying defaults and clamps.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: clamp_page(page),
            limit: clamp_limit(limit),
        }
    }

    /// Row offset for SQL `OFFSET`.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Page metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total_items: i64,
    pub item_count: i64,
    pub items_per_page: i64,
    pub total_pages: i64,
    pub current_page: i64,
}

/// Navigation links. An unavailable link is an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLinks {
    pub first: String,
    pub previous: String,
    pub next: String,
    pub last: String,
}

/// One page of results.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T: Serialize> {
    pub items: Vec<T>,
    pub meta: PageMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<PageLinks>,
}

impl<T: Serialize> Page<T> {
    /// Assemble a page from the fetched slice and the total row count.
    pub fn new(items: Vec<T>, total_items: i64, request: PageRequest) -> Self {
        let total_pages = if total_items == 0 {
            0
        } else {
            (total_items + request.limit - 1) / request.limit
        };
        let meta = PageMeta {
            total_items,
            item_count: items.len() as i64,
            items_per_page: request.limit,
            total_pages,
            current_page: request.page,
        };
        Self {
            items,
            meta,
            links: None,
        }
    }

    /// Attach navigation links rooted at `route` (an absolute URL without a
    /// query string).
    pub fn with_route(mut self, route: &str) -> Self {
        let limit = self.meta.items_per_page;
        let page = self.meta.current_page;
        let total_pages = self.meta.total_pages;
        let link = |p: i64| format!("{route}?page={p}&limit={limit}");

        self.links = Some(PageLinks {
            first: format!("{route}?limit={limit}"),
            previous: if page > 1 { link(page - 1) } else { String::new() },
            next: if page < total_pages { link(page + 1) } else { String::new() },
            last: if total_pages > 0 { link(total_pages) } else { String::new() },
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_above_ceiling_is_clamped() {
        assert_eq!(clamp_limit(Some(101)), 100);
        assert_eq!(clamp_limit(Some(10_000)), 100);
    }

    #[test]
    fn limit_within_range_passes_through() {
        for limit in [1, 10, 55, 100] {
            assert_eq!(clamp_limit(Some(limit)), limit);
        }
    }

    #[test]
    fn missing_or_non_positive_values_use_floor() {
        assert_eq!(clamp_limit(None), DEFAULT_LIMIT);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_page(None), 1);
        assert_eq!(clamp_page(Some(-3)), 1);
    }

    #[test]
    fn offset_follows_page_and_limit() {
        assert_eq!(PageRequest::new(Some(1), Some(10)).offset(), 0);
        assert_eq!(PageRequest::new(Some(3), Some(25)).offset(), 50);
    }

    #[test]
    fn meta_counts_pages() {
        let page = Page::new(vec![1, 2, 3], 23, PageRequest::new(Some(3), Some(10)));
        assert_eq!(page.meta.total_pages, 3);
        assert_eq!(page.meta.item_count, 3);
        assert_eq!(page.meta.current_page, 3);
        assert!(page.links.is_none());
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let page: Page<i32> = Page::new(vec![], 0, PageRequest::default());
        assert_eq!(page.meta.total_pages, 0);
    }

    #[test]
    fn links_on_middle_page() {
        let page = Page::new(vec![1], 30, PageRequest::new(Some(2), Some(10)))
            .with_route("http://localhost:3000/api/v1/admin/products");
        let links = page.links.unwrap();
        assert_eq!(links.first, "http://localhost:3000/api/v1/admin/products?limit=10");
        assert_eq!(
            links.previous,
            "http://localhost:3000/api/v1/admin/products?page=1&limit=10"
        );
        assert_eq!(
            links.next,
            "http://localhost:3000/api/v1/admin/products?page=3&limit=10"
        );
        assert_eq!(
            links.last,
            "http://localhost:3000/api/v1/admin/products?page=3&limit=10"
        );
    }

    #[test]
    fn links_on_last_page_have_no_next() {
        let page = Page::new(vec![1], 11, PageRequest::new(Some(2), Some(10))).with_route("/p");
        let links = page.links.unwrap();
        assert_eq!(links.next, "");
        assert_eq!(links.previous, "/p?page=1&limit=10");
    }

    #[test]
    fn meta_serializes_camel_case() {
        let page = Page::new(vec!["a"], 1, PageRequest::default());
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["meta"]["totalItems"], 1);
        assert_eq!(json["meta"]["itemsPerPage"], 10);
        assert!(json.get("links").is_none());
    }
}
