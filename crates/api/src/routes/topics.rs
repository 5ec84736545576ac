//! Route definitions for topics.
//!
//! Two routers are provided:
//! - `admin_router()` for topic management mounted at `/admin/topics`
//! - `client_router()` for read-only client routes mounted at `/topics`

use axum::routing::get;
use axum::Router;

use crate::handlers::topics;
use crate::state::AppState;

/// Admin topic routes mounted at `/admin/topics`.
///
/// ```text
/// GET    /              -> list_topics_admin
/// POST   /              -> create_topic
/// DELETE /?keys=a,b     -> delete_topics
/// GET    /{key}         -> get_topic
/// PUT    /{key}         -> update_topic
/// DELETE /{key}         -> delete_topic
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(topics::list_topics_admin)
                .post(topics::create_topic)
                .delete(topics::delete_topics),
        )
        .route(
            "/{key}",
            get(topics::get_topic)
                .put(topics::update_topic)
                .delete(topics::delete_topic),
        )
}

/// Client topic routes mounted at `/topics`.
///
/// ```text
/// GET /            -> list_topics_client
/// GET /paginated   -> list_topics_client_paginated
/// GET /features    -> feature_topics
/// ```
pub fn client_router() -> Router<AppState> {
    Router::new()
        .route("/", get(topics::list_topics_client))
        .route("/paginated", get(topics::list_topics_client_paginated))
        .route("/features", get(topics::feature_topics))
}
