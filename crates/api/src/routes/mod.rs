pub mod categories;
pub mod health;
pub mod products;
pub mod themes;
pub mod topics;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /admin/topics                     create (POST), list (GET), bulk delete (DELETE ?keys=)
/// /admin/topics/{key}               get, update (PUT), delete
///
/// /topics                           client list (GET)
/// /topics/paginated                 client paginated list (GET)
/// /topics/features                  most-selected topics (GET)
///
/// /admin/products                   create (POST), list (GET)
/// /admin/products/{key}             get, update (PATCH), delete
///
/// /admin/themes                     list, create
/// /admin/categories                 list, create
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/admin/topics", topics::admin_router())
        .nest("/topics", topics::client_router())
        .nest("/admin/products", products::router())
        .nest("/admin/themes", themes::router())
        .nest("/admin/categories", categories::router())
}
