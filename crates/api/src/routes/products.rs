use axum::routing::get;
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// Admin product routes mounted at `/admin/products`.
///
/// ```text
/// GET    /              -> list_products
/// POST   /              -> create_product
/// GET    /{key}         -> get_product
/// PATCH  /{key}         -> update_product
/// DELETE /{key}         -> delete_product
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/{key}",
            get(products::get_product)
                .patch(products::update_product)
                .delete(products::delete_product),
        )
}
