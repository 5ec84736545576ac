use axum::routing::get;
use axum::Router;

use crate::handlers::themes;
use crate::state::AppState;

/// Admin theme routes mounted at `/admin/themes`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(themes::list_themes).post(themes::create_theme))
}
