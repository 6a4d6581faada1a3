use axum::{Router, middleware, routing::post};
use storage::AdminKeys;

use super::handlers::upload_file;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes(admin_keys: AdminKeys) -> Router<AppState> {
    Router::new()
        .route("/", post(upload_file))
        .route_layer(middleware::from_fn_with_state(admin_keys, require_auth))
}
