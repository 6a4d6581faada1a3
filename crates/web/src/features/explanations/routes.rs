use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use storage::AdminKeys;

use super::handlers::{append_block, delete_block, list_blocks, update_block};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

/// Routes nested under `/api/exercises`
pub fn routes(admin_keys: AdminKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/:id/explanation", post(append_block))
        .route("/:id/explanation/:index", put(update_block))
        .route("/:id/explanation/:index", delete(delete_block))
        .route_layer(middleware::from_fn_with_state(admin_keys, require_auth));

    Router::new()
        .route("/:id/explanation", get(list_blocks))
        .merge(protected)
}
