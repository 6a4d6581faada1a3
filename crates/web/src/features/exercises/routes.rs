use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use storage::AdminKeys;

use super::handlers::{
    create_exercise, delete_exercise, get_exercise, list_exercises, toggle_visibility,
    update_exercise,
};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes(admin_keys: AdminKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_exercise))
        .route("/:id", put(update_exercise))
        .route("/:id", delete(delete_exercise))
        .route("/:id/toggle-visibility", post(toggle_visibility))
        .route_layer(middleware::from_fn_with_state(admin_keys, require_auth));

    Router::new()
        .route("/", get(list_exercises))
        .route("/:id", get(get_exercise))
        .merge(protected)
}
