use std::path::PathBuf;

use axum::{Router, extract::DefaultBodyLimit};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::ApiDoc;
use crate::error::not_found;
use crate::features::{admin, exercises, explanations, health, uploads};
use crate::state::AppState;

/// Assemble the full application: JSON API, uploaded media, docs
pub fn build_router(state: AppState, upload_dir: PathBuf, max_upload_bytes: usize) -> Router {
    let admin_keys = state.admin_keys.clone();

    let api = Router::new()
        .nest(
            "/exercises",
            exercises::routes::routes(admin_keys.clone())
                .merge(explanations::routes::routes(admin_keys.clone())),
        )
        .nest("/uploads", uploads::routes::routes(admin_keys))
        .nest("/admin", admin::routes::routes());

    Router::new()
        .nest("/api", api)
        .merge(health::routes::routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
