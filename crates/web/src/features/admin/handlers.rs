use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::dto::admin::{LoginRequest, LoginResponse};

use crate::error::WebError;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Password accepted; use it as the bearer token", body = LoginResponse),
        (status = 401, description = "Wrong password")
    ),
    tag = "admin"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, WebError> {
    if state.admin_keys.authorize(&req.password).is_err() {
        tracing::warn!("Failed admin login");
        return Err(WebError::Unauthorized);
    }

    Ok(Json(LoginResponse { authorized: true }).into_response())
}
