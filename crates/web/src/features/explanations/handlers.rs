use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    AdminCapability,
    dto::explanation::{
        BlockIndexResponse, CreateExplanationBlockRequest, UpdateExplanationBlockRequest,
    },
    models::ExplanationBlock,
};

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/exercises/{id}/explanation",
    params(
        ("id" = u64, Path, description = "Exercise ID")
    ),
    responses(
        (status = 200, description = "Detailed explanation blocks in order", body = Vec<ExplanationBlock>),
        (status = 404, description = "Exercise not found")
    ),
    tag = "explanations"
)]
pub async fn list_blocks(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Response, WebError> {
    let blocks = services::list_blocks(&state, id).await?;

    Ok(Json(blocks).into_response())
}

#[utoipa::path(
    post,
    path = "/api/exercises/{id}/explanation",
    params(
        ("id" = u64, Path, description = "Exercise ID")
    ),
    request_body = CreateExplanationBlockRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Block appended", body = BlockIndexResponse),
        (status = 400, description = "Invalid block type or validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Exercise not found")
    ),
    tag = "explanations"
)]
pub async fn append_block(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminCapability>,
    Path(id): Path<u64>,
    Json(req): Json<CreateExplanationBlockRequest>,
) -> Result<Response, WebError> {
    let index = services::append_block(&state, &admin, id, &req).await?;

    Ok((StatusCode::CREATED, Json(BlockIndexResponse { index })).into_response())
}

#[utoipa::path(
    put,
    path = "/api/exercises/{id}/explanation/{index}",
    params(
        ("id" = u64, Path, description = "Exercise ID"),
        ("index" = usize, Path, description = "Zero-based block position")
    ),
    request_body = UpdateExplanationBlockRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Block updated", body = ExplanationBlock),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Exercise or block not found")
    ),
    tag = "explanations"
)]
pub async fn update_block(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminCapability>,
    Path((id, index)): Path<(u64, usize)>,
    Json(req): Json<UpdateExplanationBlockRequest>,
) -> Result<Response, WebError> {
    let block = services::update_block(&state, &admin, id, index, &req).await?;

    Ok(Json(block).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/exercises/{id}/explanation/{index}",
    params(
        ("id" = u64, Path, description = "Exercise ID"),
        ("index" = usize, Path, description = "Zero-based block position")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Block removed"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Exercise or block not found")
    ),
    tag = "explanations"
)]
pub async fn delete_block(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminCapability>,
    Path((id, index)): Path<(u64, usize)>,
) -> Result<Response, WebError> {
    services::delete_block(&state, &admin, id, index).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
