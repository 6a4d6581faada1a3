use axum::{
    Extension, Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    AdminCapability,
    dto::exercise::{CreateExerciseRequest, UpdateExerciseRequest, VisibilityResponse},
    models::ExerciseRecord,
};

use crate::error::WebError;
use crate::middleware::auth::MaybeAdmin;
use crate::state::AppState;

use super::{form::ExerciseForm, services};

#[utoipa::path(
    get,
    path = "/api/exercises",
    security(
        (),
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Visible exercises, or all exercises for admins", body = Vec<ExerciseRecord>)
    ),
    tag = "exercises"
)]
pub async fn list_exercises(
    State(state): State<AppState>,
    MaybeAdmin(admin): MaybeAdmin,
) -> Result<Response, WebError> {
    let exercises = services::list_exercises(&state, admin.as_ref()).await;

    Ok(Json(exercises).into_response())
}

#[utoipa::path(
    get,
    path = "/api/exercises/{id}",
    params(
        ("id" = u64, Path, description = "Exercise ID")
    ),
    responses(
        (status = 200, description = "Exercise found", body = ExerciseRecord),
        (status = 404, description = "Exercise not found")
    ),
    tag = "exercises"
)]
pub async fn get_exercise(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Response, WebError> {
    let exercise = services::get_exercise(&state, id).await?;

    Ok(Json(exercise).into_response())
}

#[utoipa::path(
    post,
    path = "/api/exercises",
    request_body(content = CreateExerciseRequest, content_type = "multipart/form-data", description = "Exercise fields plus an optional `video` file part"),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Exercise created successfully", body = ExerciseRecord),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "exercises"
)]
pub async fn create_exercise(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminCapability>,
    multipart: Multipart,
) -> Result<Response, WebError> {
    let (req, video) = ExerciseForm::from_multipart(multipart).await?.into_create();

    let exercise = services::create_exercise(&state, &admin, &req, video).await?;

    Ok((StatusCode::CREATED, Json(exercise)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/exercises/{id}",
    params(
        ("id" = u64, Path, description = "Exercise ID")
    ),
    request_body(content = UpdateExerciseRequest, content_type = "multipart/form-data", description = "Fields to overwrite plus an optional replacement `video` file part"),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Exercise updated successfully", body = ExerciseRecord),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Exercise not found")
    ),
    tag = "exercises"
)]
pub async fn update_exercise(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminCapability>,
    Path(id): Path<u64>,
    multipart: Multipart,
) -> Result<Response, WebError> {
    let (req, video) = ExerciseForm::from_multipart(multipart).await?.into_update();

    let updated = services::update_exercise(&state, &admin, id, &req, video).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/exercises/{id}",
    params(
        ("id" = u64, Path, description = "Exercise ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Exercise deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Exercise not found")
    ),
    tag = "exercises"
)]
pub async fn delete_exercise(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminCapability>,
    Path(id): Path<u64>,
) -> Result<Response, WebError> {
    services::delete_exercise(&state, &admin, id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    post,
    path = "/api/exercises/{id}/toggle-visibility",
    params(
        ("id" = u64, Path, description = "Exercise ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "New visibility", body = VisibilityResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Exercise not found")
    ),
    tag = "exercises"
)]
pub async fn toggle_visibility(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminCapability>,
    Path(id): Path<u64>,
) -> Result<Response, WebError> {
    let visible = services::toggle_visibility(&state, &admin, id).await?;

    Ok(Json(VisibilityResponse { visible }).into_response())
}
