use axum::{
    Extension, Json,
    extract::{Multipart, State},
    response::{IntoResponse, Response},
};
use storage::{AdminCapability, dto::admin::UploadResponse};
use utoipa::ToSchema;

use crate::error::WebError;
use crate::features::exercises::form::read_file;
use crate::state::AppState;

/// URL prefix under which stored media is served
pub const MEDIA_URL_PREFIX: &str = "/uploads/videos";

/// Shape of the upload body, for the OpenAPI document only
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

#[utoipa::path(
    post,
    path = "/api/uploads",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "File stored", body = UploadResponse),
        (status = 400, description = "No file or no filename"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "uploads"
)]
pub async fn upload_file(
    State(state): State<AppState>,
    Extension(_admin): Extension<AdminCapability>,
    mut multipart: Multipart,
) -> Result<Response, WebError> {
    let mut seen_file_part = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| WebError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        seen_file_part = true;

        if let Some(file) = read_file(field).await? {
            let stored = state.media.store(&file.data, &file.file_name).await?;
            return Ok(Json(UploadResponse {
                location: format!("{}/{}", MEDIA_URL_PREFIX, stored),
            })
            .into_response());
        }
    }

    let msg = if seen_file_part { "No filename" } else { "No file" };
    Err(WebError::BadRequest(msg.to_string()))
}
