use axum::extract::{Multipart, multipart::Field};
use storage::{
    UploadedFile,
    dto::exercise::{CreateExerciseRequest, UpdateExerciseRequest},
};

use crate::error::WebError;

/// Fields of the `multipart/form-data` body used to create and edit exercises.
///
/// A field that is absent from the body stays `None`; a file part with an
/// empty filename counts as no upload.
#[derive(Debug, Default)]
pub struct ExerciseForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub muscle_groups: Option<Vec<String>>,
    pub difficulty: Option<String>,
    pub video_url: Option<String>,
    pub video: Option<UploadedFile>,
}

impl ExerciseForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, WebError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(invalid_body)? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            match name.as_str() {
                "name" => form.name = Some(text(field).await?),
                "description" => form.description = Some(text(field).await?),
                "difficulty" => form.difficulty = Some(text(field).await?),
                "video_url" => form.video_url = Some(text(field).await?),
                "muscle_groups" => {
                    let group = text(field).await?;
                    let groups = form.muscle_groups.get_or_insert_with(Vec::new);
                    if !group.is_empty() {
                        groups.push(group);
                    }
                }
                "video" => form.video = read_file(field).await?,
                other => tracing::debug!("Ignoring unknown form field {}", other),
            }
        }

        Ok(form)
    }

    pub fn into_create(self) -> (CreateExerciseRequest, Option<UploadedFile>) {
        let req = CreateExerciseRequest {
            name: self.name.unwrap_or_default(),
            description: self.description,
            muscle_groups: self.muscle_groups.unwrap_or_default(),
            difficulty: self.difficulty,
            video_url: self.video_url.unwrap_or_default(),
        };

        (req, self.video)
    }

    pub fn into_update(self) -> (UpdateExerciseRequest, Option<UploadedFile>) {
        let req = UpdateExerciseRequest {
            name: self.name,
            description: self.description,
            muscle_groups: self.muscle_groups,
            difficulty: self.difficulty,
            video_url: self.video_url,
        };

        (req, self.video)
    }
}

/// Read a file part; `None` when the client sent no file
pub async fn read_file(field: Field<'_>) -> Result<Option<UploadedFile>, WebError> {
    let file_name = field.file_name().unwrap_or_default().to_owned();
    let data = field.bytes().await.map_err(invalid_body)?;

    if file_name.is_empty() {
        return Ok(None);
    }

    Ok(Some(UploadedFile::new(file_name, data.to_vec())))
}

async fn text(field: Field<'_>) -> Result<String, WebError> {
    field.text().await.map_err(invalid_body)
}

fn invalid_body(e: axum::extract::multipart::MultipartError) -> WebError {
    WebError::BadRequest(format!("Invalid multipart body: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_stay_unchanged_on_update() {
        let form = ExerciseForm {
            difficulty: Some("advanced".to_string()),
            ..Default::default()
        };

        let (req, video) = form.into_update();
        assert_eq!(req.difficulty.as_deref(), Some("advanced"));
        assert!(req.name.is_none());
        assert!(req.muscle_groups.is_none());
        assert!(video.is_none());
    }

    #[test]
    fn test_missing_name_becomes_empty_on_create() {
        let (req, _) = ExerciseForm::default().into_create();
        assert_eq!(req.name, "");
        assert_eq!(req.video_url, "");
        assert!(req.muscle_groups.is_empty());
    }
}
