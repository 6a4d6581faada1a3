use storage::{
    AdminCapability, UploadedFile,
    dto::exercise::{CreateExerciseRequest, UpdateExerciseRequest},
    error::Result,
    models::ExerciseRecord,
    repository::exercise::ExerciseRepository,
};

use crate::state::AppState;

/// List exercises visible to the caller
pub async fn list_exercises(
    state: &AppState,
    admin: Option<&AdminCapability>,
) -> Vec<ExerciseRecord> {
    let repo = ExerciseRepository::new(&state.records, state.media.as_ref());
    repo.list(admin).await
}

/// Get exercise by ID
pub async fn get_exercise(state: &AppState, id: u64) -> Result<ExerciseRecord> {
    let repo = ExerciseRepository::new(&state.records, state.media.as_ref());
    repo.find_by_id(id).await
}

/// Create a new exercise
pub async fn create_exercise(
    state: &AppState,
    admin: &AdminCapability,
    request: &CreateExerciseRequest,
    video: Option<UploadedFile>,
) -> Result<ExerciseRecord> {
    let repo = ExerciseRepository::new(&state.records, state.media.as_ref());
    repo.create(admin, request, video).await
}

/// Update an exercise
pub async fn update_exercise(
    state: &AppState,
    admin: &AdminCapability,
    id: u64,
    request: &UpdateExerciseRequest,
    video: Option<UploadedFile>,
) -> Result<ExerciseRecord> {
    let repo = ExerciseRepository::new(&state.records, state.media.as_ref());
    repo.update(admin, id, request, video).await
}

/// Delete an exercise
pub async fn delete_exercise(state: &AppState, admin: &AdminCapability, id: u64) -> Result<()> {
    let repo = ExerciseRepository::new(&state.records, state.media.as_ref());
    repo.delete(admin, id).await
}

/// Toggle whether an exercise is listed publicly
pub async fn toggle_visibility(state: &AppState, admin: &AdminCapability, id: u64) -> Result<bool> {
    let repo = ExerciseRepository::new(&state.records, state.media.as_ref());
    repo.toggle_visibility(admin, id).await
}
