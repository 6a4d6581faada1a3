use storage::{
    AdminCapability,
    dto::explanation::{CreateExplanationBlockRequest, UpdateExplanationBlockRequest},
    error::Result,
    models::ExplanationBlock,
    repository::exercise::ExerciseRepository,
};

use crate::state::AppState;

pub async fn list_blocks(state: &AppState, id: u64) -> Result<Vec<ExplanationBlock>> {
    let repo = ExerciseRepository::new(&state.records, state.media.as_ref());
    repo.list_blocks(id).await
}

/// Append a block and return its index
pub async fn append_block(
    state: &AppState,
    admin: &AdminCapability,
    id: u64,
    request: &CreateExplanationBlockRequest,
) -> Result<usize> {
    let repo = ExerciseRepository::new(&state.records, state.media.as_ref());
    repo.append_block(admin, id, request).await
}

pub async fn update_block(
    state: &AppState,
    admin: &AdminCapability,
    id: u64,
    index: usize,
    request: &UpdateExplanationBlockRequest,
) -> Result<ExplanationBlock> {
    let repo = ExerciseRepository::new(&state.records, state.media.as_ref());
    repo.update_block(admin, id, index, request).await
}

pub async fn delete_block(
    state: &AppState,
    admin: &AdminCapability,
    id: u64,
    index: usize,
) -> Result<()> {
    let repo = ExerciseRepository::new(&state.records, state.media.as_ref());
    repo.delete_block(admin, id, index).await
}
