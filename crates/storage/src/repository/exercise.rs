use chrono::Local;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::auth::AdminCapability;
use crate::dto::exercise::{CreateExerciseRequest, UpdateExerciseRequest};
use crate::dto::explanation::{CreateExplanationBlockRequest, UpdateExplanationBlockRequest};
use crate::error::{Result, StorageError};
use crate::media::{MediaStore, UploadedFile};
use crate::models::{BlockType, ExerciseRecord, ExplanationBlock};
use crate::store::RecordStore;

/// Exercise lifecycle and explanation-block operations.
///
/// Every operation reloads the collection from the [`RecordStore`], and every
/// mutation writes the whole collection back. Write operations require an
/// [`AdminCapability`].
pub struct ExerciseRepository<'a> {
    store: &'a RecordStore,
    media: &'a dyn MediaStore,
}

impl<'a> ExerciseRepository<'a> {
    pub fn new(store: &'a RecordStore, media: &'a dyn MediaStore) -> Self {
        Self { store, media }
    }

    /// List exercises in stored order; hidden ones are only listed for admins
    pub async fn list(&self, viewer: Option<&AdminCapability>) -> Vec<ExerciseRecord> {
        let exercises = self.store.load().await;

        match viewer {
            Some(_) => exercises,
            None => exercises.into_iter().filter(|e| e.visible).collect(),
        }
    }

    /// Find exercise by ID
    pub async fn find_by_id(&self, id: u64) -> Result<ExerciseRecord> {
        self.store
            .load()
            .await
            .into_iter()
            .find(|e| e.id == id)
            .ok_or(StorageError::NotFound)
    }

    pub async fn list_blocks(&self, id: u64) -> Result<Vec<ExplanationBlock>> {
        Ok(self.find_by_id(id).await?.detailed_explanation)
    }

    /// Create a new exercise, storing the uploaded video first if there is one
    pub async fn create(
        &self,
        _admin: &AdminCapability,
        req: &CreateExerciseRequest,
        video: Option<UploadedFile>,
    ) -> Result<ExerciseRecord> {
        req.validate()?;

        let video = match video {
            Some(file) => Some(self.media.store(&file.data, &file.file_name).await?),
            None => None,
        };

        match self.insert(req, video.clone()).await {
            Ok(exercise) => {
                tracing::info!("Created exercise {} ({})", exercise.id, exercise.name);
                Ok(exercise)
            }
            Err(e) => {
                if let Some(name) = &video {
                    self.discard_upload(name).await;
                }
                Err(e)
            }
        }
    }

    async fn insert(
        &self,
        req: &CreateExerciseRequest,
        video: Option<String>,
    ) -> Result<ExerciseRecord> {
        let mut exercises = self.store.load().await;
        let id = next_id(&exercises, self.store.last_issued_id().await);

        let exercise = ExerciseRecord {
            id,
            name: req.name.clone(),
            description: req.description.clone(),
            muscle_groups: req.muscle_groups.clone(),
            difficulty: req.difficulty.clone(),
            video,
            video_url: req.video_url.clone(),
            visible: true,
            created_at: Local::now().naive_local(),
            detailed_explanation: Vec::new(),
        };

        self.store.record_issued_id(id).await?;
        exercises.push(exercise.clone());
        self.store.save(&exercises).await?;

        Ok(exercise)
    }

    /// Update an existing exercise.
    ///
    /// A new video replaces the stored reference; the previous file is kept.
    pub async fn update(
        &self,
        _admin: &AdminCapability,
        id: u64,
        req: &UpdateExerciseRequest,
        video: Option<UploadedFile>,
    ) -> Result<ExerciseRecord> {
        req.validate()?;

        let mut exercises = self.store.load().await;
        let exercise = find_mut(&mut exercises, id)?;

        let stored_video = match video {
            Some(file) => Some(self.media.store(&file.data, &file.file_name).await?),
            None => None,
        };
        if let Some(name) = &stored_video {
            exercise.video = Some(name.clone());
        }
        if let Some(name) = &req.name {
            exercise.name = name.clone();
        }
        if let Some(description) = &req.description {
            exercise.description = Some(description.clone());
        }
        if let Some(muscle_groups) = &req.muscle_groups {
            exercise.muscle_groups = muscle_groups.clone();
        }
        if let Some(difficulty) = &req.difficulty {
            exercise.difficulty = Some(difficulty.clone());
        }
        if let Some(video_url) = &req.video_url {
            exercise.video_url = video_url.clone();
        }

        let updated = exercise.clone();
        if let Err(e) = self.store.save(&exercises).await {
            if let Some(name) = &stored_video {
                self.discard_upload(name).await;
            }
            return Err(e);
        }

        Ok(updated)
    }

    /// Delete an exercise together with its uploaded video.
    ///
    /// Failing to remove the video file does not fail the deletion.
    pub async fn delete(&self, _admin: &AdminCapability, id: u64) -> Result<()> {
        let mut exercises = self.store.load().await;
        let position = exercises
            .iter()
            .position(|e| e.id == id)
            .ok_or(StorageError::NotFound)?;

        let removed = exercises.remove(position);
        self.store.save(&exercises).await?;

        if let Some(video) = &removed.video {
            if let Err(e) = self.media.remove(video).await {
                tracing::warn!("Failed to remove video {} of exercise {}: {}", video, id, e);
            }
        }

        tracing::info!("Deleted exercise {}", id);
        Ok(())
    }

    /// Remove a file stored for a write that was not persisted
    async fn discard_upload(&self, name: &str) {
        if let Err(e) = self.media.remove(name).await {
            tracing::warn!("Failed to remove orphaned upload {}: {}", name, e);
        }
    }

    /// Flip visibility and return the new value
    pub async fn toggle_visibility(&self, _admin: &AdminCapability, id: u64) -> Result<bool> {
        let mut exercises = self.store.load().await;
        let exercise = find_mut(&mut exercises, id)?;

        exercise.visible = !exercise.visible;
        let visible = exercise.visible;

        self.store.save(&exercises).await?;
        Ok(visible)
    }

    /// Append an explanation block and return its index
    pub async fn append_block(
        &self,
        _admin: &AdminCapability,
        id: u64,
        req: &CreateExplanationBlockRequest,
    ) -> Result<usize> {
        req.validate()?;
        let block_type: BlockType = req.block_type.parse()?;

        let caption = non_empty(req.caption.as_deref());
        if caption.is_some() && !block_type.allows_caption() {
            return Err(caption_not_allowed(block_type));
        }

        let mut exercises = self.store.load().await;
        let exercise = find_mut(&mut exercises, id)?;

        exercise.detailed_explanation.push(ExplanationBlock {
            block_type,
            content: req.content.clone(),
            caption,
        });
        let index = exercise.detailed_explanation.len() - 1;

        self.store.save(&exercises).await?;
        Ok(index)
    }

    /// Overwrite the content, and for image blocks the caption, of one block.
    ///
    /// The index is checked against the freshly loaded collection.
    pub async fn update_block(
        &self,
        _admin: &AdminCapability,
        id: u64,
        index: usize,
        req: &UpdateExplanationBlockRequest,
    ) -> Result<ExplanationBlock> {
        req.validate()?;

        let mut exercises = self.store.load().await;
        let exercise = find_mut(&mut exercises, id)?;

        let len = exercise.detailed_explanation.len();
        let block = exercise
            .detailed_explanation
            .get_mut(index)
            .ok_or(StorageError::IndexOutOfBounds { index, len })?;

        let caption = non_empty(req.caption.as_deref());
        if caption.is_some() && !block.block_type.allows_caption() {
            return Err(caption_not_allowed(block.block_type));
        }

        if let Some(content) = &req.content {
            block.content = content.clone();
        }
        if req.caption.is_some() {
            block.caption = caption;
        }

        let updated = block.clone();
        self.store.save(&exercises).await?;

        Ok(updated)
    }

    /// Remove one block; later blocks shift left
    pub async fn delete_block(&self, _admin: &AdminCapability, id: u64, index: usize) -> Result<()> {
        let mut exercises = self.store.load().await;
        let exercise = find_mut(&mut exercises, id)?;

        let len = exercise.detailed_explanation.len();
        if index >= len {
            return Err(StorageError::IndexOutOfBounds { index, len });
        }

        exercise.detailed_explanation.remove(index);
        self.store.save(&exercises).await
    }
}

fn find_mut(exercises: &mut [ExerciseRecord], id: u64) -> Result<&mut ExerciseRecord> {
    exercises
        .iter_mut()
        .find(|e| e.id == id)
        .ok_or(StorageError::NotFound)
}

/// One past the highest id currently stored or ever issued
fn next_id(exercises: &[ExerciseRecord], last_issued: u64) -> u64 {
    exercises
        .iter()
        .map(|e| e.id)
        .max()
        .unwrap_or(0)
        .max(last_issued)
        + 1
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(String::from)
}

fn caption_not_allowed(block_type: BlockType) -> StorageError {
    let mut error = ValidationError::new("caption_not_allowed");
    error.message = Some(format!("Captions are only allowed on image blocks, not {block_type}").into());

    let mut errors = ValidationErrors::new();
    errors.add("caption", error);
    StorageError::Validation(errors)
}
