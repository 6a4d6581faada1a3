use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request payload for creating a new exercise
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateExerciseRequest {
    #[validate(custom(function = "validate_name", message = "Name is required"))]
    pub name: String,

    pub description: Option<String>,

    #[serde(default)]
    pub muscle_groups: Vec<String>,

    pub difficulty: Option<String>,

    #[validate(length(max = 2048, message = "Video URL must be at most 2048 characters"))]
    #[serde(default)]
    pub video_url: String,
}

/// Request payload for updating an existing exercise.
///
/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateExerciseRequest {
    #[validate(custom(function = "validate_name", message = "Name must not be empty"))]
    pub name: Option<String>,

    pub description: Option<String>,

    pub muscle_groups: Option<Vec<String>>,

    pub difficulty: Option<String>,

    #[validate(length(max = 2048, message = "Video URL must be at most 2048 characters"))]
    pub video_url: Option<String>,
}

/// Result of a visibility toggle
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VisibilityResponse {
    pub visible: bool,
}

fn validate_name(name: &str) -> Result<(), validator::ValidationError> {
    if name.trim().is_empty() {
        Err(validator::ValidationError::new("required"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_is_rejected() {
        let req = CreateExerciseRequest {
            name: "   ".to_string(),
            ..Default::default()
        };

        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_update_without_name_is_valid() {
        let req = UpdateExerciseRequest {
            difficulty: Some("advanced".to_string()),
            ..Default::default()
        };

        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_update_with_empty_name_is_rejected() {
        let req = UpdateExerciseRequest {
            name: Some(String::new()),
            ..Default::default()
        };

        assert!(req.validate().is_err());
    }
}
