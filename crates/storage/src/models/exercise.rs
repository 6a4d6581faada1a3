use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ExplanationBlock;

/// One entry of the exercise catalog, exactly as persisted in the data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExerciseRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub muscle_groups: Vec<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    /// Stored filename of an uploaded video
    #[serde(default)]
    pub video: Option<String>,
    #[serde(default)]
    pub video_url: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub detailed_explanation: Vec<ExplanationBlock>,
}

fn default_visible() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BlockType;

    #[test]
    fn test_missing_optional_fields_use_defaults() {
        let json = r#"{
            "id": 4,
            "name": "Deadlift",
            "created_at": "2025-03-01T10:15:30.123456"
        }"#;

        let record: ExerciseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 4);
        assert!(record.visible);
        assert!(record.detailed_explanation.is_empty());
        assert!(record.muscle_groups.is_empty());
        assert_eq!(record.video_url, "");
        assert_eq!(record.video, None);
    }

    #[test]
    fn test_null_description_and_difficulty_are_accepted() {
        let json = r#"{
            "id": 1,
            "name": "Plank",
            "description": null,
            "muscle_groups": ["core", "core"],
            "difficulty": null,
            "video": null,
            "video_url": "",
            "created_at": "2025-03-01T10:15:30"
        }"#;

        let record: ExerciseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.description, None);
        assert_eq!(record.difficulty, None);
        assert_eq!(record.muscle_groups, vec!["core", "core"]);
    }

    #[test]
    fn test_serialized_field_names() {
        let record = ExerciseRecord {
            id: 1,
            name: "Squat".to_string(),
            description: None,
            muscle_groups: vec!["legs".to_string()],
            difficulty: Some("beginner".to_string()),
            video: None,
            video_url: String::new(),
            visible: false,
            created_at: chrono::NaiveDate::from_ymd_opt(2025, 1, 2)
                .unwrap()
                .and_hms_opt(3, 4, 5)
                .unwrap(),
            detailed_explanation: vec![ExplanationBlock {
                block_type: BlockType::Image,
                content: "img.png".to_string(),
                caption: Some("form".to_string()),
            }],
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["video"], serde_json::Value::Null);
        assert_eq!(value["visible"], false);
        assert_eq!(value["created_at"], "2025-01-02T03:04:05");
        assert_eq!(value["detailed_explanation"][0]["type"], "image");
        assert_eq!(value["detailed_explanation"][0]["caption"], "form");
    }
}
