use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request payload for appending an explanation block.
///
/// `type` is kept as a raw string so an unknown value surfaces as an
/// explicit error instead of a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateExplanationBlockRequest {
    #[serde(rename = "type")]
    #[schema(example = "text")]
    pub block_type: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    #[validate(length(max = 500))]
    pub caption: Option<String>,
}

/// Request payload for editing an explanation block in place
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateExplanationBlockRequest {
    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: Option<String>,

    #[validate(length(max = 500))]
    pub caption: Option<String>,
}

/// Position of a newly appended block
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BlockIndexResponse {
    pub index: usize,
}
