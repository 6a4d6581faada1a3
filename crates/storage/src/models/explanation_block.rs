use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::StorageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Text,
    Image,
    Video,
}

impl BlockType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Text => "text",
            BlockType::Image => "image",
            BlockType::Video => "video",
        }
    }

    /// Only image blocks carry a caption.
    pub fn allows_caption(&self) -> bool {
        matches!(self, BlockType::Image)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(BlockType::Text),
            "image" => Ok(BlockType::Image),
            "video" => Ok(BlockType::Video),
            other => Err(StorageError::InvalidBlockType(other.to_string())),
        }
    }
}

/// One item of the ordered "detailed explanation" attached to an exercise.
///
/// `content` holds the text body, the image reference or the video
/// reference/URL depending on `block_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExplanationBlock {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_block_types() {
        assert_eq!("text".parse::<BlockType>().unwrap(), BlockType::Text);
        assert_eq!("image".parse::<BlockType>().unwrap(), BlockType::Image);
        assert_eq!("video".parse::<BlockType>().unwrap(), BlockType::Video);
    }

    #[test]
    fn test_parse_rejects_unknown_block_type() {
        let err = "audio".parse::<BlockType>().unwrap_err();
        assert!(matches!(err, StorageError::InvalidBlockType(t) if t == "audio"));

        // Matching is case-sensitive, like the persisted representation
        assert!("Text".parse::<BlockType>().is_err());
    }

    #[test]
    fn test_caption_omitted_when_absent() {
        let block = ExplanationBlock {
            block_type: BlockType::Text,
            content: "Step 1".to_string(),
            caption: None,
        };

        let json = serde_json::to_string(&block).unwrap();
        assert_eq!(json, r#"{"type":"text","content":"Step 1"}"#);
    }
}
