pub mod exercise;
pub mod explanation_block;

pub use exercise::ExerciseRecord;
pub use explanation_block::{BlockType, ExplanationBlock};
