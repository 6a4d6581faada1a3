pub mod admin;
pub mod exercise;
pub mod explanation;
