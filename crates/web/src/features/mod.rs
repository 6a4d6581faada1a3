pub mod admin;
pub mod exercises;
pub mod explanations;
pub mod health;
pub mod uploads;
