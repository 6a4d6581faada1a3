pub mod auth;
pub mod dto;
pub mod error;
pub mod media;
pub mod models;
pub mod repository;
pub mod store;

pub use auth::{AdminCapability, AdminKeys};
pub use media::{DiskMediaStore, MediaStore, UploadedFile};
pub use store::RecordStore;
