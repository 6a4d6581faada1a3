use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 500 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_file: PathBuf,
    pub upload_dir: PathBuf,
    pub admin_password: String,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: match std::env::var("PORT") {
                Ok(port) => port.parse().context("PORT must be a number")?,
                Err(_) => 5000,
            },
            data_file: std::env::var("DATA_FILE")
                .unwrap_or_else(|_| "exercises.json".to_string())
                .into(),
            upload_dir: std::env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "uploads".to_string())
                .into(),
            admin_password: std::env::var("ADMIN_PASSWORD").unwrap_or_default(),
            max_upload_bytes: match std::env::var("MAX_UPLOAD_BYTES") {
                Ok(bytes) => bytes
                    .parse()
                    .context("MAX_UPLOAD_BYTES must be a number of bytes")?,
                Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
            },
        })
    }
}
