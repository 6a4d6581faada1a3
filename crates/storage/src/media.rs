//! Storage for uploaded media files (exercise videos and editor images).

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use chrono::Local;
use tokio::{fs, io::AsyncWriteExt};

use crate::error::Result;

/// A file received from a client, not yet stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: String,
    pub data: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            data: data.into(),
        }
    }
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Persist `data` and return the generated, collision-free file name
    async fn store(&self, data: &[u8], suggested_name: &str) -> Result<String>;

    /// Remove a previously stored file. Removing a missing file succeeds.
    async fn remove(&self, stored_name: &str) -> Result<()>;
}

/// Media store writing into a single directory on the local filesystem.
///
/// Names are `YYYYmmdd_HHMMSS_<sanitized original name>`; when that name is
/// taken a `-2`, `-3`, ... suffix is inserted before the extension.
#[derive(Debug, Clone)]
pub struct DiskMediaStore {
    base_path: PathBuf,
}

impl DiskMediaStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub async fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }
}

#[async_trait]
impl MediaStore for DiskMediaStore {
    async fn store(&self, data: &[u8], suggested_name: &str) -> Result<String> {
        self.ensure_dir().await?;

        let base_name = format!(
            "{}{}",
            Local::now().format("%Y%m%d_%H%M%S_"),
            sanitize_file_name(suggested_name)
        );

        let mut candidate = base_name.clone();
        let mut counter = 2;

        let file = loop {
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.base_path.join(&candidate))
                .await
            {
                Ok(file) => break file,
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    candidate = with_counter(&base_name, counter);
                    counter += 1;
                }
                Err(e) => return Err(e.into()),
            }
        };

        fill_new_file(file, &self.base_path.join(&candidate), data).await?;

        tracing::info!("Stored upload {} ({} bytes)", candidate, data.len());
        Ok(candidate)
    }

    async fn remove(&self, stored_name: &str) -> Result<()> {
        if !is_plain_file_name(stored_name) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Refusing to remove {stored_name:?} outside the media directory"),
            )
            .into());
        }

        match fs::remove_file(self.base_path.join(stored_name)).await {
            Ok(()) => {
                tracing::info!("Removed upload {}", stored_name);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Write and sync a freshly created file, removing it again if that fails
async fn fill_new_file(mut file: fs::File, path: &Path, data: &[u8]) -> Result<()> {
    let written = match file.write_all(data).await {
        Ok(()) => file.sync_all().await,
        Err(e) => Err(e),
    };

    if let Err(e) = written {
        drop(file);
        let _ = fs::remove_file(path).await;
        return Err(e.into());
    }

    Ok(())
}

/// Keep only the final path component and replace anything outside
/// `[A-Za-z0-9._-]` with `_`.
fn sanitize_file_name(name: &str) -> String {
    let last = name.rsplit(['/', '\\']).next().unwrap_or_default();

    let cleaned: String = last
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

/// A single normal path component, so the name cannot leave the media
/// directory. Names stored before sanitizing existed may contain spaces or
/// non-ASCII characters and are still accepted.
fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();

    !name.contains(['/', '\\'])
        && matches!(components.next(), Some(Component::Normal(_)))
        && components.next().is_none()
}

fn with_counter(name: &str, counter: u32) -> String {
    match name.rfind('.') {
        Some(dot) if dot > 0 => format!("{}-{}{}", &name[..dot], counter, &name[dot..]),
        _ => format!("{}-{}", name, counter),
    }
}
