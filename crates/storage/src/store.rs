use std::path::{Path, PathBuf};

use std::io::Write;

use tokio::fs;

use crate::error::Result;
use crate::models::ExerciseRecord;

/// JSON-file persistence for the whole exercise collection.
///
/// Every `load` reads the complete file and every `save` rewrites it. Nothing
/// is cached between calls and nothing is locked: two overlapping
/// load/modify/save sequences race, and the last `save` wins.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write an empty collection if the data file does not exist yet
    pub async fn initialize(&self) -> Result<()> {
        if fs::try_exists(&self.path).await? {
            tracing::info!("Data file found at {}", self.path.display());
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        self.save(&[]).await?;
        tracing::info!("Created empty data file at {}", self.path.display());

        Ok(())
    }

    /// Load every record. Missing, unreadable or corrupt storage yields an
    /// empty collection.
    pub async fn load(&self) -> Vec<ExerciseRecord> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("Data file {} does not exist", self.path.display());
                return Vec::new();
            }
            Err(e) => {
                tracing::error!("Error reading {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("Error parsing {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Replace the whole persisted collection.
    ///
    /// Readers see either the previous file or the new one, never a partial
    /// write.
    pub async fn save(&self, records: &[ExerciseRecord]) -> Result<()> {
        let result = match serde_json::to_vec_pretty(records) {
            Ok(data) => replace_file(&self.path, &data).await,
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(()) => {
                tracing::info!("Saved {} exercises", records.len());
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error saving exercises to {}: {}", self.path.display(), e);
                Err(e)
            }
        }
    }

    /// Highest id ever handed out, including ids of records deleted since.
    ///
    /// Kept next to the data file so that deleting the newest record does not
    /// free its id. Missing or unreadable state counts as 0.
    pub async fn last_issued_id(&self) -> u64 {
        match fs::read_to_string(self.sequence_path()).await {
            Ok(text) => text.trim().parse::<u64>().unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed id sequence {:?}: {}", text.trim(), e);
                0
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
            Err(e) => {
                tracing::warn!("Error reading id sequence: {}", e);
                0
            }
        }
    }

    pub async fn record_issued_id(&self, id: u64) -> Result<()> {
        replace_file(&self.sequence_path(), id.to_string().as_bytes()).await
    }

    fn sequence_path(&self) -> PathBuf {
        sibling_path(&self.path, ".seq")
    }
}

/// Write `data` to a fresh temporary file next to `path`, then rename it
/// into place. Each call gets its own temporary file, so overlapping writers
/// never share one.
async fn replace_file(path: &Path, data: &[u8]) -> Result<()> {
    let path = path.to_path_buf();
    let data = data.to_vec();

    tokio::task::spawn_blocking(move || persist_atomically(&path, &data))
        .await
        .map_err(std::io::Error::other)?
}

fn persist_atomically(path: &Path, data: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let prefix = path
        .file_name()
        .map(|n| format!(".{}.", n.to_string_lossy()))
        .unwrap_or_else(|| ".exercises.".to_string());

    let mut temp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(dir)?;
    temp.write_all(data)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}

fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "exercises.json".into());
    name.push(suffix);
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn record(id: u64, name: &str) -> ExerciseRecord {
        ExerciseRecord {
            id,
            name: name.to_string(),
            description: Some("Cvik na nohy".to_string()),
            muscle_groups: vec!["legs".to_string()],
            difficulty: Some("beginner".to_string()),
            video: None,
            video_url: String::new(),
            visible: true,
            created_at: NaiveDate::from_ymd_opt(2025, 5, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
            detailed_explanation: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("exercises.json"));

        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_corrupt_file_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("exercises.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = RecordStore::new(&path);
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("exercises.json"));

        let records = vec![record(2, "Plank"), record(1, "Squat")];
        store.save(&records).await.unwrap();

        assert_eq!(store.load().await, records);
    }

    #[tokio::test]
    async fn test_save_writes_indented_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("exercises.json");
        let store = RecordStore::new(&path);

        store.save(&[record(1, "Drep")]).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("[\n  {\n    \"id\": 1,"));
        assert!(text.contains("Cvik na nohy"));
        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("exercises.json")]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_saves_leave_a_complete_file() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("exercises.json"));

        for round in 0..50u64 {
            let saves = (0..8u64).map(|writer| {
                let store = store.clone();
                tokio::spawn(async move {
                    let records: Vec<_> = (0..=writer)
                        .map(|i| record(round * 100 + i, "Drep"))
                        .collect();
                    store.save(&records).await
                })
            });

            for save in saves.collect::<Vec<_>>() {
                save.await.unwrap().unwrap();
            }

            let text = std::fs::read_to_string(store.path()).unwrap();
            let parsed: Vec<ExerciseRecord> = serde_json::from_str(&text).unwrap();
            assert!(!parsed.is_empty());
        }

        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[tokio::test]
    async fn test_initialize_creates_empty_collection() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("exercises.json");
        let store = RecordStore::new(&path);

        store.initialize().await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_initialize_keeps_existing_data() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("exercises.json"));
        store.save(&[record(1, "Squat")]).await.unwrap();

        store.initialize().await.unwrap();

        assert_eq!(store.load().await.len(), 1);
    }

    #[tokio::test]
    async fn test_issued_id_round_trip() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("exercises.json"));

        assert_eq!(store.last_issued_id().await, 0);
        store.record_issued_id(7).await.unwrap();
        assert_eq!(store.last_issued_id().await, 7);
        assert!(dir.path().join("exercises.json.seq").exists());
    }

    #[tokio::test]
    async fn test_malformed_id_sequence_counts_as_zero() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("exercises.json.seq"), "seven").unwrap();
        let store = RecordStore::new(dir.path().join("exercises.json"));

        assert_eq!(store.last_issued_id().await, 0);
    }

    #[tokio::test]
    async fn test_save_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("missing").join("exercises.json"));

        assert!(store.save(&[record(1, "Squat")]).await.is_err());
    }
}
