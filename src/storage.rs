use crate::errors::MoodError;
use std::{
    env,
    path::{Path, PathBuf},
};
use tokio::fs;

/// Well-known slot name for the mood snapshot.
pub const SNAPSHOT_SLOT_NAME: &str = "moodmuse-moods.json";

pub fn resolve_data_path() -> PathBuf {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return PathBuf::from(path);
    }

    Path::new("data").join(SNAPSHOT_SLOT_NAME)
}

/// File-backed durable slot holding the whole store as one JSON document.
#[derive(Debug, Clone)]
pub struct SnapshotSlot {
    path: PathBuf,
}

impl SnapshotSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Slot file named [`SNAPSHOT_SLOT_NAME`] inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(SNAPSHOT_SLOT_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when no snapshot has been written yet.
    pub async fn read(&self) -> Result<Option<Vec<u8>>, MoodError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(MoodError::SnapshotRead {
                path: self.path.clone(),
                source,
            }),
        }
    }

    pub async fn write(&self, payload: &[u8]) -> Result<(), MoodError> {
        fs::write(&self.path, payload)
            .await
            .map_err(|source| MoodError::PersistenceWrite {
                path: self.path.clone(),
                source,
            })
    }
}
