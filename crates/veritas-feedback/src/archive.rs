//! JSON-directory archive: one pretty-printed file per feedback entry.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use veritas_core::errors::{FeedbackError, VeritasResult};
use veritas_core::models::FeedbackEntry;
use veritas_core::traits::IFeedbackArchive;

/// Writes `<dir>/<id>.json`, overwriting on every state change.
#[derive(Debug, Clone)]
pub struct JsonDirArchive {
    dir: PathBuf,
}

impl JsonDirArchive {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> Result<PathBuf, FeedbackError> {
        if id.is_empty() || id.contains(['/', '\\']) || id.starts_with('.') {
            return Err(FeedbackError::ArchiveFailed {
                id: id.to_string(),
                reason: "id is not a valid file name".to_string(),
            });
        }
        Ok(self.dir.join(format!("{id}.json")))
    }

    /// Read every archived entry. Unreadable or malformed files are logged
    /// and skipped; a missing directory yields nothing.
    pub async fn load_all(&self) -> VeritasResult<Vec<FeedbackEntry>> {
        let mut dir = match tokio::fs::read_dir(&self.dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(FeedbackError::ArchiveFailed {
                    id: "*".to_string(),
                    reason: e.to_string(),
                }
                .into())
            }
        };

        let mut entries = Vec::new();
        loop {
            let next = dir.next_entry().await.map_err(|e| FeedbackError::ArchiveFailed {
                id: "*".to_string(),
                reason: e.to_string(),
            })?;
            let Some(file) = next else { break };
            let path = file.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            match read_entry(&path).await {
                Ok(entry) => entries.push(entry),
                Err(reason) => warn!(path = %path.display(), %reason, "skipping archived feedback"),
            }
        }
        entries.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        debug!(dir = %self.dir.display(), count = entries.len(), "loaded archived feedback");
        Ok(entries)
    }
}

async fn read_entry(path: &Path) -> Result<FeedbackEntry, String> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| e.to_string())?;
    serde_json::from_str(&content).map_err(|e| e.to_string())
}

#[async_trait]
impl IFeedbackArchive for JsonDirArchive {
    async fn persist(&self, entry: &FeedbackEntry) -> VeritasResult<()> {
        let path = self.path_for(&entry.id)?;
        let failed = |reason: String| FeedbackError::ArchiveFailed {
            id: entry.id.clone(),
            reason,
        };
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| failed(e.to_string()))?;
        let json = serde_json::to_string_pretty(entry).map_err(|e| failed(e.to_string()))?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| failed(e.to_string()))?;
        debug!(id = %entry.id, path = %path.display(), "archived feedback");
        Ok(())
    }
}
