#[cfg(test)]
#[path = "sessions_test.rs"]
mod tests;

use std::path;

use anyhow::bail;
use anyhow::Result;
use chrono::DateTime;
use chrono::Local;
use chrono::SecondsFormat;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use super::WateringSession;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: String,
    pub version: String,
    pub timestamp: String,
    pub port: String,
    pub state: WateringSession,
}

pub struct Sessions {
    pub cache_dir: path::PathBuf,
}

impl Default for Sessions {
    fn default() -> Sessions {
        let cache_dir = dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("waterline/sessions");

        return Sessions::new(cache_dir);
    }
}

impl Sessions {
    pub fn new(cache_dir: path::PathBuf) -> Sessions {
        return Sessions { cache_dir };
    }

    pub fn create_id() -> String {
        return Uuid::new_v4()
            .to_string()
            .split('-')
            .take(2)
            .collect::<Vec<&str>>()
            .join("-");
    }

    fn get_file_path(&self, id: &str) -> path::PathBuf {
        return self.cache_dir.join(format!("{id}.yaml"));
    }

    /// Returns every snapshot, oldest first, with only the latest sample kept
    /// to save on memory.
    pub async fn list(&self) -> Result<Vec<Snapshot>> {
        let mut snapshots: Vec<Snapshot> = vec![];
        if !self.cache_dir.exists() {
            return Ok(snapshots);
        }

        let mut dir = fs::read_dir(&self.cache_dir).await?;
        while let Some(file) = dir.next_entry().await? {
            let payload = fs::read_to_string(file.path()).await?;
            let mut snapshot: Snapshot = match serde_yaml::from_str(&payload) {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    tracing::warn!(path = ?file.path(), error = ?err, "Skipping unreadable session");
                    continue;
                }
            };
            snapshot.state = snapshot.state.summary();
            snapshots.push(snapshot);
        }

        snapshots.sort_by_cached_key(|snapshot| {
            return DateTime::parse_from_rfc3339(&snapshot.timestamp).ok();
        });

        return Ok(snapshots);
    }

    pub async fn load(&self, id: &str) -> Result<Snapshot> {
        let file_path = self.get_file_path(id);
        if !file_path.exists() {
            bail!(format!("No session found for id {id}"));
        }

        let payload = fs::read_to_string(file_path).await?;
        let mut snapshot: Snapshot = serde_yaml::from_str(&payload)?;
        snapshot.state = snapshot.state.validated()?;

        return Ok(snapshot);
    }

    pub async fn save(&self, id: &str, port: &str, state: &WateringSession) -> Result<()> {
        let snapshot = Snapshot {
            id: id.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
            port: port.to_string(),
            state: state.clone(),
        };

        let payload = serde_yaml::to_string(&snapshot)?;

        if !self.cache_dir.exists() {
            fs::create_dir_all(&self.cache_dir).await?;
        }

        let mut file = fs::File::create(self.get_file_path(id)).await?;
        file.write_all(payload.as_bytes()).await?;
        tracing::debug!(id, samples = state.samples().len(), "Saved session");

        return Ok(());
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let file_path = self.get_file_path(id);
        if !file_path.exists() {
            return Ok(());
        }

        fs::remove_file(file_path).await?;
        return Ok(());
    }

    pub async fn delete_all(&self) -> Result<()> {
        if !self.cache_dir.exists() {
            return Ok(());
        }

        fs::remove_dir_all(&self.cache_dir).await?;
        return Ok(());
    }
}
