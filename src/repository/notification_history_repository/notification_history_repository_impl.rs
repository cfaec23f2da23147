use super::{NotificationHistoryRepository, StoredNotification};
use crate::repository::Error;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub struct NotificationHistoryRepositoryImpl {
    directory: PathBuf,
}

impl NotificationHistoryRepositoryImpl {
    pub fn new(directory: PathBuf) -> Self {
        Self { directory }
    }

    fn record_path(&self, username: &str) -> PathBuf {
        self.directory
            .join(format!("{}.json", sanitize_username(username)))
    }
}

/// Usernames come from the auth provider, not from paths. Anything that
/// is not filename-safe is replaced so a record stays one flat file.
fn sanitize_username(username: &str) -> String {
    username
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' => c,
            _ => '_',
        })
        .collect()
}

#[async_trait]
impl NotificationHistoryRepository for NotificationHistoryRepositoryImpl {
    #[tracing::instrument(name = "History load", skip_all, fields(username))]
    async fn load(&self, username: &str) -> Result<Vec<StoredNotification>, Error> {
        let path = self.record_path(username);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no stored history");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        let notifications = serde_json::from_slice(&bytes)?;
        Ok(notifications)
    }

    #[tracing::instrument(name = "History store", skip_all, fields(username))]
    async fn store(
        &self,
        username: &str,
        notifications: &[StoredNotification],
    ) -> Result<(), Error> {
        tokio::fs::create_dir_all(&self.directory).await?;

        let bytes = serde_json::to_vec(notifications)?;
        write_atomic(&self.record_path(username), &bytes).await?;

        tracing::trace!(count = notifications.len(), "stored history");
        Ok(())
    }
}

/// Write to a sibling temp file first so a crash mid-write cannot leave
/// a truncated record behind.
async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), std::io::Error> {
    let mut tmp = path.to_path_buf();
    tmp.set_extension("json.tmp");

    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;

    Ok(())
}
