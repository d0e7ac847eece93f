use std::{
    future::Future,
    io::ErrorKind,
    ops::Deref,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use fs4::tokio::AsyncFileExt;
use tokio::{
    fs::File,
    io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt},
};
use tracing::{debug, instrument};

use super::entities::WorkLogEntry;

/// Name of the file the local store keeps the whole collection in.
pub const LOG_FILE_NAME: &str = "work_logs.json";

/// Interface for abstracting durable storage of the entry collection. Nothing outside of
/// implementations of this trait touches the storage medium.
pub trait LogStore {
    /// Reads the whole collection. A store that was never written to yields an empty collection.
    fn load(&self) -> impl Future<Output = Result<Vec<WorkLogEntry>>> + Send;

    /// Replaces the whole collection.
    fn save(&self, entries: &[WorkLogEntry]) -> impl Future<Output = Result<()>> + Send;
}

impl<T: Deref + Sync> LogStore for T
where
    T::Target: LogStore,
{
    fn load(&self) -> impl Future<Output = Result<Vec<WorkLogEntry>>> + Send {
        self.deref().load()
    }

    fn save(&self, entries: &[WorkLogEntry]) -> impl Future<Output = Result<()>> + Send {
        self.deref().save(entries)
    }
}

/// Adds an entry to the end of the collection.
pub async fn append(store: &impl LogStore, entry: WorkLogEntry) -> Result<()> {
    let mut entries = store.load().await?;
    entries.push(entry);
    store.save(&entries).await
}

/// The main realization of [LogStore]. The collection is kept as a single JSON array, with no
/// versioning, and is read back verbatim.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: &Path) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(dir)?;

        Ok(Self {
            path: dir.join(LOG_FILE_NAME),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_locked(path: &Path) -> std::result::Result<String, std::io::Error> {
        let mut file = File::open(path).await?;
        file.lock_shared()?;
        let mut content = String::new();
        let result = file.read_to_string(&mut content).await;
        file.unlock_async().await?;
        result.map(|_| content)
    }
}

impl LogStore for JsonFileStore {
    #[instrument(skip(self), fields(path = ?self.path))]
    async fn load(&self) -> Result<Vec<WorkLogEntry>> {
        let content = match Self::read_locked(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No log file yet, starting empty");
                return Ok(vec![]);
            }
            Err(e) => return Err(e).context("Failed to read work logs"),
        };

        if content.trim().is_empty() {
            return Ok(vec![]);
        }

        let entries = serde_json::from_str::<Vec<WorkLogEntry>>(&content)
            .with_context(|| format!("Work log file {:?} is not a valid log array", self.path))?;
        debug!("Loaded {} entries", entries.len());
        Ok(entries)
    }

    #[instrument(skip(self, entries), fields(path = ?self.path, count = entries.len()))]
    async fn save(&self, entries: &[WorkLogEntry]) -> Result<()> {
        let buffer = serde_json::to_vec(entries)?;

        let mut file = File::options()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .await?;

        // Truncation happens under the lock so readers never observe a half written array
        file.lock_exclusive()?;
        let result = async {
            file.set_len(0).await?;
            file.rewind().await?;
            file.write_all(&buffer).await?;
            file.flush().await?;
            file.sync_all().await
        }
        .await;
        file.unlock_async().await?;

        result.context("Failed to write work logs")
    }
}
