use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex as StdMutex};

use serde::Deserialize;
use snafu::ensure;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex as AsyncMutex;

use crate::error::{ChunkOutOfRangeSnafu, Result};

/// Chunk descriptor carried by every `UploadChunk` request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkMetadata {
    /// Caller-supplied session token. Same identifier, same scratch file.
    pub upload_id: String,
    pub file_name: String,
    pub index: u64,
    pub total_count: u64,
    #[serde(default)]
    pub file_size: u64,
}

/// What became of an accepted chunk.
#[derive(Debug)]
pub enum ChunkDisposition {
    /// More chunks are expected.
    Partial,
    /// The final chunk landed; the scratch file holds the whole upload.
    Complete { scratch: PathBuf },
}

/// Reassembles chunked uploads into one scratch file per upload identifier.
/// Appends for the same identifier are serialized behind a per-identifier
/// mutex so overlapping requests cannot interleave bytes.
pub struct UploadSessionTracker {
    temp_directory: PathBuf,
    locks: StdMutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl UploadSessionTracker {
    pub fn new(temp_directory: impl Into<PathBuf>) -> Self {
        Self {
            temp_directory: temp_directory.into(),
            locks: StdMutex::new(HashMap::new()),
        }
    }

    /// Scratch path for an identifier. Characters outside `[A-Za-z0-9._-]`
    /// are replaced so a caller-supplied identifier cannot leave the temp
    /// directory.
    pub fn scratch_path(&self, upload_id: &str) -> PathBuf {
        let safe: String = upload_id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.temp_directory.join(format!("{safe}.upload"))
    }

    /// Append one chunk. Returns `Complete` with the scratch path on the
    /// final chunk; the caller finalizes and then removes the scratch.
    pub async fn append_chunk(&self, metadata: &ChunkMetadata, bytes: &[u8]) -> Result<ChunkDisposition> {
        ensure!(
            metadata.index < metadata.total_count,
            ChunkOutOfRangeSnafu { index: metadata.index, total_count: metadata.total_count }
        );
        fs::create_dir_all(&self.temp_directory).await?;

        let lock = self.lock_for(&metadata.upload_id);
        let _guard = lock.lock().await;
        let scratch = self.scratch_path(&metadata.upload_id);
        log::debug!(
            "append_chunk id={} index={}/{} bytes={}",
            metadata.upload_id,
            metadata.index,
            metadata.total_count,
            bytes.len()
        );
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&scratch)
            .await?;
        file.write_all(bytes).await?;
        file.flush().await?;

        if metadata.index + 1 == metadata.total_count {
            Ok(ChunkDisposition::Complete { scratch })
        } else {
            Ok(ChunkDisposition::Partial)
        }
    }

    /// Remove the scratch for `upload_id`. Called after finalization
    /// regardless of the upload outcome; a missing scratch is not an error.
    pub async fn remove_scratch(&self, upload_id: &str) {
        let lock = self.lock_for(upload_id);
        let guard = lock.lock().await;
        let scratch = self.scratch_path(upload_id);
        if let Err(error) = fs::remove_file(&scratch).await {
            if error.kind() != std::io::ErrorKind::NotFound {
                log::warn!("failed to remove scratch {}: {error}", scratch.display());
            }
        }
        drop(guard);
        self.release(upload_id);
    }

    /// Abort an upload. Idempotent: aborting an absent or already-finalized
    /// session succeeds.
    pub async fn abort(&self, upload_id: &str) {
        log::debug!("abort upload id={upload_id}");
        self.remove_scratch(upload_id).await;
    }

    fn lock_for(&self, upload_id: &str) -> Arc<AsyncMutex<()>> {
        self.locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .entry(upload_id.to_string())
            .or_default()
            .clone()
    }

    fn release(&self, upload_id: &str) {
        self.locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(upload_id);
    }
}
