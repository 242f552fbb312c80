use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};
use tracing::warn;

use super::error::StorageError;
use super::name::{FilenameError, generate_blob_name, validate_flat_filename};
use super::traits::{Blob, BlobStore, BoxReader, StoredBlob};

/// Staging directory for in-flight writes, relative to the root.
const STAGING_DIR: &str = ".tmp";

/// Filesystem-backed blob store.
///
/// Blobs live directly under the root as `{uuid-v7}-{sanitized name}`.
/// Writes are staged under `{root}/.tmp` and renamed into place once the
/// full stream has been persisted, so a reader never observes a partial
/// blob under its final name.
pub struct FilesystemBlobStore {
    root: PathBuf,
    max_size: u64,
}

impl FilesystemBlobStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub async fn new(root: impl AsRef<Path>, max_size: u64) -> Result<Self, StorageError> {
        let root = root.as_ref();
        fs::create_dir_all(root).await?;
        fs::create_dir_all(root.join(STAGING_DIR)).await?;
        let root = fs::canonicalize(root).await?;
        Ok(Self { root, max_size })
    }

    /// Canonical store root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn staging_path(&self) -> PathBuf {
        self.root
            .join(STAGING_DIR)
            .join(uuid::Uuid::new_v4().to_string())
    }

    fn blob_path(&self, name: &str) -> Result<PathBuf, StorageError> {
        let name = validate_flat_filename(name)?;
        Ok(self.root.join(name))
    }

    /// Draw names until one is free under the root.
    async fn claim_name(&self, original_name: &str) -> Result<(String, PathBuf), StorageError> {
        loop {
            let name = generate_blob_name(original_name);
            let path = self.root.join(&name);
            if !fs::try_exists(&path).await? {
                return Ok((name, path));
            }
            warn!(%name, "Generated blob name already taken, retrying");
        }
    }

    async fn write_staged(
        &self,
        staging: &Path,
        mut reader: BoxReader<'_>,
    ) -> Result<u64, StorageError> {
        let mut file = fs::File::create(staging).await?;
        let mut buf = vec![0u8; 64 * 1024];
        let mut total: u64 = 0;

        loop {
            let n = reader.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            total += n as u64;
            if total > self.max_size {
                return Err(StorageError::SizeLimitExceeded {
                    limit: self.max_size,
                });
            }
            file.write_all(&buf[..n]).await?;
        }

        file.flush().await?;
        file.sync_all().await?;
        Ok(total)
    }
}

#[async_trait]
impl BlobStore for FilesystemBlobStore {
    async fn store_stream(
        &self,
        original_name: &str,
        reader: BoxReader<'_>,
    ) -> Result<StoredBlob, StorageError> {
        let staging = self.staging_path();

        let result = async {
            let size = self.write_staged(&staging, reader).await?;
            let (name, path) = self.claim_name(original_name).await?;
            fs::rename(&staging, &path).await?;
            Ok(StoredBlob { name, size })
        }
        .await;

        if result.is_err() {
            let _ = fs::remove_file(&staging).await;
        }

        result
    }

    async fn retrieve(&self, name: &str) -> Result<Blob, StorageError> {
        let path = self.blob_path(name)?;

        let canonical = match fs::canonicalize(&path).await {
            Ok(p) => p,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        // A symlink under the root must not lead outside it.
        if !canonical.starts_with(&self.root) {
            return Err(StorageError::InvalidName(FilenameError::PathTraversal));
        }

        let meta = fs::metadata(&canonical).await?;
        if !meta.is_file() {
            return Err(StorageError::NotFound(name.to_string()));
        }

        let file = match fs::File::open(&canonical).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Blob {
            name: name.trim().to_string(),
            size: meta.len(),
            reader: Box::pin(BufReader::new(file)),
        })
    }

    async fn exists(&self, name: &str) -> Result<bool, StorageError> {
        let path = match self.blob_path(name) {
            Ok(path) => path,
            Err(StorageError::InvalidName(_)) => return Ok(false),
            Err(e) => return Err(e),
        };
        Ok(fs::try_exists(&path).await?)
    }
}
