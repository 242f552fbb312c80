use std::io::Cursor;
use std::pin::Pin;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};

use super::error::StorageError;

/// Type alias for a boxed async reader.
pub type BoxReader<'a> = Pin<Box<dyn AsyncRead + Send + 'a>>;

/// Outcome of a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    /// Generated name, relative to the store root.
    pub name: String,
    /// Number of bytes written.
    pub size: u64,
}

/// An open blob ready to be streamed out.
pub struct Blob {
    pub name: String,
    pub size: u64,
    pub reader: BoxReader<'static>,
}

/// Named blob storage confined to a single root.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store bytes under a freshly generated name derived from `original_name`.
    async fn store(&self, original_name: &str, data: &[u8]) -> Result<StoredBlob, StorageError> {
        let reader: BoxReader<'_> = Box::pin(Cursor::new(data));
        self.store_stream(original_name, reader).await
    }

    /// Store the full contents of `reader` before returning.
    async fn store_stream(
        &self,
        original_name: &str,
        reader: BoxReader<'_>,
    ) -> Result<StoredBlob, StorageError>;

    /// Open a blob for streaming.
    async fn retrieve(&self, name: &str) -> Result<Blob, StorageError>;

    /// Read all bytes of a blob.
    async fn read(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        let mut blob = self.retrieve(name).await?;
        let mut buf = Vec::with_capacity(blob.size as usize);
        blob.reader.read_to_end(&mut buf).await?;
        Ok(buf)
    }

    /// Check whether a blob exists.
    async fn exists(&self, name: &str) -> Result<bool, StorageError>;
}
