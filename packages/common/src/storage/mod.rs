mod error;
mod name;
mod traits;

pub mod filesystem;

pub use error::StorageError;
pub use name::{FilenameError, generate_blob_name, sanitize_original_name, validate_flat_filename};
pub use traits::{Blob, BlobStore, BoxReader, StoredBlob};
