use std::fmt;

use super::name::FilenameError;

/// Errors that can occur during blob storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// No blob with this name exists under the store root.
    NotFound(String),
    /// The name cannot address a blob inside the store root.
    InvalidName(FilenameError),
    /// An I/O error occurred.
    Io(std::io::Error),
    /// The blob exceeds the configured size limit.
    SizeLimitExceeded { limit: u64 },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(name) => write!(f, "blob not found: {name}"),
            Self::InvalidName(err) => write!(f, "invalid blob name: {err}"),
            Self::Io(err) => write!(f, "storage IO error: {err}"),
            Self::SizeLimitExceeded { limit } => {
                write!(f, "blob exceeds size limit of {limit} bytes")
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<FilenameError> for StorageError {
    fn from(err: FilenameError) -> Self {
        Self::InvalidName(err)
    }
}
