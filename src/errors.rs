use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a [`StorageError`], for callers that only need to branch on why.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Credentials,
    Config,
    LocalFile,
    Conflict,
    NotFound,
    NotEmpty,
    PermissionDenied,
    Remote,
    Runtime,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("AWS credentials not found: {0}")]
    NoCredentials(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Local file error for '{}': {source}", path.display())]
    LocalFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Bucket '{0}' already exists and is owned by another account")]
    BucketAlreadyExists(String),

    #[error("Bucket '{0}' already owned by you")]
    BucketAlreadyOwnedByYou(String),

    #[error("Bucket '{0}' does not exist")]
    NoSuchBucket(String),

    #[error("Object '{key}' does not exist in bucket '{bucket}'")]
    NoSuchKey { bucket: String, key: String },

    #[error("Bucket '{0}' is not empty")]
    BucketNotEmpty(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("{operation} failed: {message}")]
    Remote {
        operation: &'static str,
        code: Option<String>,
        message: String,
    },

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error(
        "Failed to delete bucket '{bucket}' ({} object(s) could not be removed first): {source}",
        failed_keys.len()
    )]
    DeleteBucketFailed {
        bucket: String,
        failed_keys: Vec<String>,
        source: Box<StorageError>,
    },
}

impl StorageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StorageError::NoCredentials(_) => ErrorKind::Credentials,
            StorageError::Config(_) => ErrorKind::Config,
            StorageError::LocalFile { .. } => ErrorKind::LocalFile,
            StorageError::BucketAlreadyExists(_) | StorageError::BucketAlreadyOwnedByYou(_) => {
                ErrorKind::Conflict
            }
            StorageError::NoSuchBucket(_) | StorageError::NoSuchKey { .. } => ErrorKind::NotFound,
            StorageError::BucketNotEmpty(_) => ErrorKind::NotEmpty,
            StorageError::AccessDenied(_) => ErrorKind::PermissionDenied,
            StorageError::Remote { .. } => ErrorKind::Remote,
            StorageError::Runtime(_) => ErrorKind::Runtime,
            StorageError::DeleteBucketFailed { source, .. } => source.kind(),
        }
    }

    /// Wrap an I/O failure on a local path.
    pub fn local_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::LocalFile {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;
