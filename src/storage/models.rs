use crate::errors::StorageError;

/// Region used when none is configured. S3 creates buckets here without a location constraint.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Outcome of a successful bucket creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketStatus {
    Created,
    /// The bucket already existed and belongs to the caller
    AlreadyOwned,
}

/// What happened to the objects of a bucket that was deleted
#[derive(Debug, Default)]
pub struct DeleteBucketReport {
    pub deleted: Vec<String>,
    pub failed: Vec<(String, StorageError)>,
}

impl DeleteBucketReport {
    pub fn failed_keys(&self) -> Vec<String> {
        self.failed.iter().map(|(key, _)| key.clone()).collect()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}
