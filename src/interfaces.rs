use crate::errors::Result;
use mockall::automock;

/// One method per remote object-storage call, so the facade can be tested without a network.
///
/// Implementations do no logging and no retries of their own; they report the
/// store's answer as-is.
#[automock]
pub trait ObjectStore {
    /// Create a bucket in the store's region.
    fn create_bucket(&self, bucket: &str) -> Result<()>;

    /// Names of all buckets owned by the caller, in the order the store returns them.
    fn list_buckets(&self) -> Result<Vec<String>>;

    /// `Ok(false)` only when the store says the bucket is not there.
    fn bucket_exists(&self, bucket: &str) -> Result<bool>;

    fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>, content_type: &str) -> Result<()>;

    fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;

    /// Keys in `bucket` starting with `prefix`; an empty prefix lists everything.
    fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<String>>;

    fn delete_object(&self, bucket: &str, key: &str) -> Result<()>;

    /// Fails with `BucketNotEmpty` if objects remain.
    fn delete_bucket(&self, bucket: &str) -> Result<()>;

    /// Region new buckets are created in
    fn region(&self) -> String;
}
