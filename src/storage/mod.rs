pub mod bucket;
pub mod client;
pub mod models;
pub mod objects;
pub(crate) mod sdk_errors;

// Re-export types for convenient access from other modules
pub use client::S3Backend;
pub use models::{BucketStatus, DEFAULT_REGION, DeleteBucketReport};

use crate::errors::Result;
use crate::interfaces::ObjectStore;

impl ObjectStore for S3Backend {
    fn create_bucket(&self, bucket: &str) -> Result<()> {
        S3Backend::create_bucket(self, bucket)
    }

    fn list_buckets(&self) -> Result<Vec<String>> {
        S3Backend::list_buckets(self)
    }

    fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        S3Backend::bucket_exists(self, bucket)
    }

    fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>, content_type: &str) -> Result<()> {
        S3Backend::put_object(self, bucket, key, body, content_type)
    }

    fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        S3Backend::get_object(self, bucket, key)
    }

    fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<String>> {
        S3Backend::list_objects(self, bucket, prefix)
    }

    fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        S3Backend::delete_object(self, bucket, key)
    }

    fn delete_bucket(&self, bucket: &str) -> Result<()> {
        S3Backend::delete_bucket(self, bucket)
    }

    fn region(&self) -> String {
        self.region.clone()
    }
}
