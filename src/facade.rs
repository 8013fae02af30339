use std::path::Path;

use crate::errors::{Result, StorageError};
use crate::interfaces::ObjectStore;
use crate::storage::{BucketStatus, DeleteBucketReport, S3Backend};
use crate::utils::log_utils::Logger;
use crate::utils::path_utils::{content_type_for, default_object_key, write_atomically};

/// Bucket and object operations over an [`ObjectStore`].
///
/// Every operation comes in two forms. The `try_*` methods return a
/// [`StorageError`] describing what went wrong. The plain methods log that error
/// and collapse it to `false` or an empty list, which is all a script needs.
pub struct StorageFacade<S = S3Backend> {
    store: S,
    logger: Logger,
}

impl StorageFacade<S3Backend> {
    /// Connect to S3 in `region` with ambient credentials.
    ///
    /// Fails with [`StorageError::NoCredentials`] when none can be resolved.
    pub fn connect(region: &str, logger: Logger) -> Result<Self> {
        let backend = S3Backend::connect(region).inspect_err(|e| {
            if matches!(e, StorageError::NoCredentials(_)) {
                logger.error("AWS credentials not found. Please configure AWS CLI.");
            }
        })?;
        Ok(Self::new(backend, logger))
    }
}

impl<S: ObjectStore> StorageFacade<S> {
    pub fn new(store: S, logger: Logger) -> Self {
        logger.info(&format!(
            "S3 client initialized for region: {}",
            store.region()
        ));
        Self { store, logger }
    }

    /// Region of the underlying store
    pub fn region(&self) -> String {
        self.store.region()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn try_create_bucket(&self, bucket_name: &str) -> Result<BucketStatus> {
        match self.store.create_bucket(bucket_name) {
            Ok(()) => {
                self.logger.info(&format!("Bucket '{bucket_name}' created successfully"));
                Ok(BucketStatus::Created)
            }
            Err(StorageError::BucketAlreadyOwnedByYou(_)) => {
                self.logger.info(&format!("Bucket '{bucket_name}' already owned by you"));
                Ok(BucketStatus::AlreadyOwned)
            }
            Err(e) => Err(e),
        }
    }

    pub fn try_list_buckets(&self) -> Result<Vec<String>> {
        let buckets = self.store.list_buckets()?;
        self.logger.info(&format!("Found {} buckets:", buckets.len()));
        for bucket in &buckets {
            self.logger.info(&format!("  - {bucket}"));
        }
        Ok(buckets)
    }

    pub fn try_bucket_exists(&self, bucket_name: &str) -> Result<bool> {
        let exists = self.store.bucket_exists(bucket_name)?;
        self.logger.debug(&format!("Bucket '{bucket_name}' exists: {exists}"));
        Ok(exists)
    }

    /// Upload a local file and return the object key it was stored under.
    ///
    /// The file is read before anything is sent, so a missing file never reaches the store.
    pub fn try_upload_object(
        &self,
        file_path: impl AsRef<Path>,
        bucket_name: &str,
        object_key: Option<&str>,
    ) -> Result<String> {
        let path = file_path.as_ref();
        let key = match object_key {
            Some(key) => key.to_string(),
            None => default_object_key(path)?,
        };
        let body = std::fs::read(path).map_err(|e| StorageError::local_file(path, e))?;
        let size = body.len();

        self.store.put_object(bucket_name, &key, body, content_type_for(path))?;

        self.logger.info(&format!(
            "File '{}' uploaded to '{bucket_name}/{key}'",
            path.display()
        ));
        self.logger.debug(&format!("Uploaded {size} bytes"));
        Ok(key)
    }

    /// Download an object to `download_path` and return the number of bytes written.
    ///
    /// The destination is replaced only once the whole body has been received and
    /// written; on failure it is left as it was.
    pub fn try_download_object(
        &self,
        bucket_name: &str,
        object_key: &str,
        download_path: impl AsRef<Path>,
    ) -> Result<u64> {
        let dest = download_path.as_ref();
        let body = self.store.get_object(bucket_name, object_key)?;
        write_atomically(dest, &body)?;

        self.logger.info(&format!(
            "File '{object_key}' downloaded to '{}'",
            dest.display()
        ));
        Ok(body.len() as u64)
    }

    pub fn try_list_objects(&self, bucket_name: &str, prefix: Option<&str>) -> Result<Vec<String>> {
        let objects = self.store.list_objects(bucket_name, prefix.unwrap_or_default())?;

        if objects.is_empty() {
            self.logger.info(&format!("No objects found in '{bucket_name}'"));
        } else {
            self.logger.info(&format!(
                "Found {} objects in '{bucket_name}':",
                objects.len()
            ));
            for object in &objects {
                self.logger.info(&format!("  - {object}"));
            }
        }
        Ok(objects)
    }

    pub fn try_delete_object(&self, bucket_name: &str, object_key: &str) -> Result<()> {
        self.store.delete_object(bucket_name, object_key)?;
        self.logger.info(&format!("Object '{object_key}' deleted from '{bucket_name}'"));
        Ok(())
    }

    /// Empty the bucket, then delete it.
    ///
    /// Each object is deleted independently and failures do not stop the loop;
    /// the bucket delete is always attempted last. Not transactional: if an
    /// object could not be removed the bucket delete will normally fail too, and
    /// the returned error lists the keys left behind.
    pub fn try_delete_bucket(&self, bucket_name: &str) -> Result<DeleteBucketReport> {
        let mut report = DeleteBucketReport::default();

        match self.try_list_objects(bucket_name, None) {
            Ok(keys) => {
                for key in keys {
                    match self.try_delete_object(bucket_name, &key) {
                        Ok(()) => report.deleted.push(key),
                        Err(e) => {
                            self.logger.warn(&format!("Error deleting object '{key}': {e}"));
                            report.failed.push((key, e));
                        }
                    }
                }
            }
            Err(e) => self.logger.warn(&format!(
                "Could not list objects in '{bucket_name}' before deleting it: {e}"
            )),
        }

        match self.store.delete_bucket(bucket_name) {
            Ok(()) => {
                self.logger.info(&format!("Bucket '{bucket_name}' deleted successfully"));
                Ok(report)
            }
            Err(source) => Err(StorageError::DeleteBucketFailed {
                bucket: bucket_name.to_string(),
                failed_keys: report.failed_keys(),
                source: Box::new(source),
            }),
        }
    }

    pub fn create_bucket(&self, bucket_name: &str) -> bool {
        self.or_log("creating bucket", self.try_create_bucket(bucket_name))
            .is_some()
    }

    pub fn list_buckets(&self) -> Vec<String> {
        self.or_log("listing buckets", self.try_list_buckets())
            .unwrap_or_default()
    }

    pub fn bucket_exists(&self, bucket_name: &str) -> bool {
        self.or_log("checking bucket", self.try_bucket_exists(bucket_name))
            .unwrap_or(false)
    }

    /// `object_key` defaults to the final segment of `file_path`.
    pub fn upload_object(
        &self,
        file_path: impl AsRef<Path>,
        bucket_name: &str,
        object_key: Option<&str>,
    ) -> bool {
        self.or_log(
            "uploading file",
            self.try_upload_object(file_path, bucket_name, object_key),
        )
        .is_some()
    }

    pub fn download_object(
        &self,
        bucket_name: &str,
        object_key: &str,
        download_path: impl AsRef<Path>,
    ) -> bool {
        self.or_log(
            "downloading file",
            self.try_download_object(bucket_name, object_key, download_path),
        )
        .is_some()
    }

    pub fn list_objects(&self, bucket_name: &str, prefix: Option<&str>) -> Vec<String> {
        self.or_log("listing objects", self.try_list_objects(bucket_name, prefix))
            .unwrap_or_default()
    }

    pub fn delete_object(&self, bucket_name: &str, object_key: &str) -> bool {
        self.or_log("deleting object", self.try_delete_object(bucket_name, object_key))
            .is_some()
    }

    pub fn delete_bucket(&self, bucket_name: &str) -> bool {
        self.or_log("deleting bucket", self.try_delete_bucket(bucket_name))
            .is_some()
    }

    fn or_log<T>(&self, action: &str, result: Result<T>) -> Option<T> {
        result
            .inspect_err(|e| self.logger.error(&format!("Error {action}: {e}")))
            .ok()
    }
}
