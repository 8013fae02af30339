use crate::errors::{Result, StorageError};
use crate::interfaces::ObjectStore;
use crate::storage::DEFAULT_REGION;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
struct MemoryBucket {
    name: String,
    owner: String,
    objects: BTreeMap<String, StoredObject>,
}

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: String,
}

#[derive(Debug, Default)]
struct MemoryState {
    /// Creation order, which is also listing order
    buckets: Vec<MemoryBucket>,
    calls: Vec<String>,
}

/// In-process stand-in for S3 that behaves like the real service for one account:
/// bucket ownership conflicts, non-empty bucket deletes, lexicographic key listing.
#[derive(Debug)]
pub struct MemoryStore {
    account: String,
    region: String,
    state: Mutex<MemoryState>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new("test-account")
    }
}

impl MemoryStore {
    pub fn new(account: &str) -> Self {
        Self {
            account: account.to_string(),
            region: DEFAULT_REGION.to_string(),
            state: Mutex::new(MemoryState::default()),
        }
    }

    pub fn with_region(mut self, region: &str) -> Self {
        self.region = region.to_string();
        self
    }

    /// Register a bucket that belongs to some other account.
    pub fn insert_foreign_bucket(&self, name: &str, owner: &str) {
        self.lock().buckets.push(MemoryBucket {
            name: name.to_string(),
            owner: owner.to_string(),
            objects: BTreeMap::new(),
        });
    }

    /// Names of the remote operations issued so far, e.g. `"PutObject"`.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        let state = self.lock();
        state
            .buckets
            .iter()
            .find(|b| b.name == bucket)
            .and_then(|b| b.objects.get(key).cloned())
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, op: &str) -> MutexGuard<'_, MemoryState> {
        let mut state = self.lock();
        state.calls.push(op.to_string());
        state
    }

    fn owned_bucket<'a>(
        &self,
        state: &'a mut MemoryState,
        bucket: &str,
    ) -> Result<&'a mut MemoryBucket> {
        match state.buckets.iter_mut().find(|b| b.name == bucket) {
            Some(b) if b.owner == self.account => Ok(b),
            Some(_) => Err(StorageError::AccessDenied(format!(
                "bucket '{bucket}' belongs to another account"
            ))),
            None => Err(StorageError::NoSuchBucket(bucket.to_string())),
        }
    }
}

impl ObjectStore for MemoryStore {
    fn create_bucket(&self, bucket: &str) -> Result<()> {
        let mut state = self.record("CreateBucket");
        if let Some(existing) = state.buckets.iter().find(|b| b.name == bucket) {
            return Err(if existing.owner == self.account {
                StorageError::BucketAlreadyOwnedByYou(bucket.to_string())
            } else {
                StorageError::BucketAlreadyExists(bucket.to_string())
            });
        }
        state.buckets.push(MemoryBucket {
            name: bucket.to_string(),
            owner: self.account.clone(),
            objects: BTreeMap::new(),
        });
        Ok(())
    }

    fn list_buckets(&self) -> Result<Vec<String>> {
        let state = self.record("ListBuckets");
        Ok(state
            .buckets
            .iter()
            .filter(|b| b.owner == self.account)
            .map(|b| b.name.clone())
            .collect())
    }

    fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        let mut state = self.record("HeadBucket");
        match self.owned_bucket(&mut state, bucket) {
            Ok(_) => Ok(true),
            Err(StorageError::NoSuchBucket(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>, content_type: &str) -> Result<()> {
        let mut state = self.record("PutObject");
        let target = self.owned_bucket(&mut state, bucket)?;
        target.objects.insert(
            key.to_string(),
            StoredObject {
                body,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let mut state = self.record("GetObject");
        let target = self.owned_bucket(&mut state, bucket)?;
        target
            .objects
            .get(key)
            .map(|o| o.body.clone())
            .ok_or_else(|| StorageError::NoSuchKey {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }

    fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<String>> {
        let mut state = self.record("ListObjectsV2");
        let target = self.owned_bucket(&mut state, bucket)?;
        Ok(target
            .objects
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        let mut state = self.record("DeleteObject");
        // S3 answers success for keys that do not exist
        self.owned_bucket(&mut state, bucket)?.objects.remove(key);
        Ok(())
    }

    fn delete_bucket(&self, bucket: &str) -> Result<()> {
        let mut state = self.record("DeleteBucket");
        if !self.owned_bucket(&mut state, bucket)?.objects.is_empty() {
            return Err(StorageError::BucketNotEmpty(bucket.to_string()));
        }
        state.buckets.retain(|b| b.name != bucket);
        Ok(())
    }

    fn region(&self) -> String {
        self.region.clone()
    }
}
