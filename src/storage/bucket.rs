use crate::errors::{Result, StorageError};
use crate::storage::client::S3Backend;
use crate::storage::models::DEFAULT_REGION;
use crate::storage::sdk_errors::{RequestContext, from_sdk};
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};

/// us-east-1 rejects an explicit constraint; every other region requires one.
pub(crate) fn location_constraint(region: &str) -> Option<BucketLocationConstraint> {
    if region == DEFAULT_REGION {
        None
    } else {
        Some(BucketLocationConstraint::from(region))
    }
}

impl S3Backend {
    pub fn create_bucket(&self, bucket_name: &str) -> Result<()> {
        let mut request = self.client.create_bucket().bucket(bucket_name);
        if let Some(constraint) = location_constraint(&self.region) {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(constraint)
                    .build(),
            );
        }

        self.runtime
            .block_on(request.send())
            .map_err(|e| from_sdk(RequestContext::bucket("CreateBucket", bucket_name), e))?;
        Ok(())
    }

    pub fn list_buckets(&self) -> Result<Vec<String>> {
        let output = self
            .runtime
            .block_on(self.client.list_buckets().send())
            .map_err(|e| from_sdk(RequestContext::bucket("ListBuckets", ""), e))?;

        Ok(output
            .buckets()
            .iter()
            .filter_map(|b| b.name().map(str::to_string))
            .collect())
    }

    pub fn bucket_exists(&self, bucket_name: &str) -> Result<bool> {
        let result = self
            .runtime
            .block_on(self.client.head_bucket().bucket(bucket_name).send());

        match result {
            Ok(_) => Ok(true),
            Err(e) => match from_sdk(RequestContext::bucket("HeadBucket", bucket_name), e) {
                StorageError::NoSuchBucket(_) => Ok(false),
                other => Err(other),
            },
        }
    }

    pub fn delete_bucket(&self, bucket_name: &str) -> Result<()> {
        self.runtime
            .block_on(self.client.delete_bucket().bucket(bucket_name).send())
            .map_err(|e| from_sdk(RequestContext::bucket("DeleteBucket", bucket_name), e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::storage::client::replay::{backend, event, sent_bodies};

    const ALREADY_OWNED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Error>
  <Code>BucketAlreadyOwnedByYou</Code>
  <Message>Your previous request to create the named bucket succeeded.</Message>
  <BucketName>lab-bucket</BucketName>
  <RequestId>4442587FB7D0A2F9</RequestId>
</Error>"#;

    #[test]
    fn default_region_sends_no_constraint() {
        assert!(location_constraint("us-east-1").is_none());
    }

    #[test]
    fn other_regions_send_their_name() {
        let constraint = location_constraint("eu-west-1").expect("constraint");
        assert_eq!(constraint.as_str(), "eu-west-1");
    }

    #[test]
    fn create_in_owned_bucket_maps_to_already_owned() {
        let (backend, _http) = backend("us-east-1", vec![event(409, ALREADY_OWNED)]);

        match backend.create_bucket("lab-bucket") {
            Err(StorageError::BucketAlreadyOwnedByYou(name)) => assert_eq!(name, "lab-bucket"),
            other => panic!("expected BucketAlreadyOwnedByYou, got {other:?}"),
        }
    }

    #[test]
    fn create_outside_us_east_1_sends_location_constraint() {
        let (backend, http) = backend("eu-west-1", vec![event(200, "")]);
        backend.create_bucket("lab-bucket").unwrap();

        let bodies = sent_bodies(&http);
        assert_eq!(bodies.len(), 1);
        assert!(bodies[0].contains("CreateBucketConfiguration"), "body was: {}", bodies[0]);
        assert!(bodies[0].contains("<LocationConstraint>eu-west-1</LocationConstraint>"));
    }

    #[test]
    fn create_in_us_east_1_sends_no_body() {
        let (backend, http) = backend("us-east-1", vec![event(200, "")]);
        backend.create_bucket("lab-bucket").unwrap();
        assert_eq!(sent_bodies(&http), vec![String::new()]);
    }

    #[test]
    fn head_404_means_absent() {
        let (backend, http) = backend("us-east-1", vec![event(404, "")]);
        assert!(!backend.bucket_exists("gone").unwrap());
        assert_eq!(http.actual_requests().count(), 1);
    }

    #[test]
    fn head_403_is_an_error() {
        let (backend, _http) = backend("us-east-1", vec![event(403, "")]);
        let err = backend.bucket_exists("theirs").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    }

    #[test]
    fn list_buckets_keeps_response_order() {
        let body = r#"<?xml version="1.0" encoding="UTF-8"?>
<ListAllMyBucketsResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
  <Owner><ID>abc</ID></Owner>
  <Buckets>
    <Bucket><Name>zeta</Name><CreationDate>2024-01-01T00:00:00.000Z</CreationDate></Bucket>
    <Bucket><Name>alpha</Name><CreationDate>2024-01-02T00:00:00.000Z</CreationDate></Bucket>
  </Buckets>
</ListAllMyBucketsResult>"#;
        let (backend, _http) = backend("us-east-1", vec![event(200, body)]);
        assert_eq!(backend.list_buckets().unwrap(), vec!["zeta", "alpha"]);
    }
}
