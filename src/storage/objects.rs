use crate::errors::{Result, StorageError};
use crate::storage::client::S3Backend;
use crate::storage::sdk_errors::{RequestContext, from_sdk};
use aws_sdk_s3::primitives::ByteStream;

impl S3Backend {
    pub fn put_object(
        &self,
        bucket_name: &str,
        object_key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        let request = self
            .client
            .put_object()
            .bucket(bucket_name)
            .key(object_key)
            .body(ByteStream::from(body))
            .content_type(content_type);

        let ctx = RequestContext::object("PutObject", bucket_name, object_key);
        self.runtime
            .block_on(request.send())
            .map_err(|e| from_sdk(ctx, e))?;
        Ok(())
    }

    /// Fetch the whole object into memory
    pub fn get_object(&self, bucket_name: &str, object_key: &str) -> Result<Vec<u8>> {
        self.runtime.block_on(async {
            let resp = self
                .client
                .get_object()
                .bucket(bucket_name)
                .key(object_key)
                .send()
                .await
                .map_err(|e| {
                    from_sdk(RequestContext::object("GetObject", bucket_name, object_key), e)
                })?;

            let bytes = resp.body.collect().await.map_err(|e| StorageError::Remote {
                operation: "GetObject",
                code: None,
                message: format!("Failed to read response body: {e}"),
            })?;

            Ok::<Vec<u8>, StorageError>(bytes.to_vec())
        })
    }

    /// List every key under `prefix`, following continuation tokens across pages
    pub fn list_objects(&self, bucket_name: &str, prefix: &str) -> Result<Vec<String>> {
        self.runtime.block_on(async {
            let mut keys = Vec::new();
            let mut pages = self
                .client
                .list_objects_v2()
                .bucket(bucket_name)
                .set_prefix((!prefix.is_empty()).then(|| prefix.to_string()))
                .into_paginator()
                .send();

            while let Some(page) = pages.next().await {
                let page = page.map_err(|e| {
                    from_sdk(RequestContext::bucket("ListObjectsV2", bucket_name), e)
                })?;
                keys.extend(
                    page.contents()
                        .iter()
                        .filter_map(|object| object.key().map(str::to_string)),
                );
            }

            Ok::<Vec<String>, StorageError>(keys)
        })
    }

    pub fn delete_object(&self, bucket_name: &str, object_key: &str) -> Result<()> {
        self.runtime
            .block_on(
                self.client
                    .delete_object()
                    .bucket(bucket_name)
                    .key(object_key)
                    .send(),
            )
            .map_err(|e| {
                from_sdk(RequestContext::object("DeleteObject", bucket_name, object_key), e)
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::StorageError;
    use crate::storage::client::replay::{backend, event};

    fn list_page(keys: &[&str], next_token: Option<&str>) -> String {
        let contents: String = keys
            .iter()
            .map(|k| format!("<Contents><Key>{k}</Key><Size>1</Size></Contents>"))
            .collect();
        let truncation = match next_token {
            Some(token) => format!(
                "<IsTruncated>true</IsTruncated>\
                 <NextContinuationToken>{token}</NextContinuationToken>"
            ),
            None => "<IsTruncated>false</IsTruncated>".to_string(),
        };
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<ListBucketResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
<Name>lab</Name><KeyCount>{}</KeyCount>{truncation}{contents}
</ListBucketResult>"#,
            keys.len()
        )
    }

    #[test]
    fn listing_follows_continuation_tokens() {
        let (backend, http) = backend(
            "us-east-1",
            vec![
                event(200, &list_page(&["a.txt", "b.txt"], Some("page-2"))),
                event(200, &list_page(&["c.txt"], None)),
            ],
        );

        let keys = backend.list_objects("lab", "").unwrap();
        assert_eq!(keys, vec!["a.txt", "b.txt", "c.txt"]);

        let uris: Vec<String> = http.actual_requests().map(|r| r.uri().to_string()).collect();
        assert_eq!(uris.len(), 2);
        assert!(!uris[0].contains("continuation-token"));
        assert!(uris[1].contains("continuation-token=page-2"), "uri was: {}", uris[1]);
        assert!(!uris[0].contains("prefix="));
    }

    #[test]
    fn prefix_is_sent_when_given() {
        let (backend, http) = backend("us-east-1", vec![event(200, &list_page(&[], None))]);

        assert!(backend.list_objects("lab", "logs/").unwrap().is_empty());
        let uri = http.actual_requests().next().map(|r| r.uri().to_string());
        assert!(uri.unwrap_or_default().contains("prefix=logs"));
    }

    #[test]
    fn get_returns_the_body() {
        let (backend, _http) = backend("us-east-1", vec![event(200, "Hello from AWS S3!")]);
        assert_eq!(backend.get_object("lab", "a.txt").unwrap(), b"Hello from AWS S3!");
    }

    #[test]
    fn missing_key_maps_to_no_such_key() {
        let body = r#"<?xml version="1.0" encoding="UTF-8"?>
<Error>
  <Code>NoSuchKey</Code>
  <Message>The specified key does not exist.</Message>
  <Key>gone.txt</Key>
</Error>"#;
        let (backend, _http) = backend("us-east-1", vec![event(404, body)]);

        match backend.get_object("lab", "gone.txt") {
            Err(StorageError::NoSuchKey { bucket, key }) => {
                assert_eq!(bucket, "lab");
                assert_eq!(key, "gone.txt");
            }
            other => panic!("expected NoSuchKey, got {other:?}"),
        }
    }
}
