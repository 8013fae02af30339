use crate::errors::StorageError;
use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};

/// Which request failed, so errors can name the bucket/key involved
#[derive(Debug, Clone, Copy)]
pub(crate) struct RequestContext<'a> {
    pub operation: &'static str,
    pub bucket: &'a str,
    pub key: Option<&'a str>,
}

impl<'a> RequestContext<'a> {
    pub fn bucket(operation: &'static str, bucket: &'a str) -> Self {
        Self {
            operation,
            bucket,
            key: None,
        }
    }

    pub fn object(operation: &'static str, bucket: &'a str, key: &'a str) -> Self {
        Self {
            operation,
            bucket,
            key: Some(key),
        }
    }
}

/// Convert an SDK failure into a [`StorageError`] using the S3 error code and HTTP status.
pub(crate) fn from_sdk<E>(ctx: RequestContext<'_>, err: SdkError<E, HttpResponse>) -> StorageError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let status = err.raw_response().map(|resp| resp.status().as_u16());
    let code = err.code().map(str::to_string);
    let message = DisplayErrorContext(&err).to_string();
    classify(ctx, code.as_deref(), status, message)
}

pub(crate) fn classify(
    ctx: RequestContext<'_>,
    code: Option<&str>,
    status: Option<u16>,
    message: String,
) -> StorageError {
    let bucket = ctx.bucket.to_string();
    match code {
        Some("BucketAlreadyExists") => StorageError::BucketAlreadyExists(bucket),
        Some("BucketAlreadyOwnedByYou") => StorageError::BucketAlreadyOwnedByYou(bucket),
        Some("NoSuchBucket") => StorageError::NoSuchBucket(bucket),
        Some("NoSuchKey") => StorageError::NoSuchKey {
            bucket,
            key: ctx.key.unwrap_or_default().to_string(),
        },
        Some("BucketNotEmpty") => StorageError::BucketNotEmpty(bucket),
        Some("AccessDenied") | Some("AllAccessDisabled") => StorageError::AccessDenied(message),
        // HEAD responses carry no body, so only the status is available
        None | Some("NotFound") if status == Some(404) => match ctx.key {
            Some(key) => StorageError::NoSuchKey {
                bucket,
                key: key.to_string(),
            },
            None => StorageError::NoSuchBucket(bucket),
        },
        None | Some("Forbidden") if status == Some(403) => StorageError::AccessDenied(message),
        _ => StorageError::Remote {
            operation: ctx.operation,
            code: code.map(str::to_string),
            message,
        },
    }
}
