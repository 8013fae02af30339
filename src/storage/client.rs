use crate::errors::{Result, StorageError};
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;

/// S3 client bound to one region, driven synchronously through its own runtime
pub struct S3Backend {
    pub(crate) client: Client,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) region: String,
}

impl std::fmt::Debug for S3Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Backend")
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

impl S3Backend {
    /// Build a client for `region` from the ambient AWS configuration
    /// (environment, shared config files, instance role).
    ///
    /// Credentials are resolved here, once, so a missing login fails before any
    /// bucket or object call is attempted.
    pub fn connect(region: &str) -> Result<Self> {
        let runtime = new_runtime()?;
        let sdk_config = runtime.block_on(
            aws_config::defaults(BehaviorVersion::latest())
                .region(Region::new(region.to_string()))
                .load(),
        );
        Self::with_runtime(runtime, &sdk_config)
    }

    /// Build a client from an already-assembled SDK config
    pub fn from_sdk_config(sdk_config: &SdkConfig) -> Result<Self> {
        Self::with_runtime(new_runtime()?, sdk_config)
    }

    fn with_runtime(runtime: tokio::runtime::Runtime, sdk_config: &SdkConfig) -> Result<Self> {
        let region = sdk_config
            .region()
            .map(|r| r.as_ref().to_string())
            .ok_or_else(|| StorageError::Config("no region is configured".to_string()))?;

        let provider = sdk_config.credentials_provider().ok_or_else(|| {
            StorageError::NoCredentials("no credentials provider is configured".to_string())
        })?;

        runtime
            .block_on(provider.provide_credentials())
            .map_err(|e| StorageError::NoCredentials(DisplayErrorContext(&e).to_string()))?;

        Ok(Self {
            client: Client::new(sdk_config),
            runtime,
            region,
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

fn new_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| StorageError::Runtime(format!("Failed to create runtime: {e}")))
}

/// Backends wired to canned HTTP exchanges instead of the network
#[cfg(test)]
pub(crate) mod replay {
    use super::S3Backend;
    use aws_config::{BehaviorVersion, Region, SdkConfig};
    use aws_credential_types::Credentials;
    use aws_credential_types::provider::SharedCredentialsProvider;
    use aws_smithy_runtime::client::http::test_util::{ReplayEvent, StaticReplayClient};
    use aws_smithy_runtime_api::client::orchestrator::HttpResponse;
    use aws_smithy_runtime_api::http::{Request, Response, StatusCode};
    use aws_smithy_types::body::SdkBody;

    /// One exchange; the request side is never compared, only recorded.
    pub(crate) fn event(status: u16, body: &str) -> ReplayEvent {
        ReplayEvent::new(Request::new(SdkBody::empty()), response(status, body))
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        let status = StatusCode::try_from(status).expect("valid status");
        Response::new(status, SdkBody::from(body.to_string()))
    }

    pub(crate) fn backend(
        region: &str,
        events: Vec<ReplayEvent>,
    ) -> (S3Backend, StaticReplayClient) {
        let http = StaticReplayClient::new(events);
        let credentials = Credentials::new("AKIDEXAMPLE", "secret", None, None, "replay");
        let config = SdkConfig::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .credentials_provider(SharedCredentialsProvider::new(credentials))
            .http_client(http.clone())
            .build();
        let backend = S3Backend::from_sdk_config(&config).expect("replay backend");
        (backend, http)
    }

    /// Bodies of the requests sent so far, as text
    pub(crate) fn sent_bodies(http: &StaticReplayClient) -> Vec<String> {
        http.actual_requests()
            .map(|r| r.body().bytes().unwrap_or_default())
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .collect()
    }
}
