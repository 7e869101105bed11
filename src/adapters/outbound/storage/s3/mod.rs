//! S3 storage backend built with the object_store crate
//!
//! Log uploads go through [`create_s3_store`]; bucket lifecycle
//! configuration, which object_store does not cover, goes through
//! [`S3LifecycleClient`] on an AWS SDK client from [`create_s3_client`].
//! Both read credentials from the configuration first and the standard
//! AWS environment otherwise.

pub mod lifecycle_client;

pub use lifecycle_client::S3LifecycleClient;

use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::Region;
use object_store::{aws::AmazonS3Builder, ObjectStore as ObjectStoreBackend};
use std::sync::Arc;

/// Configuration for S3 storage backend
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub endpoint: Option<String>,
    pub allow_http: bool,
}

/// Create an S3 store from configuration
pub fn create_s3_store(config: &S3Config) -> object_store::Result<Arc<dyn ObjectStoreBackend>> {
    let mut builder = AmazonS3Builder::from_env()
        .with_bucket_name(&config.bucket)
        .with_region(&config.region)
        .with_allow_http(config.allow_http);

    if let Some(access_key) = &config.access_key {
        builder = builder.with_access_key_id(access_key);
    }

    if let Some(secret_key) = &config.secret_key {
        builder = builder.with_secret_access_key(secret_key);
    }

    if let Some(endpoint) = &config.endpoint {
        builder = builder.with_endpoint(endpoint);
    }

    Ok(Arc::new(builder.build()?))
}

/// Create an AWS SDK client for the calls object_store does not cover
pub async fn create_s3_client(config: &S3Config) -> aws_sdk_s3::Client {
    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));

    if let (Some(access_key), Some(secret_key)) = (&config.access_key, &config.secret_key) {
        loader = loader.credentials_provider(Credentials::new(
            access_key,
            secret_key,
            None,
            None,
            "log-offload",
        ));
    }

    if let Some(endpoint) = &config.endpoint {
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;

    // Custom endpoints are addressed path-style
    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(config.endpoint.is_some())
        .build();

    aws_sdk_s3::Client::from_conf(s3_config)
}
