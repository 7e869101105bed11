mod common;

use ci_log_offload::{
    create_s3_client,
    domain::models::{RuleStatus, Transition},
    BucketName, InMemoryLifecycleRepository, LifecycleConfiguration, LifecycleError,
    LifecycleProvisioner, LifecycleRepository, LifecycleRule, ProvisionOutcome, RetentionPolicy,
    S3Config, S3LifecycleClient, StorageClass,
};
use common::StubServer;
use std::sync::Arc;

fn bucket() -> BucketName {
    BucketName::new("ci-logs").unwrap()
}

#[tokio::test]
async fn provisioning_is_idempotent() {
    let repo = Arc::new(InMemoryLifecycleRepository::new());
    let provisioner = LifecycleProvisioner::new(repo.clone(), bucket(), RetentionPolicy::default());

    let outcomes = [
        provisioner.provision().await,
        provisioner.provision().await,
        provisioner.provision().await,
    ];

    assert_eq!(
        outcomes,
        [
            ProvisionOutcome::Installed,
            ProvisionOutcome::AlreadyApplied,
            ProvisionOutcome::AlreadyApplied,
        ]
    );
    assert_eq!(repo.save_count(&bucket()).await, 1);
}

#[tokio::test]
async fn installed_policy_matches_the_fixed_body() {
    let repo = Arc::new(InMemoryLifecycleRepository::new());
    LifecycleProvisioner::new(repo.clone(), bucket(), RetentionPolicy::default())
        .provision()
        .await;

    let config = repo.get_configuration(&bucket()).await.unwrap().unwrap();
    assert_eq!(
        config,
        LifecycleConfiguration {
            rules: vec![LifecycleRule {
                id: "TransitionToGlacier".to_string(),
                status: RuleStatus::Enabled,
                prefix: None,
                transitions: vec![Transition {
                    days: 30,
                    storage_class: StorageClass::Glacier,
                }],
                expiration_days: Some(365),
            }],
        }
    );
}

#[tokio::test]
async fn configured_day_counts_are_installed() {
    let repo = Arc::new(InMemoryLifecycleRepository::new());
    let policy = RetentionPolicy {
        transition_days: 7,
        expiration_days: 90,
        storage_class: StorageClass::DeepArchive,
    };
    LifecycleProvisioner::new(repo.clone(), bucket(), policy)
        .provision()
        .await;

    let rule = repo.get_configuration(&bucket()).await.unwrap().unwrap().rules[0].clone();
    assert_eq!(rule.transitions[0].days, 7);
    assert_eq!(rule.transitions[0].storage_class.as_str(), "DEEP_ARCHIVE");
    assert_eq!(rule.expiration_days, Some(90));
}

#[tokio::test]
async fn buckets_are_provisioned_independently() {
    let repo = Arc::new(InMemoryLifecycleRepository::new());
    let other = BucketName::new("ci-logs-staging").unwrap();

    LifecycleProvisioner::new(repo.clone(), bucket(), RetentionPolicy::default())
        .provision()
        .await;
    let outcome = LifecycleProvisioner::new(repo.clone(), other.clone(), RetentionPolicy::default())
        .provision()
        .await;

    assert_eq!(outcome, ProvisionOutcome::Installed);
    assert_eq!(repo.save_count(&other).await, 1);
}

async fn s3_client(server: &StubServer) -> S3LifecycleClient {
    let config = S3Config {
        bucket: "ci-logs".to_string(),
        region: "us-east-1".to_string(),
        access_key: Some("AKIAEXAMPLE".to_string()),
        secret_key: Some("secret".to_string()),
        endpoint: Some(server.url.clone()),
        allow_http: true,
    };
    S3LifecycleClient::new(create_s3_client(&config).await)
}

const NO_LIFECYCLE: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
<Error><Code>NoSuchLifecycleConfiguration</Code>\
<Message>The lifecycle configuration does not exist</Message>\
<BucketName>ci-logs</BucketName></Error>";

const ACCESS_DENIED: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
<Error><Code>AccessDenied</Code><Message>Access Denied</Message></Error>";

const EXISTING_LIFECYCLE: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
<LifecycleConfiguration xmlns=\"http://s3.amazonaws.com/doc/2006-03-01/\">\
<Rule><ID>keep-a-week</ID><Filter><Prefix>tmp/</Prefix></Filter><Status>Enabled</Status>\
<Expiration><Days>7</Days></Expiration></Rule></LifecycleConfiguration>";

#[tokio::test]
async fn s3_bucket_without_configuration_reads_as_none() {
    let server = StubServer::start(404, NO_LIFECYCLE).await;

    let config = s3_client(&server)
        .await
        .get_configuration(&bucket())
        .await
        .unwrap();

    assert_eq!(config, None);

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert!(requests[0].target.starts_with("/ci-logs?lifecycle"));
    // Requests are SigV4-signed
    let auth = requests[0].header("authorization").unwrap();
    assert!(auth.starts_with("AWS4-HMAC-SHA256 Credential=AKIAEXAMPLE/"));
    assert!(requests[0].header("x-amz-date").is_some());
    assert!(requests[0].header("x-amz-content-sha256").is_some());
}

#[tokio::test]
async fn s3_existing_configuration_is_returned() {
    let server = StubServer::start(200, EXISTING_LIFECYCLE).await;

    let config = s3_client(&server)
        .await
        .get_configuration(&bucket())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        config.rules,
        vec![LifecycleRule {
            id: "keep-a-week".to_string(),
            status: RuleStatus::Enabled,
            prefix: Some("tmp/".to_string()),
            transitions: vec![],
            expiration_days: Some(7),
        }]
    );

    // The provisioner leaves it alone
    let server_requests = server.requests().len();
    let outcome = LifecycleProvisioner::new(
        Arc::new(s3_client(&server).await),
        bucket(),
        RetentionPolicy::default(),
    )
    .provision()
    .await;
    assert_eq!(outcome, ProvisionOutcome::AlreadyApplied);
    assert_eq!(server.requests().len(), server_requests + 1);
    assert!(server.requests().iter().all(|r| r.method == "GET"));
}

#[tokio::test]
async fn s3_error_status_is_a_query_failure() {
    let server = StubServer::start(403, ACCESS_DENIED).await;

    let err = s3_client(&server)
        .await
        .get_configuration(&bucket())
        .await
        .unwrap_err();

    match err {
        LifecycleError::QueryFailed { bucket: b, message } => {
            assert_eq!(b, bucket());
            assert!(message.contains("AccessDenied"), "{}", message);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn s3_install_sends_the_retention_rule() {
    let server = StubServer::start(200, "").await;

    s3_client(&server)
        .await
        .save_configuration(&bucket(), &RetentionPolicy::default().to_configuration())
        .await
        .unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let put = &requests[0];
    assert_eq!(put.method, "PUT");
    assert!(put.target.starts_with("/ci-logs?lifecycle"));
    assert!(put
        .header("authorization")
        .unwrap()
        .starts_with("AWS4-HMAC-SHA256"));
    assert!(put.headers.iter().any(|(name, _)| name == "content-md5"
        || name.starts_with("x-amz-checksum-")
        || name == "x-amz-trailer"));

    assert!(put.body.contains("<ID>TransitionToGlacier</ID>"));
    assert!(put.body.contains("<Status>Enabled</Status>"));
    assert!(put.body.contains("<Days>30</Days>"));
    assert!(put.body.contains("<StorageClass>GLACIER</StorageClass>"));
    assert!(put.body.contains("<Expiration><Days>365</Days></Expiration>"));
    assert!(put.body.contains("<Filter"));
    assert!(!put.body.contains("<Prefix>"));
}

#[tokio::test]
async fn s3_rejected_install_is_an_install_failure() {
    let server = StubServer::start(403, ACCESS_DENIED).await;

    let err = s3_client(&server)
        .await
        .save_configuration(&bucket(), &RetentionPolicy::default().to_configuration())
        .await
        .unwrap_err();

    assert!(matches!(err, LifecycleError::InstallFailed { .. }));
}
