mod common;

use std::sync::Arc;

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::Client as S3Client;
use common::*;
use media_storage::{LinkFormatter, MediaUploader, RasterEncoder, S3ObjectStore};
use uuid::Uuid;

/// Test configuration for LocalStack
const LOCALSTACK_ENDPOINT: &str = "http://localhost:4566";
const LOCALSTACK_PUBLIC_HOST: &str = "localhost.localstack.cloud:4566";
const TEST_REGION: &str = "us-east-1";

/// Test context that removes the bucket on drop
struct TestContext {
    s3_client: Arc<S3Client>,
    bucket_name: String,
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let client = self.s3_client.clone();
        let bucket = self.bucket_name.clone();

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                if let Ok(listed) = client.list_objects_v2().bucket(&bucket).send().await {
                    for object in listed.contents() {
                        if let Some(key) = object.key() {
                            let _ = client.delete_object().bucket(&bucket).key(key).send().await;
                        }
                    }
                }
                let _ = client.delete_bucket().bucket(&bucket).send().await;
            });
        }
    }
}

async fn setup_test() -> TestContext {
    let bucket_name = format!("test-media-{}", Uuid::new_v4());

    let credentials = Credentials::from_keys("test", "test", None);
    let config = aws_config::defaults(BehaviorVersion::latest())
        .endpoint_url(LOCALSTACK_ENDPOINT)
        .region(Region::new(TEST_REGION))
        .credentials_provider(credentials)
        .load()
        .await;

    let s3_config = aws_sdk_s3::config::Builder::from(&config)
        .force_path_style(true)
        .build();
    let s3_client = Arc::new(S3Client::from_conf(s3_config));

    s3_client
        .create_bucket()
        .bucket(&bucket_name)
        .send()
        .await
        .expect("Failed to create test bucket");

    TestContext {
        s3_client,
        bucket_name,
    }
}

#[tokio::test]
#[ignore = "requires LocalStack on localhost:4566"]
async fn test_upload_images_to_localstack() {
    let context = setup_test().await;
    let store = Arc::new(S3ObjectStore::new(
        context.s3_client.clone(),
        context.bucket_name.clone(),
    ));
    let uploader = MediaUploader::new(
        store,
        RasterEncoder,
        LinkFormatter::new(LOCALSTACK_PUBLIC_HOST),
    );

    let links = uploader
        .upload_images(&[
            source_image("photo.png", "image/png"),
            source_image("holiday.jpg", "image/jpeg"),
        ])
        .await
        .expect("Batch upload failed");

    assert_eq!(links.originals.len(), 2);
    assert_eq!(links.thumbnails.len(), 2);

    let prefix = format!("https://{LOCALSTACK_PUBLIC_HOST}/{}/", context.bucket_name);
    for link in links.originals.iter().chain(&links.thumbnails) {
        let key = link
            .strip_prefix(&prefix)
            .unwrap_or_else(|| panic!("unexpected link {link}"));

        let head = context
            .s3_client
            .head_object()
            .bucket(&context.bucket_name)
            .key(key)
            .send()
            .await
            .expect("Uploaded object missing");
        assert!(head.content_length().unwrap_or_default() > 0);
        assert!(head
            .content_type()
            .is_some_and(|content_type| content_type.starts_with("image/")));
    }
}

#[tokio::test]
#[ignore = "requires LocalStack on localhost:4566"]
async fn test_missing_bucket_fails_batch() {
    let context = setup_test().await;
    let store = Arc::new(S3ObjectStore::new(
        context.s3_client.clone(),
        format!("{}-missing", context.bucket_name),
    ));
    let uploader = MediaUploader::new(store, RasterEncoder, LinkFormatter::default());

    let err = uploader
        .upload_images(&[source_image("photo.png", "image/png")])
        .await
        .expect_err("upload to a missing bucket succeeded");

    assert!(matches!(err, media_storage::MediaError::Upload { .. }));
}
