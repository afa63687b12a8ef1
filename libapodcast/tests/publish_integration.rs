//! End-to-end publishing tests against the mock APOD source and platform.

use chrono::NaiveDate;
use libapodcast::apod;
use libapodcast::apod::mock::MockApodSource;
use libapodcast::config::FetcherConfig;
use libapodcast::error::{ApodError, ApodcastError, PlatformError};
use libapodcast::platforms::mock::MockPlatform;
use libapodcast::publisher;
use libapodcast::types::{ApodRecord, ImageMimeType};

const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46];

fn sample_record() -> ApodRecord {
    ApodRecord {
        image_url: "https://apod.example/M31.jpg".to_string(),
        title: "M31".to_string(),
        explanation: "The Andromeda galaxy.".to_string(),
        image_date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
    }
}

fn image_source() -> MockApodSource {
    MockApodSource::with_responses(vec![]).with_image(JPEG_BYTES.to_vec(), ImageMimeType::Jpeg)
}

#[tokio::test]
async fn publish_runs_the_full_sequence() {
    let source = image_source();
    let mut platform = MockPlatform::success("mock-bluesky");

    let post_id = publisher::publish(&source, &mut platform, &sample_record())
        .await
        .unwrap();
    assert!(post_id.starts_with("mock-bluesky:post-"));

    assert_eq!(platform.auth_call_count(), 1);
    assert_eq!(source.image_call_count(), 1);
    assert_eq!(platform.upload_call_count(), 1);
    assert_eq!(platform.post_call_count(), 1);

    let uploaded = platform.uploaded();
    assert_eq!(uploaded, vec![(JPEG_BYTES.len(), ImageMimeType::Jpeg)]);

    let published = platform.published();
    assert_eq!(published.len(), 1);
    assert_eq!(
        published[0].text,
        "M31\nImage from NASA APOD. Please check NASA APOD for further details and image credits.\nDate in APOD: 2024-03-10\n#Space #Astronomy #Cosmos #Universe #Galaxy #SpaceExploration"
    );
    assert_eq!(published[0].alt_text, "The Andromeda galaxy.");
    assert_eq!(published[0].attachment, "mock-bluesky:blob-1");
}

#[tokio::test]
async fn login_failure_skips_every_later_step() {
    let source = image_source();
    let mut platform = MockPlatform::auth_failure("mock-bluesky", "Invalid app password");

    let result = publisher::publish(&source, &mut platform, &sample_record()).await;
    assert!(matches!(
        result,
        Err(ApodcastError::Platform(PlatformError::Authentication(_)))
    ));

    assert_eq!(platform.auth_call_count(), 1);
    assert_eq!(source.image_call_count(), 0);
    assert_eq!(platform.upload_call_count(), 0);
    assert_eq!(platform.post_call_count(), 0);
}

#[tokio::test]
async fn image_download_failure_aborts_before_upload() {
    let source = MockApodSource::with_responses(vec![]).with_image_failure("connection reset");
    let mut platform = MockPlatform::success("mock-bluesky");

    let result = publisher::publish(&source, &mut platform, &sample_record()).await;
    assert!(matches!(
        result,
        Err(ApodcastError::Apod(ApodError::ImageDownload(_)))
    ));

    assert_eq!(platform.upload_call_count(), 0);
    assert_eq!(platform.post_call_count(), 0);
}

#[tokio::test]
async fn upload_failure_skips_post() {
    let source = image_source();
    let mut platform = MockPlatform::upload_failure("mock-bluesky", "Blob rejected");

    let result = publisher::publish(&source, &mut platform, &sample_record()).await;
    assert!(matches!(
        result,
        Err(ApodcastError::Platform(PlatformError::Upload(_)))
    ));

    assert_eq!(platform.upload_call_count(), 1);
    assert_eq!(platform.post_call_count(), 0);
}

#[tokio::test]
async fn post_failure_leaves_the_uploaded_blob_behind() {
    let source = image_source();
    let mut platform = MockPlatform::post_failure("mock-bluesky", "Record rejected");

    let result = publisher::publish(&source, &mut platform, &sample_record()).await;
    assert!(matches!(
        result,
        Err(ApodcastError::Platform(PlatformError::Posting(_)))
    ));

    // The blob uploaded before the failed post call is not reclaimed.
    assert_eq!(platform.uploaded().len(), 1);
    assert!(platform.published().is_empty());
}

#[tokio::test]
async fn repeated_runs_produce_distinct_posts() {
    // There is no posted-history persistence, so publishing the same record
    // twice yields two posts. Duplicate posts across runs are expected.
    let source = image_source();
    let mut platform = MockPlatform::success("mock-bluesky");
    let record = sample_record();

    let first = publisher::publish(&source, &mut platform, &record)
        .await
        .unwrap();
    let second = publisher::publish(&source, &mut platform, &record)
        .await
        .unwrap();

    assert_ne!(first, second);
    assert_eq!(platform.published().len(), 2);
    assert_eq!(platform.published()[0].text, platform.published()[1].text);
}

#[tokio::test]
async fn fetch_then_publish_end_to_end() {
    let source = MockApodSource::with_responses(vec![
        MockApodSource::response("video", "Rocket Launch"),
        MockApodSource::response("video", "Eclipse Replay"),
        MockApodSource::response("image", "M31"),
    ])
    .with_image(JPEG_BYTES.to_vec(), ImageMimeType::Jpeg);

    let fetcher = FetcherConfig::default();
    let record = apod::fetch_random_record(&source, &fetcher).await.unwrap();
    assert_eq!(record.title, "M31");
    assert_eq!(source.metadata_call_count(), 3);

    let mut platform = MockPlatform::success("mock-bluesky");
    let post_id = publisher::publish(&source, &mut platform, &record)
        .await
        .unwrap();

    assert!(post_id.starts_with("mock-bluesky:post-"));
    let published = platform.published();
    assert_eq!(published.len(), 1);
    assert!(published[0].text.starts_with("M31\n"));
    assert_eq!(published[0].alt_text, "About M31");
}

#[tokio::test]
async fn oversized_composed_text_fails_validation() {
    let source = image_source();
    let mut platform = MockPlatform::with_limit("mock-bluesky", 120);

    let result = publisher::publish(&source, &mut platform, &sample_record()).await;
    assert!(matches!(
        result,
        Err(ApodcastError::Platform(PlatformError::Validation(_)))
    ));

    // Validation happens after login but before any transfer.
    assert_eq!(platform.auth_call_count(), 1);
    assert_eq!(source.image_call_count(), 0);
    assert_eq!(platform.upload_call_count(), 0);
}
