//! Fetch-to-post publishing sequence
//!
//! Strict order: authenticate, compose, validate, download, upload, post.
//! Each step must complete before the next starts; any failure aborts the
//! whole operation. An already-uploaded blob is not reclaimed when the final
//! post call fails, so the platform may retain an orphaned attachment.

use tracing::{debug, info};

use crate::apod::ApodSource;
use crate::error::Result;
use crate::platforms::Platform;
use crate::types::ApodRecord;

/// Compose the user-visible post text.
///
/// The layout is published content and must stay byte-for-byte stable,
/// including newlines.
pub fn compose_post_text(title: &str, image_date: chrono::NaiveDate) -> String {
    format!(
        "{title}\nImage from NASA APOD. Please check NASA APOD for further details and image credits.\nDate in APOD: {image_date}\n#Space #Astronomy #Cosmos #Universe #Galaxy #SpaceExploration"
    )
}

/// Publish one APOD record: log in, compose the text, download the image,
/// upload it as a blob, and submit the post with the record's explanation as
/// the image's alt text. Returns the platform post ID.
pub async fn publish<S, P>(source: &S, platform: &mut P, record: &ApodRecord) -> Result<String>
where
    S: ApodSource,
    P: Platform,
{
    info!(
        "Publishing APOD {} ({}) to {}",
        record.image_date,
        record.title,
        platform.name()
    );

    platform.authenticate().await?;

    let text = compose_post_text(&record.title, record.image_date);
    platform.validate_content(&text)?;

    let image = source.fetch_image(&record.image_url).await?;
    debug!("Downloaded image: {} bytes, {}", image.bytes.len(), image.mime);

    let attachment = platform.upload_attachment(image.bytes, image.mime).await?;
    let post_id = platform
        .publish_post(&text, &record.explanation, attachment)
        .await?;

    info!("Posted to {} successfully: {}", platform.name(), post_id);
    Ok(post_id)
}
