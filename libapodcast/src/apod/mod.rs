//! Random-date APOD fetching
//!
//! Draws a random calendar date between a configured lower bound and now,
//! retrieves the record for that date from the APOD API, and redraws when
//! the record is a video. The redraw loop is bounded by
//! [`FetcherConfig::max_attempts`].

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use rand::Rng;
use serde::Deserialize;
use tracing::debug;

use crate::config::FetcherConfig;
use crate::error::{ApodError, Result};
use crate::types::{ApodRecord, ImageBlob};

pub mod mock;
pub mod nasa;

/// JSON fields consumed from an APOD API response. Anything else the API
/// returns is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ApodResponse {
    pub url: String,
    pub title: String,
    pub explanation: String,
    pub media_type: String,
}

/// Source of APOD metadata and image bytes.
///
/// The seam between fetch logic and the network: the real implementation
/// talks to api.nasa.gov, the mock replays a scripted sequence in tests.
#[async_trait]
pub trait ApodSource: Send + Sync {
    /// Retrieve the APOD record for a specific calendar date.
    async fn fetch_by_date(&self, date: NaiveDate) -> Result<ApodResponse>;

    /// Retrieve the raw bytes behind an APOD image URL.
    async fn fetch_image(&self, url: &str) -> Result<ImageBlob>;
}

/// Draw a uniformly random calendar date between `start` (at midnight UTC)
/// and the instant `end`, truncating the drawn instant to its UTC date.
pub fn random_date_in_range(start: NaiveDate, end: DateTime<Utc>) -> Result<NaiveDate> {
    let start_ms = start.and_time(NaiveTime::MIN).and_utc().timestamp_millis();
    let end_ms = end.timestamp_millis();
    if start_ms > end_ms {
        return Err(ApodError::EmptyDateRange {
            start,
            end: end.date_naive(),
        }
        .into());
    }

    let offset = rand::thread_rng().gen_range(0..=end_ms - start_ms);
    let drawn = start.and_time(NaiveTime::MIN) + Duration::milliseconds(offset);
    Ok(drawn.date())
}

/// Fetch a random APOD record, redrawing the date until the result is an
/// image.
///
/// Video records are discarded and a fresh date is drawn, up to
/// `config.max_attempts` tries; exhaustion fails with
/// [`ApodError::NoImageFound`]. No caching: every call draws fresh dates
/// and issues fresh requests.
pub async fn fetch_random_record<S: ApodSource>(
    source: &S,
    config: &FetcherConfig,
) -> Result<ApodRecord> {
    for attempt in 1..=config.max_attempts {
        let image_date = random_date_in_range(config.start_date, Utc::now())?;
        let response = source.fetch_by_date(image_date).await?;

        if response.media_type == "image" {
            return Ok(ApodRecord {
                image_url: response.url,
                title: response.title,
                explanation: response.explanation,
                image_date,
            });
        }

        debug!(
            "APOD for {} has media_type {:?}, redrawing (attempt {}/{})",
            image_date, response.media_type, attempt, config.max_attempts
        );
    }

    Err(ApodError::NoImageFound {
        attempts: config.max_attempts,
    }
    .into())
}
