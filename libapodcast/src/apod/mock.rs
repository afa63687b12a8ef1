//! Scripted APOD source for tests
//!
//! Replays a fixed sequence of metadata responses and serves a canned image,
//! with call counters for verifying fetch behavior. Available in all builds
//! so integration tests can use it.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::{ApodError, Result};
use crate::types::{ImageBlob, ImageMimeType};

use super::{ApodResponse, ApodSource};

pub struct MockApodSource {
    responses: Mutex<VecDeque<ApodResponse>>,
    image_bytes: Vec<u8>,
    image_mime: ImageMimeType,
    image_error: Option<String>,
    metadata_call_count: Arc<Mutex<usize>>,
    image_call_count: Arc<Mutex<usize>>,
}

impl MockApodSource {
    /// Create a source that replays `responses` in order, then errors.
    pub fn with_responses(responses: Vec<ApodResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            image_bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
            image_mime: ImageMimeType::Jpeg,
            image_error: None,
            metadata_call_count: Arc::new(Mutex::new(0)),
            image_call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Serve the given bytes and type for every image download.
    pub fn with_image(mut self, bytes: Vec<u8>, mime: ImageMimeType) -> Self {
        self.image_bytes = bytes;
        self.image_mime = mime;
        self
    }

    /// Fail every image download with the given error.
    pub fn with_image_failure(mut self, error: &str) -> Self {
        self.image_error = Some(error.to_string());
        self
    }

    /// Build a metadata response with the given media type and title.
    pub fn response(media_type: &str, title: &str) -> ApodResponse {
        ApodResponse {
            url: format!("https://apod.example/{}.jpg", title),
            title: title.to_string(),
            explanation: format!("About {}", title),
            media_type: media_type.to_string(),
        }
    }

    pub fn metadata_call_count(&self) -> usize {
        *self.metadata_call_count.lock().unwrap()
    }

    pub fn image_call_count(&self) -> usize {
        *self.image_call_count.lock().unwrap()
    }
}

#[async_trait]
impl ApodSource for MockApodSource {
    async fn fetch_by_date(&self, _date: NaiveDate) -> Result<ApodResponse> {
        *self.metadata_call_count.lock().unwrap() += 1;
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ApodError::Upstream("mock response sequence exhausted".to_string()).into())
    }

    async fn fetch_image(&self, _url: &str) -> Result<ImageBlob> {
        *self.image_call_count.lock().unwrap() += 1;
        if let Some(error) = &self.image_error {
            return Err(ApodError::ImageDownload(error.clone()).into());
        }
        Ok(ImageBlob {
            bytes: self.image_bytes.clone(),
            mime: self.image_mime,
        })
    }
}
