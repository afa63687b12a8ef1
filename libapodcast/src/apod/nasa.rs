//! NASA APOD API client

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;

use crate::config::NasaConfig;
use crate::error::{ApodError, Result};
use crate::types::ImageBlob;

use super::{ApodResponse, ApodSource};

const APOD_URL: &str = "https://api.nasa.gov/planetary/apod";
const USER_AGENT: &str = concat!("apodcast/", env!("CARGO_PKG_VERSION"));

pub struct NasaApodClient {
    client: Client,
    api_key: String,
}

impl NasaApodClient {
    pub fn new(config: &NasaConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApodError::Upstream(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl ApodSource for NasaApodClient {
    async fn fetch_by_date(&self, date: NaiveDate) -> Result<ApodResponse> {
        debug!("Fetching APOD for {}", date);

        let date_param = date.to_string();
        let response = self
            .client
            .get(APOD_URL)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("date", date_param.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ApodError::Upstream(format!("APOD request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| ApodError::Upstream(format!("APOD request rejected: {}", e)))?;

        response
            .json::<ApodResponse>()
            .await
            .map_err(|e| ApodError::MalformedResponse(e.to_string()).into())
    }

    async fn fetch_image(&self, url: &str) -> Result<ImageBlob> {
        debug!("Downloading APOD image from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApodError::ImageDownload(format!("image request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| ApodError::ImageDownload(format!("image request rejected: {}", e)))?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApodError::ImageDownload(format!("image body read failed: {}", e)))?;

        Ok(ImageBlob::new(bytes.to_vec(), content_type.as_deref()))
    }
}
