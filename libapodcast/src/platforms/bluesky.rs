//! Bluesky platform implementation

use async_trait::async_trait;
use bsky_sdk::api::app::bsky::embed::images::{ImageData, MainData};
use bsky_sdk::api::app::bsky::feed::post::{RecordData, RecordEmbedRefs};
use bsky_sdk::api::types::string::Datetime;
use bsky_sdk::api::types::{BlobRef, Union};
use bsky_sdk::rich_text::RichText;
use bsky_sdk::BskyAgent;

use crate::config::BlueskyConfig;
use crate::error::{PlatformError, Result};
use crate::platforms::Platform;
use crate::types::ImageMimeType;

/// Map bsky-sdk / AT Protocol errors onto [`PlatformError`], keyed off the
/// status codes and error names embedded in the error text.
///
/// # Arguments
///
/// * `error` - The error from bsky-sdk (generic over error types)
/// * `context` - The operation that failed (e.g. "authentication", "upload")
fn map_bluesky_error<E: std::fmt::Display + std::fmt::Debug>(
    error: E,
    context: &str,
) -> PlatformError {
    let error_msg = format!("{}", error);
    let debug_msg = format!("{:?}", error);

    // Authentication errors (401, 403, or session-related error codes)
    if error_msg.contains("401")
        || error_msg.contains("403")
        || error_msg.contains("AuthenticationRequired")
        || error_msg.contains("InvalidToken")
        || error_msg.contains("ExpiredToken")
        || debug_msg.contains("Unauthorized")
        || debug_msg.contains("Forbidden")
    {
        return PlatformError::Authentication(format!(
            "Bluesky authentication failed during {}: {}",
            context, error_msg
        ));
    }

    // Invalid credentials during login
    if error_msg.contains("InvalidCredentials")
        || error_msg.contains("AccountNotFound")
        || (context == "authentication" && error_msg.contains("invalid"))
    {
        return PlatformError::Authentication(format!(
            "Invalid Bluesky credentials: {}. Check your handle and app password.",
            error_msg
        ));
    }

    // Validation errors (400 status or schema rejections)
    if error_msg.contains("400")
        || error_msg.contains("InvalidRequest")
        || error_msg.contains("InvalidRecord")
        || debug_msg.contains("BadRequest")
    {
        return PlatformError::Validation(format!(
            "Bluesky rejected the request during {}: {}",
            context, error_msg
        ));
    }

    // Rate limiting (429 status)
    if error_msg.contains("429")
        || error_msg.contains("RateLimitExceeded")
        || error_msg.contains("TooManyRequests")
        || debug_msg.contains("RateLimit")
    {
        return PlatformError::RateLimit(format!(
            "Bluesky rate limit hit during {}: {}",
            context, error_msg
        ));
    }

    // Network errors (PDS unreachable, timeouts, connection failures)
    if error_msg.contains("connection")
        || error_msg.contains("network")
        || error_msg.contains("timeout")
        || error_msg.contains("unreachable")
        || error_msg.contains("dns")
        || debug_msg.contains("Connect")
        || debug_msg.contains("Timeout")
    {
        return PlatformError::Network(format!(
            "Network error reaching Bluesky during {}: {}",
            context, error_msg
        ));
    }

    // Everything else maps by operation, preserving AT Protocol error codes
    // in the message.
    match context {
        "upload" => PlatformError::Upload(format!("Bluesky upload failed: {}", error_msg)),
        _ => PlatformError::Posting(format!(
            "Bluesky operation failed during {}: {}",
            context, error_msg
        )),
    }
}

pub struct BlueskyClient {
    agent: BskyAgent,
    identifier: String,
    app_password: String,
    authenticated: bool,
}

impl BlueskyClient {
    /// Create a client against the default bsky.social service.
    pub async fn new(config: &BlueskyConfig) -> Result<Self> {
        let agent = BskyAgent::builder()
            .build()
            .await
            .map_err(|e| PlatformError::Authentication(format!("Failed to create agent: {}", e)))?;

        Ok(Self {
            agent,
            identifier: config.identifier.clone(),
            app_password: config.app_password.clone(),
            authenticated: false,
        })
    }
}

#[async_trait]
impl Platform for BlueskyClient {
    type Attachment = BlobRef;

    async fn authenticate(&mut self) -> Result<()> {
        tracing::debug!("Creating Bluesky session for {}", self.identifier);

        self.agent
            .login(&self.identifier, &self.app_password)
            .await
            .map_err(|e| map_bluesky_error(e, "authentication"))?;

        self.authenticated = true;
        tracing::debug!("Bluesky session created");

        Ok(())
    }

    async fn upload_attachment(&self, bytes: Vec<u8>, mime: ImageMimeType) -> Result<BlobRef> {
        if !self.authenticated {
            return Err(PlatformError::Authentication("Not authenticated".to_string()).into());
        }

        tracing::debug!("Uploading {} bytes ({}) to Bluesky", bytes.len(), mime);

        let output = self
            .agent
            .api
            .com
            .atproto
            .repo
            .upload_blob(bytes)
            .await
            .map_err(|e| map_bluesky_error(e, "upload"))?;

        Ok(output.data.blob)
    }

    async fn publish_post(
        &self,
        text: &str,
        alt_text: &str,
        attachment: BlobRef,
    ) -> Result<String> {
        if !self.authenticated {
            return Err(PlatformError::Authentication("Not authenticated".to_string()).into());
        }

        // Facet detection runs against the live facet grammar, right before
        // submission.
        let rich_text = RichText::new_with_detect_facets(text)
            .await
            .map_err(|e| map_bluesky_error(e, "facet detection"))?;

        let image = ImageData {
            alt: alt_text.to_string(),
            aspect_ratio: None,
            image: attachment,
        }
        .into();
        let embed = Union::Refs(RecordEmbedRefs::AppBskyEmbedImagesMain(Box::new(
            MainData {
                images: vec![image],
            }
            .into(),
        )));

        let record = RecordData {
            created_at: Datetime::now(),
            embed: Some(embed),
            entities: None,
            facets: rich_text.facets,
            labels: None,
            langs: None,
            reply: None,
            tags: None,
            text: rich_text.text,
        };

        let response = self
            .agent
            .create_record(record)
            .await
            .map_err(|e| map_bluesky_error(e, "posting"))?;

        let at_uri = response.uri.to_string();
        tracing::debug!("Posted to Bluesky: {}", at_uri);

        Ok(at_uri)
    }

    fn validate_content(&self, content: &str) -> Result<()> {
        if content.is_empty() {
            return Err(PlatformError::Validation("Content cannot be empty".to_string()).into());
        }

        // Bluesky has a 300 character limit
        if content.len() > 300 {
            return Err(PlatformError::Validation(format!(
                "Content exceeds Bluesky's 300 character limit (current: {} characters)",
                content.len()
            ))
            .into());
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "bluesky"
    }

    fn character_limit(&self) -> Option<usize> {
        Some(300)
    }

    fn is_configured(&self) -> bool {
        !self.identifier.is_empty() && !self.app_password.is_empty()
    }
}
