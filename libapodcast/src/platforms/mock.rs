//! Mock platform implementation for testing
//!
//! Configurable success or failure at each publishing step, with call
//! counters and captured uploads/posts for assertions. Available in all
//! builds so integration tests can use it without platform credentials or
//! network access.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::error::{PlatformError, Result};
use crate::platforms::Platform;
use crate::types::ImageMimeType;

/// A post captured by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedPost {
    pub text: String,
    pub alt_text: String,
    pub attachment: String,
}

/// Configuration for mock platform behavior
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Platform name (e.g. "mock-bluesky")
    pub name: String,

    /// Whether authentication should succeed
    pub auth_succeeds: bool,

    /// Whether blob upload should succeed
    pub upload_succeeds: bool,

    /// Whether post submission should succeed
    pub post_succeeds: bool,

    /// Error to return on authentication failure
    pub auth_error: Option<String>,

    /// Error to return on upload failure
    pub upload_error: Option<String>,

    /// Error to return on posting failure
    pub post_error: Option<String>,

    /// Character limit for validation
    pub character_limit: Option<usize>,

    /// Whether the platform reports itself as configured
    pub is_configured: bool,

    /// Number of times authenticate has been called
    pub auth_call_count: Arc<Mutex<usize>>,

    /// Number of times upload_attachment has been called
    pub upload_call_count: Arc<Mutex<usize>>,

    /// Number of times publish_post has been called
    pub post_call_count: Arc<Mutex<usize>>,

    /// Uploaded blobs as (byte length, mime type), for verification
    pub uploaded: Arc<Mutex<Vec<(usize, ImageMimeType)>>>,

    /// Posts that have been submitted, for verification
    pub published: Arc<Mutex<Vec<PublishedPost>>>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            name: "mock".to_string(),
            auth_succeeds: true,
            upload_succeeds: true,
            post_succeeds: true,
            auth_error: None,
            upload_error: None,
            post_error: None,
            character_limit: None,
            is_configured: true,
            auth_call_count: Arc::new(Mutex::new(0)),
            upload_call_count: Arc::new(Mutex::new(0)),
            post_call_count: Arc::new(Mutex::new(0)),
            uploaded: Arc::new(Mutex::new(Vec::new())),
            published: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Mock platform for testing
pub struct MockPlatform {
    config: MockConfig,
    authenticated: bool,
}

impl MockPlatform {
    pub fn new(config: MockConfig) -> Self {
        Self {
            config,
            authenticated: false,
        }
    }

    /// Create a mock platform where every step succeeds
    pub fn success(name: &str) -> Self {
        Self::new(MockConfig {
            name: name.to_string(),
            ..Default::default()
        })
    }

    /// Create a mock platform that fails authentication
    pub fn auth_failure(name: &str, error: &str) -> Self {
        Self::new(MockConfig {
            name: name.to_string(),
            auth_succeeds: false,
            auth_error: Some(error.to_string()),
            ..Default::default()
        })
    }

    /// Create a mock platform that fails blob upload
    pub fn upload_failure(name: &str, error: &str) -> Self {
        Self::new(MockConfig {
            name: name.to_string(),
            upload_succeeds: false,
            upload_error: Some(error.to_string()),
            ..Default::default()
        })
    }

    /// Create a mock platform that fails post submission
    pub fn post_failure(name: &str, error: &str) -> Self {
        Self::new(MockConfig {
            name: name.to_string(),
            post_succeeds: false,
            post_error: Some(error.to_string()),
            ..Default::default()
        })
    }

    /// Create a mock platform with a character limit
    pub fn with_limit(name: &str, limit: usize) -> Self {
        Self::new(MockConfig {
            name: name.to_string(),
            character_limit: Some(limit),
            ..Default::default()
        })
    }

    /// Create a mock platform that is not configured
    pub fn not_configured(name: &str) -> Self {
        Self::new(MockConfig {
            name: name.to_string(),
            is_configured: false,
            ..Default::default()
        })
    }

    pub fn auth_call_count(&self) -> usize {
        *self.config.auth_call_count.lock().unwrap()
    }

    pub fn upload_call_count(&self) -> usize {
        *self.config.upload_call_count.lock().unwrap()
    }

    pub fn post_call_count(&self) -> usize {
        *self.config.post_call_count.lock().unwrap()
    }

    /// Get all uploaded blobs as (byte length, mime type)
    pub fn uploaded(&self) -> Vec<(usize, ImageMimeType)> {
        self.config.uploaded.lock().unwrap().clone()
    }

    /// Get all posts that were submitted
    pub fn published(&self) -> Vec<PublishedPost> {
        self.config.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl Platform for MockPlatform {
    type Attachment = String;

    async fn authenticate(&mut self) -> Result<()> {
        *self.config.auth_call_count.lock().unwrap() += 1;

        if self.config.auth_succeeds {
            self.authenticated = true;
            Ok(())
        } else {
            let error = self
                .config
                .auth_error
                .clone()
                .unwrap_or_else(|| "Mock authentication failed".to_string());
            Err(PlatformError::Authentication(error).into())
        }
    }

    async fn upload_attachment(&self, bytes: Vec<u8>, mime: ImageMimeType) -> Result<String> {
        *self.config.upload_call_count.lock().unwrap() += 1;

        if !self.authenticated {
            return Err(PlatformError::Authentication("Not authenticated".to_string()).into());
        }

        if self.config.upload_succeeds {
            let mut uploaded = self.config.uploaded.lock().unwrap();
            uploaded.push((bytes.len(), mime));
            Ok(format!("{}:blob-{}", self.config.name, uploaded.len()))
        } else {
            let error = self
                .config
                .upload_error
                .clone()
                .unwrap_or_else(|| "Mock upload failed".to_string());
            Err(PlatformError::Upload(error).into())
        }
    }

    async fn publish_post(
        &self,
        text: &str,
        alt_text: &str,
        attachment: String,
    ) -> Result<String> {
        *self.config.post_call_count.lock().unwrap() += 1;

        if !self.authenticated {
            return Err(PlatformError::Authentication("Not authenticated".to_string()).into());
        }

        if self.config.post_succeeds {
            let mut published = self.config.published.lock().unwrap();
            published.push(PublishedPost {
                text: text.to_string(),
                alt_text: alt_text.to_string(),
                attachment,
            });
            Ok(format!("{}:post-{}", self.config.name, published.len()))
        } else {
            let error = self
                .config
                .post_error
                .clone()
                .unwrap_or_else(|| "Mock posting failed".to_string());
            Err(PlatformError::Posting(error).into())
        }
    }

    fn validate_content(&self, content: &str) -> Result<()> {
        if content.is_empty() {
            return Err(PlatformError::Validation("Content cannot be empty".to_string()).into());
        }

        if let Some(limit) = self.config.character_limit {
            if content.len() > limit {
                return Err(PlatformError::Validation(format!(
                    "Content exceeds {} character limit (got {} characters)",
                    limit,
                    content.len()
                ))
                .into());
            }
        }

        Ok(())
    }

    fn name(&self) -> &str {
        &self.config.name
    }

    fn character_limit(&self) -> Option<usize> {
        self.config.character_limit
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured
    }
}
