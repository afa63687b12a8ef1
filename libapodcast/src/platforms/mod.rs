//! Social platform seam
//!
//! One trait carries the three platform interactions the publisher needs:
//! session login, blob upload, and post submission. The Bluesky client is
//! the production implementation; the mock stands in for it in tests.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::ImageMimeType;

pub mod bluesky;

// Mock platform is available for all builds so integration tests can use it
pub mod mock;

/// A social platform that can receive an image post.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Opaque attachment reference returned by the blob upload and consumed
    /// by the post submission.
    type Attachment: Send + Sync;

    /// Establish an authenticated session.
    ///
    /// Must complete before `upload_attachment` or `publish_post`; both
    /// fail with `PlatformError::Authentication` otherwise.
    async fn authenticate(&mut self) -> Result<()>;

    /// Upload raw image bytes as a media blob.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Upload` when the platform rejects the blob,
    /// `PlatformError::Network` when it cannot be reached.
    async fn upload_attachment(
        &self,
        bytes: Vec<u8>,
        mime: ImageMimeType,
    ) -> Result<Self::Attachment>;

    /// Submit a post embedding the attachment, with `alt_text` as the
    /// image's accessibility text. Returns the platform-specific post ID.
    async fn publish_post(
        &self,
        text: &str,
        alt_text: &str,
        attachment: Self::Attachment,
    ) -> Result<String>;

    /// Check content against platform limits before posting.
    fn validate_content(&self, content: &str) -> Result<()>;

    /// Lowercase platform identifier (e.g. "bluesky").
    fn name(&self) -> &str;

    /// Maximum post length, or `None` when the platform has no hard limit.
    fn character_limit(&self) -> Option<usize>;

    /// Whether credentials are present. Authentication may still fail.
    fn is_configured(&self) -> bool;
}
