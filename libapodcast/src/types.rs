//! Core types for Apodcast

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One APOD record selected for republishing.
///
/// Constructed by the fetcher, consumed once by the publisher, discarded at
/// process exit. Never persisted, so two runs can select the same record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApodRecord {
    /// Location of the remotely hosted image.
    pub image_url: String,
    /// Human-readable caption source.
    pub title: String,
    /// Long-form description, reused verbatim as the image's alt text.
    pub explanation: String,
    /// Calendar date that was requested from the APOD API.
    pub image_date: NaiveDate,
}

/// Supported image MIME types for attachments
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ImageMimeType {
    Jpeg,
    Png,
    Gif,
    WebP,
}

impl ImageMimeType {
    /// Parse from a MIME string (e.g. "image/jpeg"). Parameters after a
    /// semicolon are ignored.
    pub fn from_mime_str(s: &str) -> Option<Self> {
        let essence = s.split(';').next().unwrap_or(s).trim();
        match essence.to_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/gif" => Some(Self::Gif),
            "image/webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// Detect the type from the leading magic bytes of the content.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            Some(Self::Png)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(Self::Gif)
        } else if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
            Some(Self::WebP)
        } else {
            None
        }
    }

    /// Get the MIME type string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::WebP => "image/webp",
        }
    }
}

impl std::fmt::Display for ImageMimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw image bytes downloaded from an APOD image URL, treated as an opaque
/// blob apart from type classification.
#[derive(Debug, Clone)]
pub struct ImageBlob {
    pub bytes: Vec<u8>,
    pub mime: ImageMimeType,
}

impl ImageBlob {
    /// Classify downloaded bytes: magic numbers first, then the declared
    /// Content-Type, then the image/jpeg fallback label.
    pub fn new(bytes: Vec<u8>, content_type: Option<&str>) -> Self {
        let mime = ImageMimeType::sniff(&bytes)
            .or_else(|| content_type.and_then(ImageMimeType::from_mime_str))
            .unwrap_or(ImageMimeType::Jpeg);
        Self { bytes, mime }
    }
}
