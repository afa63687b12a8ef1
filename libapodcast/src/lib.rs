//! Apodcast - republish NASA's Astronomy Picture of the Day to Bluesky
//!
//! This library provides the two halves of the batch job: random-date APOD
//! fetching and Bluesky publishing, plus the configuration, error, and
//! logging plumbing shared by the binaries.

pub mod apod;
pub mod config;
pub mod error;
pub mod logging;
pub mod platforms;
pub mod publisher;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{ApodcastError, Result};
pub use types::{ApodRecord, ImageBlob, ImageMimeType};
