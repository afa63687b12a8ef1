//! Error types for Apodcast

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApodcastError>;

#[derive(Error, Debug)]
pub enum ApodcastError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("APOD error: {0}")]
    Apod(#[from] ApodError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),
}

impl ApodcastError {
    /// Exit code reported by `apod-post --strict-exit`
    pub fn exit_code(&self) -> i32 {
        match self {
            ApodcastError::Platform(PlatformError::Authentication(_)) => 2,
            _ => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

#[derive(Error, Debug, Clone)]
pub enum ApodError {
    #[error("Upstream API error: {0}")]
    Upstream(String),

    #[error("Malformed APOD response: {0}")]
    MalformedResponse(String),

    #[error("Image download failed: {0}")]
    ImageDownload(String),

    #[error("No image-type APOD found after {attempts} attempts")]
    NoImageFound { attempts: u32 },

    #[error("Empty date range: start {start} is after end {end}")]
    EmptyDateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
}

#[derive(Error, Debug, Clone)]
pub enum PlatformError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Attachment upload failed: {0}")]
    Upload(String),

    #[error("Posting failed: {0}")]
    Posting(String),

    #[error("Content validation failed: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_authentication_error() {
        let error = ApodcastError::Platform(PlatformError::Authentication(
            "Invalid credentials".to_string(),
        ));
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn test_exit_code_other_platform_errors() {
        let posting = ApodcastError::Platform(PlatformError::Posting("timeout".to_string()));
        let upload = ApodcastError::Platform(PlatformError::Upload("refused".to_string()));
        let network = ApodcastError::Platform(PlatformError::Network("dns".to_string()));
        assert_eq!(posting.exit_code(), 1);
        assert_eq!(upload.exit_code(), 1);
        assert_eq!(network.exit_code(), 1);
    }

    #[test]
    fn test_exit_code_apod_error() {
        let error = ApodcastError::Apod(ApodError::NoImageFound { attempts: 10 });
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_exit_code_config_error() {
        let error = ApodcastError::Config(ConfigError::MissingField("nasa.api_key".to_string()));
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_error_message_formatting_upstream() {
        let error = ApodcastError::Apod(ApodError::Upstream("503 Service Unavailable".to_string()));
        assert_eq!(
            format!("{}", error),
            "APOD error: Upstream API error: 503 Service Unavailable"
        );
    }

    #[test]
    fn test_error_message_formatting_no_image_found() {
        let error = ApodError::NoImageFound { attempts: 7 };
        assert_eq!(
            format!("{}", error),
            "No image-type APOD found after 7 attempts"
        );
    }

    #[test]
    fn test_error_message_formatting_empty_date_range() {
        let error = ApodError::EmptyDateRange {
            start: chrono::NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
            end: chrono::NaiveDate::from_ymd_opt(2024, 5, 5).unwrap(),
        };
        let message = format!("{}", error);
        assert!(message.contains("2024-05-06"));
        assert!(message.contains("2024-05-05"));
    }

    #[test]
    fn test_error_message_formatting_authentication() {
        let error = ApodcastError::Platform(PlatformError::Authentication(
            "Invalid handle".to_string(),
        ));
        assert_eq!(
            format!("{}", error),
            "Platform error: Authentication failed: Invalid handle"
        );
    }

    #[test]
    fn test_error_conversion_from_apod_error() {
        let apod_error = ApodError::MalformedResponse("missing field `url`".to_string());
        let error: ApodcastError = apod_error.into();
        assert!(matches!(error, ApodcastError::Apod(_)));
    }

    #[test]
    fn test_error_conversion_from_platform_error() {
        let platform_error = PlatformError::Upload("connection reset".to_string());
        let error: ApodcastError = platform_error.into();
        assert!(matches!(
            error,
            ApodcastError::Platform(PlatformError::Upload(_))
        ));
    }

    #[test]
    fn test_platform_error_clone() {
        let original = PlatformError::Network("Connection failed".to_string());
        let cloned = original.clone();
        assert_eq!(format!("{}", original), format!("{}", cloned));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_err() -> Result<()> {
            Err(ApodError::Upstream("down".to_string()).into())
        }
        assert!(returns_err().is_err());
    }
}
