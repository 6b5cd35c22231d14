//! Application error taxonomy and process exit codes.

use thiserror::Error;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_FILE_NOT_FOUND: i32 = 2;
pub const EXIT_UNSUPPORTED_FILE_TYPE: i32 = 3;
pub const EXIT_FILE_TOO_LARGE: i32 = 4;
pub const EXIT_API_ERROR: i32 = 5;
pub const EXIT_CONFIGURATION_ERROR: i32 = 6;
pub const EXIT_INTERRUPTED: i32 = 130;

/// Every failure the assistant knows how to explain to the user.
///
/// Errors outside this enum are treated as unexpected: they are logged in full
/// and only their top-level message is shown.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    MissingApiKey(String),

    #[error("Unsupported file type: {extension}. Supported types: {supported}")]
    UnsupportedFileType { extension: String, supported: String },

    #[error("File size ({size_mb:.2}MB) exceeds maximum allowed size of {limit_mb}MB")]
    FileSizeExceeded { size_mb: f64, limit_mb: f64 },

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("{0}")]
    Api(String),

    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    UnsupportedProvider(String),
}

impl AppError {
    pub fn api(message: impl Into<String>) -> Self {
        AppError::Api(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            AppError::MissingApiKey(_) => "Missing API Key",
            AppError::UnsupportedFileType { .. } => "Unsupported File Type",
            AppError::FileSizeExceeded { .. } => "File Size Exceeded",
            AppError::FileNotFound(_) => "File Not Found",
            AppError::Api(_) => "API Error",
            AppError::Configuration(_) => "Configuration Error",
            AppError::UnsupportedProvider(_) => "Unsupported Provider",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::FileNotFound(_) => EXIT_FILE_NOT_FOUND,
            AppError::UnsupportedFileType { .. } => EXIT_UNSUPPORTED_FILE_TYPE,
            AppError::FileSizeExceeded { .. } => EXIT_FILE_TOO_LARGE,
            AppError::Api(_) => EXIT_API_ERROR,
            AppError::Configuration(_) => EXIT_CONFIGURATION_ERROR,
            AppError::MissingApiKey(_) | AppError::UnsupportedProvider(_) => EXIT_FAILURE,
        }
    }
}

/// Map any pipeline failure to the exit code the process should return.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<AppError>()
        .map(AppError::exit_code)
        .unwrap_or(EXIT_FAILURE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, anyhow};

    #[test]
    fn exit_codes_follow_error_kind() {
        assert_eq!(AppError::FileNotFound("a".into()).exit_code(), 2);
        assert_eq!(
            AppError::UnsupportedFileType {
                extension: ".xyz".into(),
                supported: ".txt".into()
            }
            .exit_code(),
            3
        );
        assert_eq!(
            AppError::FileSizeExceeded {
                size_mb: 12.0,
                limit_mb: 10.0
            }
            .exit_code(),
            4
        );
        assert_eq!(AppError::api("boom").exit_code(), 5);
        assert_eq!(AppError::configuration("bad").exit_code(), 6);
        assert_eq!(AppError::MissingApiKey("no key".into()).exit_code(), 1);
        assert_eq!(AppError::UnsupportedProvider("gemini".into()).exit_code(), 1);
    }

    #[test]
    fn size_message_reports_two_decimals_and_limit() {
        let err = AppError::FileSizeExceeded {
            size_mb: 12.3456,
            limit_mb: 10.0,
        };
        assert_eq!(
            err.to_string(),
            "File size (12.35MB) exceeds maximum allowed size of 10MB"
        );
    }

    #[test]
    fn exit_code_for_sees_through_context() {
        let err = anyhow::Error::new(AppError::api("rate limited")).context("provider call");
        assert_eq!(exit_code_for(&err), EXIT_API_ERROR);

        let unexpected: anyhow::Result<()> = Err(anyhow!("disk on fire")).context("reading");
        assert_eq!(exit_code_for(&unexpected.unwrap_err()), EXIT_FAILURE);
    }
}
