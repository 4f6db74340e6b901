//! Error handling for mediaresolver

use thiserror::Error;

/// Failure of the external extraction tool.
///
/// Messages coming from yt-dlp are carried verbatim so callers see the
/// tool's own diagnostic.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("yt-dlp not found. Please ensure it is installed and available in the system PATH")]
    ToolNotFound,

    #[error("{0}")]
    Failed(String),

    #[error("yt-dlp returned unreadable output: {0}")]
    InvalidOutput(String),

    #[error("Extraction worker failed: {0}")]
    Worker(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ExtractionError {
    /// True when the failure is caused by the server environment rather than
    /// the requested URL.
    pub fn is_environmental(&self) -> bool {
        matches!(
            self,
            ExtractionError::ToolNotFound | ExtractionError::Worker(_) | ExtractionError::IoError(_)
        )
    }
}

impl From<serde_json::Error> for ExtractionError {
    fn from(e: serde_json::Error) -> Self {
        ExtractionError::InvalidOutput(e.to_string())
    }
}

/// Reasons the format selector could not produce a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("No downloadable media found")]
    NoMediaFound,

    #[error("No downloadable formats with direct URL")]
    NoDirectUrlAvailable,

    #[error("Chosen format has no direct URL")]
    ChosenFormatHasNoUrl,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_message_is_verbatim() {
        let err = ExtractionError::Failed("ERROR: Unsupported URL: https://x".to_string());
        assert_eq!(err.to_string(), "ERROR: Unsupported URL: https://x");
        assert!(!err.is_environmental());
    }

    #[test]
    fn test_environmental_errors() {
        assert!(ExtractionError::ToolNotFound.is_environmental());
        assert!(ExtractionError::Worker("panicked".into()).is_environmental());
        assert!(!ExtractionError::InvalidOutput("eof".into()).is_environmental());
    }

    #[test]
    fn test_json_error_becomes_invalid_output() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ExtractionError = json_err.into();
        assert!(matches!(err, ExtractionError::InvalidOutput(_)));
    }
}
