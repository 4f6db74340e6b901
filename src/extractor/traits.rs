use crate::extractor::models::MediaRecord;
use crate::utils::error::ExtractionError;
use async_trait::async_trait;

/// Core trait for media metadata extractors
///
/// This trait isolates the HTTP layer from the specific extraction method
/// (yt-dlp subprocess, a test stub, etc.).
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Returns a unique identifier for this extractor (e.g., "ytdlp")
    fn id(&self) -> &'static str;

    /// Resolves a source URL into a normalized media record.
    ///
    /// Implementations must not block the async runtime while the underlying
    /// tool runs.
    async fn extract_info(&self, url: &str) -> Result<MediaRecord, ExtractionError>;
}
