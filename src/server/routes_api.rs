use crate::extractor::models::{FormatDescriptor, MediaRecord};
use crate::selector::select;
use crate::server::error::ApiError;
use crate::server::AppContext;
use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

pub fn api_routes() -> Router<AppContext> {
    Router::new()
        .route("/info", get(media_info))
        .route("/download", get(download_media))
        .route("/health", get(health))
}

#[derive(Deserialize)]
struct InfoQuery {
    url: Option<String>,
}

#[derive(Deserialize)]
struct DownloadQuery {
    url: Option<String>,
    format_id: Option<String>,
}

/// JSON body of `GET /api/info`
#[derive(Debug, Serialize)]
pub struct MediaInfo {
    pub id: Option<String>,
    pub title: Option<String>,
    pub uploader: Option<String>,
    pub thumbnail: Option<String>,
    pub display_id: Option<String>,
    pub display_url: Option<String>,
    pub duration: Option<f64>,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    /// What `/api/download` would redirect to without a format id
    pub url: Option<String>,
    pub formats: Vec<FormatInfo>,
}

#[derive(Debug, Serialize)]
pub struct FormatInfo {
    pub format_id: String,
    pub ext: Option<String>,
    pub resolution: Option<String>,
    pub height: Option<u32>,
    pub tbr: Option<f64>,
    pub vcodec: Option<String>,
    pub acodec: Option<String>,
    pub file_size: Option<u64>,
    pub url: Option<String>,
}

impl From<&FormatDescriptor> for FormatInfo {
    fn from(f: &FormatDescriptor) -> Self {
        Self {
            format_id: f.format_id.clone(),
            ext: f.ext.clone(),
            resolution: f.resolution.clone(),
            height: f.height,
            tbr: f.tbr,
            vcodec: f.vcodec.clone(),
            acodec: f.acodec.clone(),
            file_size: f.filesize_approx,
            url: f.url.clone(),
        }
    }
}

impl From<&MediaRecord> for MediaInfo {
    fn from(record: &MediaRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            uploader: record.uploader.clone(),
            thumbnail: record.thumbnail.clone(),
            display_id: record.display_id.clone(),
            display_url: record.display_url.clone(),
            duration: record.duration,
            view_count: record.view_count,
            like_count: record.like_count,
            url: select(record, None).ok().map(|s| s.url().to_string()),
            formats: record.formats.iter().map(FormatInfo::from).collect(),
        }
    }
}

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
}

fn required_url(url: Option<String>) -> Result<String, ApiError> {
    let url = url.as_deref().map(str::trim).unwrap_or_default();
    if url.is_empty() {
        return Err(ApiError::BadRequest(
            "Query parameter 'url' is required".to_string(),
        ));
    }
    Ok(url.to_string())
}

async fn media_info(
    State(ctx): State<AppContext>,
    Query(params): Query<InfoQuery>,
) -> Result<Json<MediaInfo>, ApiError> {
    let url = required_url(params.url)?;
    let record = ctx.extractor.extract_info(&url).await?;
    Ok(Json(MediaInfo::from(&record)))
}

async fn download_media(
    State(ctx): State<AppContext>,
    Query(params): Query<DownloadQuery>,
) -> Result<Response, ApiError> {
    let url = required_url(params.url)?;
    let record = ctx.extractor.extract_info(&url).await?;
    let selection = select(&record, params.format_id.as_deref())?;

    match selection.format() {
        Some(format) => info!("Redirecting {} to format {}", url, format.format_id),
        None => info!("Redirecting {} to image fallback", url),
    }

    found(selection.url())
}

/// `302 Found` pointing at `target`
fn found(target: &str) -> Result<Response, ApiError> {
    let location = HeaderValue::from_str(target)
        .map_err(|e| ApiError::Internal(format!("Invalid redirect target: {}", e)))?;
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_url() {
        assert!(required_url(None).is_err());
        assert!(required_url(Some("   ".to_string())).is_err());
        assert_eq!(
            required_url(Some(" https://instagram.com/p/x/ ".to_string())).unwrap(),
            "https://instagram.com/p/x/"
        );
    }

    #[test]
    fn test_found_rejects_invalid_header() {
        let err = found("https://cdn/x\n.mp4").unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_media_info_projection() {
        let record = MediaRecord {
            id: Some("abc".to_string()),
            formats: vec![
                FormatDescriptor {
                    format_id: "low".to_string(),
                    height: Some(360),
                    url: Some("https://cdn/low.mp4".to_string()),
                    filesize_approx: Some(1_024),
                    ..Default::default()
                },
                FormatDescriptor {
                    format_id: "high".to_string(),
                    height: Some(1080),
                    url: Some("https://cdn/high.mp4".to_string()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let info = MediaInfo::from(&record);
        assert_eq!(info.url.as_deref(), Some("https://cdn/high.mp4"));
        assert_eq!(info.formats.len(), 2);
        assert_eq!(info.formats[0].file_size, Some(1_024));
    }

    #[test]
    fn test_media_info_without_media() {
        let info = MediaInfo::from(&MediaRecord::default());
        assert!(info.url.is_none());
        assert!(info.formats.is_empty());
    }
}
