//! Data structures for extracted media metadata
//!
//! The shapes below double as the field allow-list for yt-dlp output: any key
//! not declared here is dropped during deserialization.

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_aux::prelude::*;
use serde_json::Value;

/// Normalized result of extracting one source URL
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaRecord {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub display_id: Option<String>,
    #[serde(default)]
    pub display_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub formats: Vec<FormatDescriptor>,
    #[serde(default, deserialize_with = "opt_lenient_f64")]
    pub duration: Option<f64>,
    #[serde(default, deserialize_with = "opt_lenient_u64")]
    pub view_count: Option<u64>,
    #[serde(default, deserialize_with = "opt_lenient_u64")]
    pub like_count: Option<u64>,
}

impl MediaRecord {
    /// Image URL used when the record carries no formats
    pub fn fallback_image(&self) -> Option<&str> {
        non_empty(self.thumbnail.as_deref()).or_else(|| non_empty(self.display_url.as_deref()))
    }
}

/// One encoding of a media item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormatDescriptor {
    #[serde(default, deserialize_with = "deserialize_string_from_number")]
    pub format_id: String,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default, deserialize_with = "opt_lenient_u32")]
    pub height: Option<u32>,
    #[serde(default, deserialize_with = "opt_lenient_f64")]
    pub tbr: Option<f64>, // Total bitrate
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub vcodec: Option<String>,
    #[serde(default)]
    pub acodec: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default, deserialize_with = "opt_lenient_u64")]
    pub filesize_approx: Option<u64>,
}

impl FormatDescriptor {
    /// Direct media URL, if present and non-empty
    pub fn direct_url(&self) -> Option<&str> {
        non_empty(self.url.as_deref())
    }

    /// Whether this descriptor answers to a caller-supplied format id,
    /// either by its identifier or by its file extension
    pub fn matches(&self, requested: &str) -> bool {
        self.format_id == requested || self.ext.as_deref() == Some(requested)
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

// ============================================================
// Lenient field decoding
// ============================================================

/// `deserialize_string_from_number` for optional ids
fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Id(#[serde(deserialize_with = "deserialize_string_from_number")] String);

    Ok(Option::<Id>::deserialize(deserializer)?.map(|Id(id)| id))
}

// serde-aux has no float-to-integer coercion; yt-dlp emits counts as floats
// for some extractors.
fn opt_lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    })
}

fn opt_lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|v| *v >= 0.0).map(|v| v as u64)),
        _ => None,
    })
}

fn opt_lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_lenient_u64(deserializer)?.and_then(|v| u32::try_from(v).ok()))
}
