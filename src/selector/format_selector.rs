//! Format selection policy
//!
//! Picks the direct URL to redirect to from an extracted [`MediaRecord`]:
//! - image-only records fall back to their thumbnail or display URL
//! - a caller-supplied id is matched against format id or extension
//! - otherwise the highest (height, bitrate) format with a direct URL wins

use std::cmp::Ordering;

use crate::extractor::models::{FormatDescriptor, MediaRecord};
use crate::utils::error::SelectionError;

/// Outcome of a successful selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection<'a> {
    /// No formats exist; the record's static image is used instead
    ImageFallback(&'a str),
    /// A concrete format was chosen
    Selected {
        url: &'a str,
        format: &'a FormatDescriptor,
    },
}

impl<'a> Selection<'a> {
    /// URL to redirect to
    pub fn url(&self) -> &'a str {
        match self {
            Selection::ImageFallback(url) => *url,
            Selection::Selected { url, .. } => *url,
        }
    }

    /// The chosen format, if this is not an image fallback
    pub fn format(&self) -> Option<&'a FormatDescriptor> {
        match self {
            Selection::ImageFallback(_) => None,
            Selection::Selected { format, .. } => Some(*format),
        }
    }
}

/// Choose the media URL for `record`, honouring `requested_format_id` when
/// one of the formats answers to it. Blank ids count as absent.
pub fn select<'a>(
    record: &'a MediaRecord,
    requested_format_id: Option<&str>,
) -> Result<Selection<'a>, SelectionError> {
    if record.formats.is_empty() {
        return record
            .fallback_image()
            .map(Selection::ImageFallback)
            .ok_or(SelectionError::NoMediaFound);
    }

    let requested = requested_format_id
        .filter(|id| !id.is_empty())
        .and_then(|id| record.formats.iter().find(|f| f.matches(id)));

    let chosen = match requested {
        Some(format) => format,
        None => best_format(&record.formats).ok_or(SelectionError::NoDirectUrlAvailable)?,
    };

    let url = chosen
        .direct_url()
        .ok_or(SelectionError::ChosenFormatHasNoUrl)?;

    Ok(Selection::Selected {
        url,
        format: chosen,
    })
}

/// Highest-ranked format carrying a direct URL; the earliest wins ties
pub fn best_format(formats: &[FormatDescriptor]) -> Option<&FormatDescriptor> {
    formats
        .iter()
        .filter(|f| f.direct_url().is_some())
        .reduce(|best, candidate| {
            if compare_rank(candidate, best) == Ordering::Greater {
                candidate
            } else {
                best
            }
        })
}

/// Order by height, then total bitrate; missing values rank as zero
fn compare_rank(a: &FormatDescriptor, b: &FormatDescriptor) -> Ordering {
    a.height
        .unwrap_or(0)
        .cmp(&b.height.unwrap_or(0))
        .then_with(|| a.tbr.unwrap_or(0.0).total_cmp(&b.tbr.unwrap_or(0.0)))
}
