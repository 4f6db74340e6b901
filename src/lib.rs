//! mediaresolver library
//!
//! Resolves social-media posts, reels, stories and profile media into
//! metadata and direct media URLs by delegating extraction to yt-dlp.

pub mod extractor;
pub mod selector;
pub mod server;
pub mod utils;

// Re-export main types for easier use
pub use extractor::{Extractor, FormatDescriptor, MediaRecord, YtDlpExtractor};
pub use selector::{select, Selection};
pub use server::{create_router, AppContext};
pub use utils::{ExtractionError, SelectionError, ServerSettings};
