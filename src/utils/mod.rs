//! Utility modules for error handling and configuration

pub mod config;
pub mod error;

// Re-export for convenience
pub use config::ServerSettings;
pub use error::{ExtractionError, SelectionError};
