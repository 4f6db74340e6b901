//! yt-dlp wrapper for media extraction
//!
//! This module resolves source URLs into [`MediaRecord`]s by running the
//! yt-dlp executable. Each call runs on tokio's blocking pool so a slow
//! extraction never stalls other requests.

use crate::extractor::models::MediaRecord;
use crate::extractor::traits::Extractor;
use crate::utils::error::ExtractionError;
use async_trait::async_trait;
use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tokio::process::Command as AsyncCommand;
use tracing::{debug, error, info, warn};

const YTDLP_PROGRAM: &str = "yt-dlp";

/// Fixed options for every extraction: metadata only, no progress or warnings
/// on the output streams, and no user config files.
const EXTRACT_ARGS: &[&str] = &[
    "--dump-single-json",
    "--skip-download",
    "--quiet",
    "--no-progress",
    "--no-warnings",
    "--ignore-config",
];

/// Media extractor backed by the yt-dlp executable
#[derive(Debug, Clone)]
pub struct YtDlpExtractor {
    ytdlp_path: PathBuf,
}

impl YtDlpExtractor {
    /// Initialize the extractor
    ///
    /// Search order when no path is configured:
    /// 1. Next to the current executable
    /// 2. System PATH
    /// 3. Common installation paths (Homebrew, pip user installs, etc.)
    ///
    /// If yt-dlp cannot be found the bare program name is kept, so requests
    /// fail with [`ExtractionError::ToolNotFound`] while the server stays up.
    pub fn new(configured: Option<PathBuf>) -> Self {
        let ytdlp_path = match configured {
            Some(path) => {
                info!("Using configured yt-dlp: {}", path.display());
                path
            }
            None => find_ytdlp().unwrap_or_else(|| PathBuf::from(YTDLP_PROGRAM)),
        };

        Self { ytdlp_path }
    }

    /// Use an explicit yt-dlp executable without searching
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            ytdlp_path: path.into(),
        }
    }

    /// Get the path to yt-dlp being used
    pub fn ytdlp_path(&self) -> &Path {
        &self.ytdlp_path
    }

    /// Report the installed yt-dlp version
    pub async fn version(&self) -> Result<String, ExtractionError> {
        let output = AsyncCommand::new(&self.ytdlp_path)
            .arg("--version")
            .output()
            .await
            .map_err(spawn_error)?;

        if !output.status.success() {
            return Err(failure_message(&output));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Default for YtDlpExtractor {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl Extractor for YtDlpExtractor {
    fn id(&self) -> &'static str {
        "ytdlp"
    }

    async fn extract_info(&self, url: &str) -> Result<MediaRecord, ExtractionError> {
        debug!("Extracting media info for URL: {}", url);

        let program = self.ytdlp_path.clone();
        let url = url.to_string();

        // A dropped request does not abort the blocking task; its result is discarded.
        tokio::task::spawn_blocking(move || run_extraction(&program, &url))
            .await
            .map_err(|e| ExtractionError::Worker(e.to_string()))?
    }
}

/// Run yt-dlp synchronously and decode its JSON dump
fn run_extraction(program: &Path, url: &str) -> Result<MediaRecord, ExtractionError> {
    let output = Command::new(program)
        .args(EXTRACT_ARGS)
        .arg("--")
        .arg(url)
        .stdin(Stdio::null())
        .output()
        .map_err(spawn_error)?;

    if !output.status.success() {
        let err = failure_message(&output);
        error!("yt-dlp extraction failed: {}", err);
        return Err(err);
    }

    parse_media_record(&output.stdout)
}

/// Decode yt-dlp's `--dump-single-json` output, keeping only allow-listed fields
pub fn parse_media_record(stdout: &[u8]) -> Result<MediaRecord, ExtractionError> {
    let value: Value = serde_json::from_slice(stdout)?;
    if !value.is_object() {
        return Err(ExtractionError::InvalidOutput(
            "expected a JSON object".to_string(),
        ));
    }
    Ok(serde_json::from_value(value)?)
}

fn spawn_error(e: io::Error) -> ExtractionError {
    if e.kind() == io::ErrorKind::NotFound {
        error!("yt-dlp executable could not be started: {}", e);
        ExtractionError::ToolNotFound
    } else {
        ExtractionError::IoError(e)
    }
}

fn failure_message(output: &std::process::Output) -> ExtractionError {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.is_empty() {
        ExtractionError::Failed(format!("yt-dlp exited with {}", output.status))
    } else {
        ExtractionError::Failed(stderr)
    }
}

// ============================================================
// yt-dlp Detection Functions
// ============================================================

/// Find yt-dlp binary with priority:
/// 1. Next to the executable
/// 2. System PATH
/// 3. Common installation paths
pub fn find_ytdlp() -> Option<PathBuf> {
    if let Some(local) = find_next_to_executable() {
        info!("✓ Using yt-dlp next to executable: {:?}", local);
        return Some(local);
    }

    if let Some(system) = find_in_path() {
        info!("✓ Using system yt-dlp: {:?}", system);
        return Some(system);
    }

    if let Some(common) = find_in_common_paths() {
        info!("✓ Using yt-dlp from common path: {:?}", common);
        return Some(common);
    }

    warn!("✗ yt-dlp not found anywhere!");
    None
}

/// Container images usually ship yt-dlp alongside the server binary
fn find_next_to_executable() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let exe_dir = exe_path.parent()?;
    let candidate = exe_dir.join(YTDLP_PROGRAM);

    if candidate.is_file() && is_executable(&candidate) {
        return Some(candidate);
    }

    None
}

/// Find yt-dlp in system PATH using `which`
fn find_in_path() -> Option<PathBuf> {
    which::which(YTDLP_PROGRAM).ok().filter(|p| p.exists())
}

/// Find yt-dlp in common installation paths
fn find_in_common_paths() -> Option<PathBuf> {
    let common_paths = [
        // Homebrew (Apple Silicon)
        "/opt/homebrew/bin/yt-dlp",
        // Homebrew (Intel) / manual installs
        "/usr/local/bin/yt-dlp",
        // System packages
        "/usr/bin/yt-dlp",
        // pip user install
        "~/.local/bin/yt-dlp",
    ];

    common_paths
        .iter()
        .map(|p| expand_home(p))
        .find(|p| p.exists() && is_executable(p))
}

fn expand_home(path_str: &str) -> PathBuf {
    match path_str.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path_str)),
        None => PathBuf::from(path_str),
    }
}

/// Check if a file is executable
fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        std::fs::metadata(path)
            .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    {
        // On Windows, just check if file exists
        path.is_file()
    }
}

// ============================================================
// Tests
// ============================================================
