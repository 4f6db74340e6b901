//! mediaresolver - HTTP front-end for yt-dlp
//!
//! Serves media metadata as JSON and redirects to the best direct media URL.

use anyhow::Result;
use clap::Parser;
use mediaresolver::extractor::YtDlpExtractor;
use mediaresolver::server;
use mediaresolver::utils::ServerSettings;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "mediaresolver")]
#[command(author, version, about = "Resolve social-media URLs to direct media links")]
struct Args {
    /// Host to bind to
    #[arg(long, env = "MEDIARESOLVER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "8000")]
    port: u16,

    /// Path to the yt-dlp executable (auto-detected when omitted)
    #[arg(long, env = "YTDLP_PATH")]
    ytdlp_path: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl From<Args> for ServerSettings {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            ytdlp_path: args.ytdlp_path,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Respect RUST_LOG if set, otherwise pick defaults from the verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if args.verbose {
            "mediaresolver=debug,tower_http=debug".to_string()
        } else {
            "mediaresolver=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    let settings = ServerSettings::from(args);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let extractor = YtDlpExtractor::new(settings.ytdlp_path.clone());
        check_ytdlp_installed(&extractor).await;
        server::start_server(settings, Arc::new(extractor)).await
    })
}

async fn check_ytdlp_installed(extractor: &YtDlpExtractor) {
    match extractor.version().await {
        Ok(version) => tracing::info!(
            "yt-dlp {} found at: {}",
            version,
            extractor.ytdlp_path().display()
        ),
        Err(e) => {
            // Keep serving; extraction requests will report the problem
            tracing::warn!("yt-dlp is not usable: {}", e);
            tracing::warn!("Install it with `pip install yt-dlp` or set YTDLP_PATH");
        }
    }
}
