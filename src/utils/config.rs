//! Server configuration

use anyhow::Context;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Server settings
#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// Interface to bind to: an IP literal or a resolvable host name
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Explicit yt-dlp executable; auto-detected when unset
    pub ytdlp_path: Option<PathBuf>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            ytdlp_path: None,
        }
    }
}

impl ServerSettings {
    /// Socket address the server binds to
    ///
    /// Host names such as `localhost` are resolved and the first address
    /// wins. IPv6 literals need brackets (`[::1]`).
    pub async fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let target = format!("{}:{}", self.host, self.port);
        let addr = tokio::net::lookup_host(&target)
            .await
            .with_context(|| format!("Invalid server address {}", target))?
            .next()
            .with_context(|| format!("{} did not resolve to any address", target));
        addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_config() {
        let settings = ServerSettings::default();
        assert_eq!(settings.port, 8000);
        assert!(settings.ytdlp_path.is_none());
        assert_eq!(settings.bind_addr().await.unwrap().to_string(), "0.0.0.0:8000");
    }

    #[tokio::test]
    async fn test_invalid_host_is_rejected() {
        let settings = ServerSettings {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert!(settings.bind_addr().await.is_err());
    }

    #[tokio::test]
    async fn test_ipv6_host() {
        let settings = ServerSettings {
            host: "[::1]".to_string(),
            port: 9000,
            ytdlp_path: None,
        };
        let addr = settings.bind_addr().await.unwrap();
        assert!(addr.is_ipv6());
        assert_eq!(addr.port(), 9000);
    }

    #[tokio::test]
    async fn test_host_name_is_resolved() {
        let settings = ServerSettings {
            host: "localhost".to_string(),
            port: 8123,
            ytdlp_path: None,
        };
        let addr = settings.bind_addr().await.unwrap();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 8123);
    }
}
