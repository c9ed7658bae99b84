//! Service configuration — `giftd.toml`, loaded and validated once at startup.
//!
//! Every credential the service needs is checked here; a missing admin token
//! or notifier credential fails the process before it ever binds a socket,
//! rather than surfacing on the first claim.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Top-level configuration, deserialized from `giftd.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub registry: RegistryConfig,
    #[serde(default)]
    pub server: ServerConfig,
    pub admin: AdminConfig,
    pub notify: NotifyConfig,
}

/// Where the durable store and the seed sheet live.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    /// SQLite database file. Created on first start.
    pub database_path: PathBuf,
    /// CSV export of the gift sheet, read once at startup for sync.
    pub sheet_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Listen address for the HTTP API.
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
}

fn default_bind() -> SocketAddr {
    "127.0.0.1:4310".parse().unwrap()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Shared administrator secret gating unclaim and the claimed-by view.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    pub token: String,
}

/// Transactional-email API settings for claim notifications.
#[derive(Debug, Clone, Deserialize)]
pub struct NotifyConfig {
    /// Endpoint the notification is POSTed to.
    pub api_url: String,
    /// Bearer credential for the email API.
    pub api_key: String,
    /// Sender address.
    pub from: String,
    /// Operator address that receives claim notifications.
    pub to: String,
}

impl Config {
    /// Read and validate the configuration file.
    ///
    /// Returns `Err` for a missing/unreadable file, a TOML parse failure, or
    /// any empty required field.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at '{}'", path.display()))?;

        let config: Config = toml::from_str(&raw)
            .with_context(|| format!("invalid config at '{}'", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.admin.token.trim().is_empty() {
            anyhow::bail!("[admin] token must not be empty");
        }
        for (field, value) in [
            ("api_url", &self.notify.api_url),
            ("api_key", &self.notify.api_key),
            ("from", &self.notify.from),
            ("to", &self.notify.to),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("[notify] {field} must not be empty");
            }
        }
        Ok(())
    }
}
