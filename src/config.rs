//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::amazon::signer::SigningCredentials;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// PA-API access key id
    #[serde(default)]
    pub access_key_id: String,

    /// PA-API secret key
    #[serde(default)]
    pub secret_key: String,

    /// Associate partner tag
    #[serde(default)]
    pub partner_tag: String,

    /// Address the webhook server binds to
    #[serde(default = "default_bind")]
    pub bind: IpAddr,

    /// Port the webhook server listens on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Proxy URL for upstream calls (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Upstream request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Base URL override for the upstream API
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Output format for the lookup command
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_bind() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    4000
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_key_id: String::new(),
            secret_key: String::new(),
            partner_tag: String::new(),
            bind: default_bind(),
            port: default_port(),
            proxy: None,
            timeout_secs: default_timeout_secs(),
            endpoint: None,
            format: OutputFormat::Table,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("access_key_id", &self.access_key_id)
            .field("secret_key", &"<redacted>")
            .field("partner_tag", &self.partner_tag)
            .field("bind", &self.bind)
            .field("port", &self.port)
            .field("proxy", &self.proxy)
            .field("timeout_secs", &self.timeout_secs)
            .field("endpoint", &self.endpoint)
            .field("format", &self.format)
            .finish()
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("paapi-relay").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(key) = std::env::var("ACCESS_KEY_ID") {
            self.access_key_id = key;
        }

        if let Ok(secret) = std::env::var("SECRET_ACCESS_KEY") {
            self.secret_key = secret;
        }

        if let Ok(tag) = std::env::var("PARTNER_TAG") {
            self.partner_tag = tag;
        }

        if let Ok(port) = std::env::var("PORT") {
            if let Ok(p) = port.parse() {
                self.port = p;
            }
        }

        if let Ok(proxy) = std::env::var("PAAPI_PROXY") {
            self.proxy = Some(proxy);
        }

        self
    }

    /// Checks that everything needed to sign and tag requests is present.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("ACCESS_KEY_ID", &self.access_key_id),
            ("SECRET_ACCESS_KEY", &self.secret_key),
            ("PARTNER_TAG", &self.partner_tag),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            anyhow::bail!("Missing required configuration: {}", missing.join(", "));
        }

        Ok(())
    }

    /// Returns the signing credentials.
    pub fn credentials(&self) -> SigningCredentials {
        SigningCredentials::new(&self.access_key_id, &self.secret_key, &self.partner_tag)
    }

    /// Returns the socket address the server listens on.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    /// Returns the upstream request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Output format for lookup results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
