use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
type Result<T> = anyhow::Result<T>;

/// Settings file looked up in the working directory when `MERCADO_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "mercado.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

impl AppConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("failed to deserialize server config")
    }

    /// Loads `MERCADO_CONFIG`, else `mercado.toml` if present, else defaults,
    /// then applies environment overrides.
    pub fn load() -> Result<Self> {
        let config = match std::env::var("MERCADO_CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            Err(_) => Self::default(),
        };
        config.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(url) = lookup("DATABASE_URL") {
            self.store.database_url = Some(url);
        }
        if let Some(token) = lookup("DATABASE_AUTH_TOKEN") {
            self.store.auth_token = Some(token);
        }
        if let Some(host) = lookup("MERCADO_HOST") {
            self.http.host = host;
        }
        if let Some(port) = lookup("MERCADO_PORT") {
            self.http.port = port
                .parse()
                .with_context(|| format!("MERCADO_PORT is not a valid port: {port}"))?;
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Empty means any origin is allowed.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl HttpConfig {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    pub database_url: Option<String>,
    pub auth_token: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Firebase,
    Memory,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}
