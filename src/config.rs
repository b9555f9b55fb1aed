use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

/// Env var that overrides `auth_base` (points the flow at a mock SSO in tests).
pub const AUTH_BASE_ENV: &str = "EVE_SSO_AUTH_BASE";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Application client id registered with the SSO. No secret is used in this flow.
    #[serde(default = "default_client_id")]
    pub client_id: String,
    #[serde(default = "default_auth_base")]
    pub auth_base: String,

    // Defaults for the CLI helpers
    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,
    #[serde(default)]
    pub scopes: Vec<String>,

    /// When set, logs are also written to a daily-rotated file here.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_client_id() -> String { "your_client_id".into() }
fn default_auth_base() -> String { "https://login.eveonline.com".into() }
fn default_redirect_uri() -> String { "http://localhost:8080/callback".into() }

impl Default for Config {
    fn default() -> Self {
        Self {
            client_id: default_client_id(),
            auth_base: default_auth_base(),
            redirect_uri: default_redirect_uri(),
            scopes: Vec::new(),
            log_dir: None,
        }
    }
}

impl Config {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            ..Self::default()
        }
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&s)?;
        Ok(cfg.with_env_overrides())
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(base) = env::var(AUTH_BASE_ENV) {
            if !base.trim().is_empty() {
                self.auth_base = base;
            }
        }
        self
    }

    pub fn authorize_url(&self) -> String {
        format!("{}/v2/oauth/authorize", self.auth_base.trim_end_matches('/'))
    }

    pub fn token_url(&self) -> String {
        format!("{}/v2/oauth/token", self.auth_base.trim_end_matches('/'))
    }
}
