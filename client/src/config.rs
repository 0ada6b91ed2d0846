use anyhow::{Context, Result};
use serde::Deserialize;
use tokio::fs;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// When set, an empty-text request is sent on startup and the reply is
    /// shown as an opening greeting.
    #[serde(default)]
    pub greeting: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            greeting: false,
        }
    }
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

/// Loads the config file. A missing file yields the defaults; a file that
/// exists but does not parse is an error.
pub async fn load_config(path: &str) -> Result<AppConfig> {
    match fs::read_to_string(path).await {
        Ok(content) => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {path}")),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(e).with_context(|| format!("Failed to read config file {path}")),
    }
}
