//! Client configuration.
//!
//! Configuration is stored in `.agora/config.yaml` and includes:
//! - The API base URL
//! - The access token used as a bearer credential
//! - Page sizes and the scroll threshold used by list views
//! - The community selected by default

use std::env;
use std::fs;
use std::path::PathBuf;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AgoraError, Result};

pub const CONFIG_DIR: &str = ".agora";
pub const DEFAULT_API_URL: &str = "https://api.agora.example/v1";

/// Page size used by content lists (polls, chats, feeds, folders).
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Page size used by lookup pickers (tags, communities).
pub const DEFAULT_LOOKUP_PAGE_SIZE: u32 = 50;
/// Distance from the bottom, in pixels, at which feeds load the next page.
pub const DEFAULT_SCROLL_THRESHOLD_PX: u32 = 1000;

/// Keys accepted by `agora config set`.
pub const CONFIG_KEYS: &[&str] = &[
    "api_url",
    "auth.access_token",
    "paging.page_size",
    "paging.lookup_page_size",
    "paging.scroll_threshold_px",
    "selected_community",
];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the REST API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Authentication
    #[serde(default)]
    pub auth: AuthConfig,

    /// List paging behaviour
    #[serde(default)]
    pub paging: PagingConfig,

    /// Community used when a command does not name one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_community: Option<String>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            auth: AuthConfig::default(),
            paging: PagingConfig::default(),
            selected_community: None,
        }
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagingConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_lookup_page_size")]
    pub lookup_page_size: u32,
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold_px: u32,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_lookup_page_size() -> u32 {
    DEFAULT_LOOKUP_PAGE_SIZE
}

fn default_scroll_threshold() -> u32 {
    DEFAULT_SCROLL_THRESHOLD_PX
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            lookup_page_size: DEFAULT_LOOKUP_PAGE_SIZE,
            scroll_threshold_px: DEFAULT_SCROLL_THRESHOLD_PX,
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        PathBuf::from(CONFIG_DIR).join("config.yaml")
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        Url::parse(&self.api_url)?;
        if self.paging.page_size == 0 || self.paging.lookup_page_size == 0 {
            return Err(AgoraError::Config(
                "page sizes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// API base URL, preferring `AGORA_API_URL` over the config file
    pub fn api_url(&self) -> Result<Url> {
        if let Ok(url) = env::var("AGORA_API_URL")
            && !url.is_empty()
        {
            return Ok(Url::parse(&url)?);
        }
        Ok(Url::parse(&self.api_url)?)
    }

    /// Access token from environment variable or config
    pub fn access_token(&self) -> Option<SecretString> {
        if let Ok(token) = env::var("AGORA_ACCESS_TOKEN")
            && !token.is_empty()
        {
            return Some(SecretString::from(token));
        }

        self.auth
            .access_token
            .as_ref()
            .filter(|t| !t.is_empty())
            .map(|t| SecretString::from(t.clone()))
    }

    /// Set a config value by dotted key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api_url" => {
                Url::parse(value)?;
                self.api_url = value.to_string();
            }
            "auth.access_token" => {
                self.auth.access_token = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            "paging.page_size" => self.paging.page_size = parse_positive(key, value)?,
            "paging.lookup_page_size" => {
                self.paging.lookup_page_size = parse_positive(key, value)?
            }
            "paging.scroll_threshold_px" => {
                self.paging.scroll_threshold_px = value.parse().map_err(|_| {
                    AgoraError::Config(format!("{key} expects a number, got '{value}'"))
                })?
            }
            "selected_community" => {
                self.selected_community = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            _ => {
                return Err(AgoraError::Config(format!(
                    "unknown config key '{}', expected one of: {}",
                    key,
                    CONFIG_KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }

    /// Human-readable listing with the token masked
    pub fn display_lines(&self) -> Vec<(String, String)> {
        let token = match self.auth.access_token.as_deref() {
            Some(t) if !t.is_empty() => mask_token(t),
            _ => "(not set)".to_string(),
        };
        vec![
            ("api_url".to_string(), self.api_url.clone()),
            ("auth.access_token".to_string(), token),
            (
                "paging.page_size".to_string(),
                self.paging.page_size.to_string(),
            ),
            (
                "paging.lookup_page_size".to_string(),
                self.paging.lookup_page_size.to_string(),
            ),
            (
                "paging.scroll_threshold_px".to_string(),
                self.paging.scroll_threshold_px.to_string(),
            ),
            (
                "selected_community".to_string(),
                self.selected_community
                    .clone()
                    .unwrap_or_else(|| "(not set)".to_string()),
            ),
        ]
    }
}

fn parse_positive(key: &str, value: &str) -> Result<u32> {
    match value.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(AgoraError::Config(format!(
            "{key} expects a positive number, got '{value}'"
        ))),
    }
}

/// Keep the last four characters of a token visible.
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}
