//! Application configuration.
//!
//! Configuration is stored in `config.yaml` under the platform config directory
//! (or at `$ROSTER_CONFIG`) and includes:
//! - API base URL
//! - Session token obtained by `roster auth login`
//! - Display language and list defaults

use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::error::{ConsoleError, Result};
use crate::i18n::Language;

pub const CONFIG_ENV: &str = "ROSTER_CONFIG";
pub const API_URL_ENV: &str = "ROSTER_API_URL";
pub const TOKEN_ENV: &str = "ROSTER_TOKEN";

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_PAGINATION_WINDOW: u32 = 5;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub language: Language,

    /// Rows per page for list views (default: 10)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Delay before a typed search is committed (default: 500)
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Request timeout in seconds (default: 30, 0 = no timeout)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Number of page buttons shown by the pagination control (default: 5)
    #[serde(default = "default_pagination_window")]
    pub pagination_window: u32,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_search_debounce_ms() -> u64 {
    DEFAULT_SEARCH_DEBOUNCE_MS
}

fn default_request_timeout() -> u64 {
    30
}

fn default_pagination_window() -> u32 {
    DEFAULT_PAGINATION_WINDOW
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            auth: AuthConfig::default(),
            language: Language::default(),
            page_size: default_page_size(),
            search_debounce_ms: default_search_debounce_ms(),
            request_timeout_secs: default_request_timeout(),
            pagination_window: default_pagination_window(),
        }
    }
}

/// Backend location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Session credentials
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = env::var(CONFIG_ENV)
            && !path.is_empty()
        {
            return Ok(PathBuf::from(path));
        }

        let dirs = directories::ProjectDirs::from("com", "roster", "roster-console")
            .ok_or_else(|| ConsoleError::Config("cannot determine config directory".into()))?;
        Ok(dirs.config_dir().join("config.yaml"))
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            ConsoleError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content).map_err(|e| {
            ConsoleError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;

        // Owner read/write only, the file holds the session token
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
        }

        tracing::debug!("saved config to {}", path.display());
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(ConsoleError::Config("page_size must be greater than 0".into()));
        }
        if self.pagination_window == 0 {
            return Err(ConsoleError::Config(
                "pagination_window must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// API base URL from environment variable or config file
    pub fn base_url(&self) -> Result<url::Url> {
        let raw = match env::var(API_URL_ENV) {
            Ok(url) if !url.is_empty() => url,
            _ => self.api.base_url.clone().ok_or_else(|| {
                ConsoleError::Config(format!(
                    "API base URL not configured. Set {API_URL_ENV} or run: roster config set api.base_url <url>"
                ))
            })?,
        };
        Ok(url::Url::parse(&raw)?)
    }

    /// Session token from environment variable or config file
    pub fn token(&self) -> Option<SecretString> {
        if let Ok(token) = env::var(TOKEN_ENV)
            && !token.is_empty()
        {
            return Some(SecretString::from(token));
        }

        self.auth.token.clone().map(SecretString::from)
    }

    pub fn set_token(&mut self, token: String) {
        self.auth.token = Some(token);
    }

    pub fn clear_token(&mut self) {
        self.auth.token = None;
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Set a value by dotted key, as used by `roster config set`
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.base_url" => {
                url::Url::parse(value)?;
                self.api.base_url = Some(value.to_string());
            }
            "auth.token" => self.set_token(value.to_string()),
            "language" => self.language = value.parse()?,
            "page_size" => self.page_size = parse_positive(key, value)? as u32,
            "search_debounce_ms" => self.search_debounce_ms = parse_number(key, value)?,
            "request_timeout_secs" => self.request_timeout_secs = parse_number(key, value)?,
            "pagination_window" => self.pagination_window = parse_positive(key, value)? as u32,
            _ => {
                return Err(ConsoleError::Config(format!(
                    "unknown config key '{key}'. Valid keys: api.base_url, auth.token, language, page_size, search_debounce_ms, request_timeout_secs, pagination_window"
                )));
            }
        }
        Ok(())
    }
}

fn parse_number(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| ConsoleError::Config(format!("invalid value '{value}' for {key}")))
}

fn parse_positive(key: &str, value: &str) -> Result<u64> {
    match parse_number(key, value)? {
        0 => Err(ConsoleError::Config(format!("{key} must be greater than 0"))),
        n if n > u32::MAX as u64 => Err(ConsoleError::Config(format!("{key} is too large"))),
        n => Ok(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use serial_test::serial;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.api.base_url.is_none());
        assert!(config.auth.token.is_none());
        assert_eq!(config.page_size, 10);
        assert_eq!(config.search_debounce(), Duration::from_millis(500));
        assert_eq!(config.pagination_window, 5);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: Config = serde_yaml_ng::from_str("language: ar\npage_size: 25\n").unwrap();
        assert_eq!(config.language, Language::Ar);
        assert_eq!(config.page_size, 25);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_debug_redacts_token() {
        let mut config = Config::default();
        config.set_token("super-secret".to_string());
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_set_value() {
        let mut config = Config::default();
        config.set_value("api.base_url", "https://roster.example.com").unwrap();
        config.set_value("language", "ar").unwrap();
        config.set_value("page_size", "20").unwrap();
        config.set_value("request_timeout_secs", "0").unwrap();

        assert_eq!(config.api.base_url.as_deref(), Some("https://roster.example.com"));
        assert_eq!(config.language, Language::Ar);
        assert_eq!(config.page_size, 20);
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_set_value_rejects_bad_input() {
        let mut config = Config::default();
        assert!(config.set_value("page_size", "0").is_err());
        assert!(config.set_value("page_size", "ten").is_err());
        assert!(config.set_value("api.base_url", "not a url").is_err());
        assert!(config.set_value("colour", "blue").is_err());
    }

    #[test]
    #[serial]
    fn test_token_env_overrides_file() {
        let mut config = Config::default();
        config.set_token("from-file".to_string());

        unsafe { env::set_var(TOKEN_ENV, "from-env") };
        assert_eq!(config.token().unwrap().expose_secret(), "from-env");
        unsafe { env::remove_var(TOKEN_ENV) };

        assert_eq!(config.token().unwrap().expose_secret(), "from-file");
    }

    #[test]
    #[serial]
    fn test_base_url_missing() {
        unsafe { env::remove_var(API_URL_ENV) };
        let err = Config::default().base_url().unwrap_err();
        assert!(matches!(err, ConsoleError::Config(_)));
    }
}
