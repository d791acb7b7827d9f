//! Configuration management for qqlist.
//!
//! This module handles loading configuration values from environment variables
//! and `.env` files and turns them into typed config structs that are passed
//! explicitly to the provider client, the HTTP transport and the logger.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf, time::Duration};

use crate::error::{PlaylistError, Result};

pub const DEFAULT_LEGACY_API_URL: &str =
    "http://c.y.qq.com/qzone/fcg-bin/fcg_ucc_getcdinfo_byids_cp.fcg";
pub const DEFAULT_API_URL: &str = "https://u6.y.qq.com/cgi-bin/musics.fcg";
pub const DEFAULT_PLATFORMS: [&str; 7] = [
    "-1",
    "android",
    "iphone",
    "h5",
    "wxfshare",
    "iphone_wx",
    "windows",
];
pub const DEFAULT_PAGE_SIZE: u32 = 1000;
/// Size in bytes of the body the paginated endpoint answers with on failure.
pub const DEFAULT_ERROR_RESPONSE_LENGTH: usize = 108;
pub const DEFAULT_MAX_REDIRECT_DEPTH: usize = 3;
pub const DEFAULT_DETAILS_PARAM: &str = "id";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8081";

pub const HTTP_TIMEOUT: u64 = 8000;
pub const HTTP_CONNECT_TIMEOUT: u64 = 2000;
/// Desktop browser user agent, the provider answers it like the web player.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the directory structure if it doesn't exist and loads variables
/// from `qqlist/.env` under the platform-specific local data directory:
/// - Linux: `~/.local/share/qqlist/.env`
/// - macOS: `~/Library/Application Support/qqlist/.env`
/// - Windows: `%LOCALAPPDATA%/qqlist/.env`
///
/// A missing `.env` file is not an error, every setting has a default.
pub async fn load_env() -> Result<()> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("qqlist/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path)
            .map_err(|e| PlaylistError::Config(format!("{}: {e}", path.display())))?;
    }
    Ok(())
}

/// Returns the address the HTTP server binds to (`SERVER_ADDRESS`).
pub fn server_addr() -> String {
    env_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => default.to_string(),
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// Splits a comma separated platform list, dropping blanks.
fn parse_platforms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Settings for the QQ Music endpoints and the fetch fallback chain.
#[derive(Debug, Clone)]
pub struct QqMusicConfig {
    pub legacy_api_url: String,
    pub api_url: String,
    /// Tried in order against the paginated endpoint, first success wins.
    pub platforms: Vec<String>,
    pub page_size: u32,
    pub error_response_length: usize,
    pub max_redirect_depth: usize,
    pub details_param: String,
}

impl Default for QqMusicConfig {
    fn default() -> Self {
        Self {
            legacy_api_url: DEFAULT_LEGACY_API_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            platforms: DEFAULT_PLATFORMS.iter().map(|p| p.to_string()).collect(),
            page_size: DEFAULT_PAGE_SIZE,
            error_response_length: DEFAULT_ERROR_RESPONSE_LENGTH,
            max_redirect_depth: DEFAULT_MAX_REDIRECT_DEPTH,
            details_param: DEFAULT_DETAILS_PARAM.to_string(),
        }
    }
}

impl QqMusicConfig {
    /// Builds the provider settings from environment variables.
    ///
    /// Reads `QQMUSIC_LEGACY_API_URL`, `QQMUSIC_API_URL`, `QQMUSIC_PLATFORMS`
    /// (comma separated), `QQMUSIC_PAGE_SIZE`, `QQMUSIC_ERROR_RESPONSE_LENGTH`,
    /// `QQMUSIC_MAX_REDIRECT_DEPTH` and `QQMUSIC_DETAILS_PARAM`. Unset, blank
    /// or unparsable values fall back to the defaults above.
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing:
    /// - `Ok(QqMusicConfig)` - The settings to hand to [`QqMusic`](crate::qqmusic::QqMusic)
    /// - `Err(PlaylistError::Config)` - An unusable value
    ///
    /// # Errors
    ///
    /// * `QQMUSIC_PLATFORMS` is set but names no platform
    /// * `QQMUSIC_PAGE_SIZE` is `0`
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let platforms = match env::var("QQMUSIC_PLATFORMS") {
            Ok(raw) => parse_platforms(&raw),
            Err(_) => defaults.platforms,
        };
        if platforms.is_empty() {
            return Err(PlaylistError::Config(
                "QQMUSIC_PLATFORMS must name at least one platform".to_string(),
            ));
        }

        let page_size = env_parse("QQMUSIC_PAGE_SIZE", DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(PlaylistError::Config(
                "QQMUSIC_PAGE_SIZE must be positive".to_string(),
            ));
        }

        Ok(Self {
            legacy_api_url: env_or("QQMUSIC_LEGACY_API_URL", DEFAULT_LEGACY_API_URL),
            api_url: env_or("QQMUSIC_API_URL", DEFAULT_API_URL),
            platforms,
            page_size,
            error_response_length: env_parse(
                "QQMUSIC_ERROR_RESPONSE_LENGTH",
                DEFAULT_ERROR_RESPONSE_LENGTH,
            ),
            max_redirect_depth: env_parse("QQMUSIC_MAX_REDIRECT_DEPTH", DEFAULT_MAX_REDIRECT_DEPTH),
            details_param: env_or("QQMUSIC_DETAILS_PARAM", DEFAULT_DETAILS_PARAM),
        })
    }
}

/// Settings for the reqwest based transport.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Whole request timeout.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Sent on every request that does not set its own `User-Agent`.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(HTTP_TIMEOUT),
            connect_timeout: Duration::from_millis(HTTP_CONNECT_TIMEOUT),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpConfig {
    /// Reads `HTTP_TIMEOUT_MS`, `HTTP_CONNECT_TIMEOUT_MS` and
    /// `HTTP_USER_AGENT`, falling back to the defaults.
    pub fn from_env() -> Self {
        Self {
            timeout: Duration::from_millis(env_parse("HTTP_TIMEOUT_MS", HTTP_TIMEOUT)),
            connect_timeout: Duration::from_millis(env_parse(
                "HTTP_CONNECT_TIMEOUT_MS",
                HTTP_CONNECT_TIMEOUT,
            )),
            user_agent: env_or("HTTP_USER_AGENT", DEFAULT_USER_AGENT),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter_directives: String,
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter_directives: "info,qqlist=info,reqwest=warn".to_string(),
            include_target: false,
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            filter_directives: env_or("LOG_FILTER", &defaults.filter_directives),
            include_target: env_parse("LOG_INCLUDE_TARGET", defaults.include_target),
        }
    }
}
