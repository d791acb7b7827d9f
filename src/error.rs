//! Error type shared by link resolution, the provider fetch tiers and the
//! response normalizer.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlaylistError {
    #[error("unsupported playlist link format: {0}")]
    UnsupportedLinkFormat(String),
    #[error("invalid playlist link: {0}")]
    InvalidLink(String),
    #[error("invalid playlist identifier: {0}")]
    InvalidIdentifier(String),
    #[error("failed to resolve short link {link}: {reason}")]
    RedirectResolutionFailed { link: String, reason: String },
    #[error("short link redirected more than {0} times")]
    RedirectLoop(usize),
    #[error("http error: {0}")]
    Http(String),
    #[error("malformed provider response: {0}")]
    MalformedProviderResponse(String),
    #[error("legacy endpoint rejected request: code={code}, playlists={playlists}")]
    LegacyRejected { code: i64, playlists: usize },
    #[error("provider returned an error body for platform {platform}")]
    SentinelResponse { platform: String },
    #[error("all fetch strategies failed: {0}")]
    AllFetchStrategiesFailed(Box<PlaylistError>),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlaylistError {
    /// True for errors caused by the link the caller supplied rather than by
    /// the provider.
    pub fn is_link_error(&self) -> bool {
        matches!(
            self,
            PlaylistError::UnsupportedLinkFormat(_)
                | PlaylistError::InvalidLink(_)
                | PlaylistError::InvalidIdentifier(_)
                | PlaylistError::RedirectLoop(_)
        )
    }
}

impl From<reqwest::Error> for PlaylistError {
    fn from(e: reqwest::Error) -> Self {
        PlaylistError::Http(e.to_string())
    }
}

impl From<serde_json::Error> for PlaylistError {
    fn from(e: serde_json::Error) -> Self {
        PlaylistError::MalformedProviderResponse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PlaylistError>;
