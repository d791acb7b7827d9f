//! # QQ Music playlist resolution
//!
//! Turns a shared QQ Music playlist link into a [`SongList`]:
//!
//! ```text
//! link ──▶ link::resolve_playlist_id ──▶ fetch (legacy, then paginated)
//!      ──▶ normalize ──▶ songlist::build_song_list ──▶ SongList
//! ```
//!
//! All network I/O goes through the [`Transport`] trait and request signing
//! through [`Signer`], both injected into [`QqMusic`] together with a
//! [`QqMusicConfig`]. Tests swap in fakes for both.
//!
//! A playlist that the provider truncated (for example to 30 songs) is
//! returned as a success; compare `songs.len()` with `songs_count` if that
//! matters to the caller.

pub mod fetch;
pub mod link;
pub mod normalize;
pub mod sign;
pub mod songlist;
pub mod transport;

use std::sync::Arc;

use tracing::{error, info};

pub use link::LinkShape;
pub use sign::{Signer, ZzcSigner};
pub use transport::{HttpTransport, Transport};

use crate::{
    config::{HttpConfig, QqMusicConfig},
    error::Result,
    types::{PlaylistId, SongList},
};

/// Client for resolving QQ Music playlists. Cheap to clone.
#[derive(Clone)]
pub struct QqMusic {
    transport: Arc<dyn Transport>,
    signer: Arc<dyn Signer>,
    config: QqMusicConfig,
}

impl QqMusic {
    /// Creates a client around `transport` that signs requests with
    /// [`ZzcSigner`].
    pub fn new(transport: Arc<dyn Transport>, config: QqMusicConfig) -> Self {
        Self {
            transport,
            signer: Arc::new(ZzcSigner),
            config,
        }
    }

    /// Replaces the request signer.
    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = signer;
        self
    }

    /// Builds a client with the reqwest transport and settings read from the
    /// environment.
    pub fn from_env() -> Result<Self> {
        let transport = HttpTransport::new(&HttpConfig::from_env())?;
        Ok(Self::new(Arc::new(transport), QqMusicConfig::from_env()?))
    }

    pub fn config(&self) -> &QqMusicConfig {
        &self.config
    }

    /// Resolves `link` to a playlist id without fetching the playlist.
    ///
    /// # Errors
    ///
    /// Link errors ([`PlaylistError::is_link_error`]) for unusable links, and
    /// [`PlaylistError::RedirectResolutionFailed`] when a short link cannot be
    /// followed.
    ///
    /// [`PlaylistError::is_link_error`]: crate::error::PlaylistError::is_link_error
    /// [`PlaylistError::RedirectResolutionFailed`]: crate::error::PlaylistError::RedirectResolutionFailed
    pub async fn resolve_id(&self, link: &str) -> Result<PlaylistId> {
        link::resolve_playlist_id(link, self.transport.as_ref(), &self.config).await
    }

    /// Resolves `link` and returns its songs as `Title - Artist` strings.
    ///
    /// With `detailed` the provider's song names are kept verbatim,
    /// otherwise bracketed qualifiers are stripped.
    pub async fn discover(&self, link: &str, detailed: bool) -> Result<SongList> {
        let tid = self.resolve_id(link).await?;

        let payload = self.fetch_playlist_payload(tid).await.inspect_err(|e| {
            error!(tid, error = %e, "failed to fetch playlist");
        })?;
        let tier = payload.tier();
        let playlist = normalize::normalize(payload).inspect_err(|e| {
            error!(tid, tier, error = %e, "failed to parse playlist");
        })?;

        info!(
            tid,
            tier,
            declared = playlist.declared_song_count,
            received = playlist.songs.len(),
            "playlist resolved"
        );
        Ok(songlist::build_song_list(&playlist, detailed))
    }
}
