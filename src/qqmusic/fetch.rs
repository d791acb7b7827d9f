//! Two-tier playlist retrieval.
//!
//! The legacy `fcg_ucc_getcdinfo_byids_cp.fcg` endpoint returns the whole
//! playlist but is unavailable for some ids. The signed `musics.fcg`
//! endpoint always answers but caps every page, and without the browser
//! headers below it silently stops at 30 songs. Platform identities are
//! cycled as a blind retry, the first non-error body wins.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::{
    config::DEFAULT_USER_AGENT,
    error::{PlaylistError, Result},
    qqmusic::{QqMusic, normalize},
    types::{PlaylistId, PlaylistPayload, PlaylistRequest},
};

pub const LEGACY_HEADERS: [(&str, &str); 2] = [
    ("Referer", "https://y.qq.com/n/yqq/playlist"),
    ("User-Agent", DEFAULT_USER_AGENT),
];

/// Dropping any of these caps paginated responses at 30 songs.
pub const API_HEADERS: [(&str, &str); 3] = [
    ("Referer", "https://y.qq.com/"),
    ("Origin", "https://y.qq.com"),
    ("User-Agent", DEFAULT_USER_AGENT),
];

impl QqMusic {
    /// Fetches a playlist, legacy endpoint first.
    ///
    /// The legacy tier is tried once. Any failure there (network error,
    /// malformed body, non-zero `code`, empty `cdlist`) is logged at `warn`
    /// and the first page of the paginated tier is requested instead.
    ///
    /// # Arguments
    ///
    /// * `tid` - Playlist identifier from [`resolve_id`](QqMusic::resolve_id)
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing:
    /// - `Ok(PlaylistPayload::Legacy)` - The already validated legacy playlist
    /// - `Ok(PlaylistPayload::Paginated)` - Raw page bytes, parsed by
    ///   [`normalize`](normalize::normalize)
    /// - `Err(PlaylistError::AllFetchStrategiesFailed)` - Every platform
    ///   identity of the paginated tier failed
    pub async fn fetch_playlist_payload(&self, tid: PlaylistId) -> Result<PlaylistPayload> {
        match self.fetch_legacy(tid).await {
            Ok(payload) => Ok(payload),
            Err(e) => {
                warn!(tid, tier = "legacy", error = %e, "legacy endpoint failed, trying paginated endpoint");
                self.fetch_page(tid, 0, self.config.page_size)
                    .await
                    .map(PlaylistPayload::Paginated)
            }
        }
    }

    /// Legacy endpoint URL for `tid`, including the fixed query parameters.
    pub fn legacy_url(&self, tid: PlaylistId) -> String {
        format!(
            "{base}?type=1&utf8=1&disstid={tid}&loginUin=0",
            base = self.config.legacy_api_url
        )
    }

    /// Requests the legacy endpoint and parses the answer.
    ///
    /// The body is unwrapped, parsed and validated once here; the parsed
    /// playlist travels on in [`PlaylistPayload::Legacy`].
    ///
    /// # Errors
    ///
    /// * [`PlaylistError::Http`] - The request failed
    /// * [`PlaylistError::MalformedProviderResponse`] - The body is not the
    ///   legacy JSON schema
    /// * [`PlaylistError::LegacyRejected`] - `code` is non-zero or `cdlist` is
    ///   empty
    pub async fn fetch_legacy(&self, tid: PlaylistId) -> Result<PlaylistPayload> {
        let url = self.legacy_url(tid);
        debug!(tid, %url, "requesting legacy playlist");

        let body = self.transport.get(&url, &LEGACY_HEADERS).await?;
        let playlist = normalize::from_legacy(&body)?;

        info!(
            tid,
            tier = "legacy",
            songs = playlist.songs.len(),
            "legacy endpoint returned playlist"
        );
        Ok(PlaylistPayload::Legacy(playlist))
    }

    /// Serializes and signs one page request.
    ///
    /// The signature covers the exact JSON body, so the body must be sent
    /// byte for byte as returned.
    ///
    /// # Returns
    ///
    /// `(url, body)` where `url` is `{api_url}?sign={sign}&_={unix_millis}`.
    ///
    /// # Errors
    ///
    /// Returns [`PlaylistError::MalformedProviderResponse`] only if the
    /// request envelope fails to serialize.
    pub fn build_page_request(
        &self,
        tid: PlaylistId,
        platform: &str,
        song_begin: u32,
        song_num: u32,
    ) -> Result<(String, String)> {
        let body = serde_json::to_string(&PlaylistRequest::new(
            tid, platform, song_begin, song_num,
        ))?;
        let sign = self.signer.sign(&body);
        let url = format!(
            "{base}?sign={sign}&_={ts}",
            base = self.config.api_url,
            ts = Utc::now().timestamp_millis()
        );
        Ok((url, body))
    }

    /// Requests one page from the paginated endpoint, cycling through the
    /// configured platform identities until a body that is not the
    /// provider's fixed-size error body comes back.
    ///
    /// Every request carries [`API_HEADERS`]. Identities are tried strictly in
    /// order and the first acceptable body stops the loop.
    ///
    /// # Arguments
    ///
    /// * `tid` - Playlist identifier
    /// * `song_begin` - Offset of the first song in the page
    /// * `song_num` - Maximum number of songs in the page
    ///
    /// # Errors
    ///
    /// Returns [`PlaylistError::AllFetchStrategiesFailed`] wrapping the error
    /// of the last identity tried: a transport error or
    /// [`PlaylistError::SentinelResponse`]. With no identities configured the
    /// wrapped error is [`PlaylistError::Config`].
    pub async fn fetch_page(
        &self,
        tid: PlaylistId,
        song_begin: u32,
        song_num: u32,
    ) -> Result<Vec<u8>> {
        let mut last_err: Option<PlaylistError> = None;

        for platform in &self.config.platforms {
            let (url, body) = self.build_page_request(tid, platform, song_begin, song_num)?;
            debug!(tid, %platform, song_begin, song_num, "requesting playlist page");

            let data = match self.transport.post_with_headers(&url, body, &API_HEADERS).await {
                Ok(data) => data,
                Err(e) => {
                    warn!(tid, %platform, error = %e, "paginated request failed");
                    last_err = Some(e);
                    continue;
                }
            };

            if data.len() == self.config.error_response_length {
                warn!(tid, %platform, bytes = data.len(), "provider returned error body");
                last_err = Some(PlaylistError::SentinelResponse {
                    platform: platform.clone(),
                });
                continue;
            }

            info!(tid, tier = "paginated", %platform, bytes = data.len(), "paginated endpoint answered");
            return Ok(data);
        }

        let last = last_err
            .unwrap_or_else(|| PlaylistError::Config("no platform identities configured".into()));
        Err(PlaylistError::AllFetchStrategiesFailed(Box::new(last)))
    }
}
