//! Maps the two provider response schemas onto [`ProviderPlaylist`].
//!
//! The legacy mapping validates the provider status, the paginated mapping
//! accepts any JSON document and falls back to empty defaults. Callers never
//! branch on the schema after this point.

use crate::{
    error::{PlaylistError, Result},
    types::{
        LegacyResponse, LegacySong, PaginatedResponse, PaginatedSong, PlaylistPayload,
        ProviderPlaylist, Singer, SongEntry,
    },
};

const JSON_CALLBACK_PREFIX: &[u8] = b"jsonCallback(";
const JSON_CALLBACK_SUFFIX: &[u8] = b")";

/// Removes a `jsonCallback( ... )` JSONP envelope if present.
pub fn strip_json_callback(body: &[u8]) -> &[u8] {
    let body = body.trim_ascii();
    match body
        .strip_prefix(JSON_CALLBACK_PREFIX)
        .and_then(|inner| inner.strip_suffix(JSON_CALLBACK_SUFFIX))
    {
        Some(inner) => inner,
        None => body,
    }
}

fn artist_names(singers: Vec<Singer>) -> Vec<String> {
    singers.into_iter().map(|s| s.name).collect()
}

impl From<LegacySong> for SongEntry {
    fn from(song: LegacySong) -> Self {
        SongEntry {
            name: song.songname,
            artists: artist_names(song.singer),
        }
    }
}

impl From<PaginatedSong> for SongEntry {
    fn from(song: PaginatedSong) -> Self {
        SongEntry {
            name: song.name,
            artists: artist_names(song.singer),
        }
    }
}

/// Parses a legacy endpoint body, with or without its JSONP envelope.
///
/// Only the first entry of `cdlist` is used.
///
/// # Errors
///
/// * [`PlaylistError::MalformedProviderResponse`] - Not JSON, or `code` missing
/// * [`PlaylistError::LegacyRejected`] - `code` is non-zero or `cdlist` is empty
pub fn from_legacy(bytes: &[u8]) -> Result<ProviderPlaylist> {
    let resp: LegacyResponse = serde_json::from_slice(strip_json_callback(bytes))?;

    let playlists = resp.cdlist.len();
    let Some(cd) = resp.cdlist.into_iter().next().filter(|_| resp.code == 0) else {
        return Err(PlaylistError::LegacyRejected {
            code: resp.code,
            playlists,
        });
    };

    Ok(ProviderPlaylist {
        title: cd.dissname,
        declared_song_count: cd.songnum,
        songs: cd.songlist.into_iter().map(SongEntry::from).collect(),
    })
}

/// Paginated schema: reads `req_0.data`. Status codes are not inspected, any
/// JSON document is accepted.
pub fn from_paginated(bytes: &[u8]) -> Result<ProviderPlaylist> {
    let resp: PaginatedResponse = serde_json::from_slice(bytes)?;
    let data = resp.req_0.data;

    Ok(ProviderPlaylist {
        title: data.dirinfo.title,
        declared_song_count: data.dirinfo.songnum,
        songs: data.songlist.into_iter().map(SongEntry::from).collect(),
    })
}

/// Turns the output of either fetch tier into a [`ProviderPlaylist`].
///
/// Legacy payloads were parsed while fetching and pass through unchanged;
/// paginated bytes go through [`from_paginated`].
pub fn normalize(payload: PlaylistPayload) -> Result<ProviderPlaylist> {
    match payload {
        PlaylistPayload::Legacy(playlist) => Ok(playlist),
        PlaylistPayload::Paginated(bytes) => from_paginated(&bytes),
    }
}
