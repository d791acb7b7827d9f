//! Renders a normalized playlist into `"Title - Artist"` display strings.
//!
//! The builder is pure: the same playlist and flag always give the same
//! [`SongList`], in provider order and with the provider's declared count.

use crate::{
    types::{ProviderPlaylist, SongEntry, SongList},
    utils,
};

pub const ARTIST_SEPARATOR: &str = " / ";

/// Stands in for a song the provider sent without a name.
pub const UNTITLED: &str = "Untitled";

/// Renders one entry as `<name> - <artist / artist>`.
///
/// Unless `detailed` is set the name goes through
/// [`utils::standard_song_name`]; a name that would be cleaned away entirely
/// is kept verbatim instead. A blank provider name becomes [`UNTITLED`] in
/// both modes. An empty artist list leaves the artist segment empty.
///
/// # Example
///
/// ```
/// let song = SongEntry { name: "晴天 (Live)".into(), artists: vec!["周杰伦".into()] };
/// assert_eq!(display_name(&song, false), "晴天 - 周杰伦");
/// assert_eq!(display_name(&song, true), "晴天 (Live) - 周杰伦");
/// ```
pub fn display_name(song: &SongEntry, detailed: bool) -> String {
    let name = if song.name.trim().is_empty() {
        UNTITLED.to_string()
    } else if detailed {
        song.name.clone()
    } else {
        match utils::standard_song_name(&song.name) {
            cleaned if cleaned.is_empty() => song.name.clone(),
            cleaned => cleaned,
        }
    };

    format!("{name} - {}", song.artists.join(ARTIST_SEPARATOR))
}

/// Builds the final song list for `playlist`.
///
/// # Arguments
///
/// * `playlist` - Normalized playlist from either fetch tier
/// * `detailed` - Keep provider song names verbatim instead of cleaning them
///
/// # Returns
///
/// A [`SongList`] named after the playlist title, with one display string per
/// entry and `songs_count` set to the declared count. The two counts may
/// differ when the provider truncated the playlist.
pub fn build_song_list(playlist: &ProviderPlaylist, detailed: bool) -> SongList {
    SongList {
        name: playlist.title.clone(),
        songs: playlist
            .songs
            .iter()
            .map(|song| display_name(song, detailed))
            .collect(),
        songs_count: playlist.declared_song_count,
    }
}
