use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Playlist key on the QQ Music side (`disstid`/`tid`).
pub type PlaylistId = u64;

pub const PLAYLIST_MODULE: &str = "music.srfDissInfo.aiDissInfo";
pub const PLAYLIST_METHOD: &str = "uniform_get_Dissinfo";
pub const G_TK: u32 = 5381;

/// Body of a signed request against the paginated `musics.fcg` endpoint.
///
/// Field order is part of the signed payload, keep it stable.
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistRequest {
    pub req_0: PlaylistRequestModule,
    pub comm: RequestComm,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaylistRequestModule {
    pub module: String,
    pub method: String,
    pub param: PlaylistRequestParam,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaylistRequestParam {
    pub disstid: PlaylistId,
    pub enc_host_uin: String,
    pub tag: u8,
    pub userinfo: u8,
    pub song_begin: u32,
    pub song_num: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestComm {
    pub g_tk: u32,
    pub uin: u64,
    pub format: String,
    pub platform: String,
}

impl PlaylistRequest {
    pub fn new(disstid: PlaylistId, platform: &str, song_begin: u32, song_num: u32) -> Self {
        Self {
            req_0: PlaylistRequestModule {
                module: PLAYLIST_MODULE.to_string(),
                method: PLAYLIST_METHOD.to_string(),
                param: PlaylistRequestParam {
                    disstid,
                    enc_host_uin: String::new(),
                    tag: 1,
                    userinfo: 1,
                    song_begin,
                    song_num,
                },
            },
            comm: RequestComm {
                g_tk: G_TK,
                uin: 0,
                format: "json".to_string(),
                platform: platform.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Singer {
    #[serde(default)]
    pub name: String,
}

/// Response of the paginated endpoint. Every field is optional on the wire
/// and the status codes are not read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginatedResponse {
    #[serde(default)]
    pub req_0: PaginatedModule,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginatedModule {
    #[serde(default)]
    pub data: PaginatedData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginatedData {
    #[serde(default)]
    pub dirinfo: DirInfo,
    #[serde(default)]
    pub songlist: Vec<PaginatedSong>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub songnum: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginatedSong {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub singer: Vec<Singer>,
}

/// Response of the legacy `fcg_ucc_getcdinfo_byids_cp.fcg` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyResponse {
    pub code: i64,
    #[serde(default)]
    pub cdlist: Vec<LegacyPlaylist>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyPlaylist {
    #[serde(default)]
    pub dissname: String,
    #[serde(default)]
    pub songnum: u32,
    #[serde(default)]
    pub songlist: Vec<LegacySong>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacySong {
    #[serde(default)]
    pub songname: String,
    #[serde(default)]
    pub singer: Vec<Singer>,
}

/// Result of one of the two fetch tiers.
///
/// The legacy tier has to parse its body to decide whether it succeeded, so
/// it carries the parsed playlist. The paginated tier only checks the body
/// length and carries the raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistPayload {
    Legacy(ProviderPlaylist),
    Paginated(Vec<u8>),
}

impl PlaylistPayload {
    pub fn tier(&self) -> &'static str {
        match self {
            PlaylistPayload::Legacy(_) => "legacy",
            PlaylistPayload::Paginated(_) => "paginated",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongEntry {
    pub name: String,
    pub artists: Vec<String>,
}

/// Playlist after normalization, independent of the endpoint it came from.
///
/// `songs.len()` is not guaranteed to match `declared_song_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderPlaylist {
    pub title: String,
    pub declared_song_count: u32,
    pub songs: Vec<SongEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongList {
    pub name: String,
    pub songs: Vec<String>,
    pub songs_count: u32,
}

#[derive(Tabled)]
pub struct SongTableRow {
    #[tabled(rename = "#")]
    pub index: usize,
    pub song: String,
}
