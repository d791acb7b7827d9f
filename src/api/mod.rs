//! # API Module
//!
//! HTTP handlers served by `qqlist serve`.
//!
//! ## Endpoints
//!
//! - [`health`] - `GET /health`, returns status and crate version.
//! - [`songlist`] - `POST /songlist`, resolves the playlist link in the `url`
//!   form field. An optional `detailed=true` field keeps song names verbatim.
//!
//! Responses of `/songlist` share one envelope:
//!
//! ```json
//! {"code": 1, "msg": "success", "data": {"name": "...", "songs": ["Title - Artist"], "songs_count": 2}}
//! ```
//!
//! Link errors answer `400 Bad Request`, provider failures `502 Bad Gateway`,
//! both with `code = -1`, the error text in `msg` and `data = null`.

mod health;
mod songlist;

pub use health::health;
pub use songlist::{SongListRequest, SongListResponse, songlist};
