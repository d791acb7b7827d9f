//! # CLI Module
//!
//! User-facing commands of the `qqlist` binary. Each command takes a ready
//! [`QqMusic`](crate::qqmusic::QqMusic) client built by `main` and reports
//! through the coloured status macros; fatal errors exit with status 1.
//!
//! - [`resolve`] - prints a playlist as a table or as JSON
//! - [`playlist_id`] - prints only the resolved playlist id
//! - [`serve`] - runs the HTTP API

mod resolve;

pub use resolve::{playlist_id, resolve, serve};
