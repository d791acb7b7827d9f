//! QQ Music playlist resolver
//!
//! This library turns shared QQ Music playlist links into normalized, ordered
//! `"Title - Artist"` song lists. It includes the provider client, a small
//! HTTP API, the CLI commands and configuration handling.
//!
//! # Modules
//!
//! - `api` - HTTP handlers served by `qqlist serve`
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - The crate-wide error type
//! - `logging` - Tracing subscriber setup
//! - `qqmusic` - Link resolution, fetch tiers, normalization and song list building
//! - `server` - HTTP server wiring
//! - `types` - Wire and domain data structures
//! - `utils` - Song name cleaning and URL helpers
//!
//! # Example
//!
//! ```
//! use qqlist::qqmusic::QqMusic;
//!
//! #[tokio::main]
//! async fn main() -> qqlist::error::Result<()> {
//!     let client = QqMusic::from_env()?;
//!     let list = client.discover("https://y.qq.com/n/ryqq/playlist/7364061065", false).await?;
//!     println!("{}: {} songs", list.name, list.songs.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod qqmusic;
pub mod server;
pub mod types;
pub mod utils;

pub use error::{PlaylistError, Result};
pub use qqmusic::QqMusic;
pub use types::SongList;

/// Resolves a playlist link with a client configured from the environment.
///
/// Convenience wrapper around [`QqMusic::discover`]; build a [`QqMusic`]
/// once and reuse it when resolving many links.
pub async fn resolve_playlist(link: &str, detailed: bool) -> Result<SongList> {
    QqMusic::from_env()?.discover(link, detailed).await
}

// Status lines go to stderr so that machine readable output on stdout (for
// example `qqlist resolve --json`) stays clean.

/// Prints a status line prefixed with a blue `o`.
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a status line prefixed with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error line prefixed with a red `!` and exits with status 1.
///
/// Only for the binary and CLI commands; library code returns
/// [`PlaylistError`] instead.
///
/// ```
/// error!("Cannot resolve playlist: {}", e);
/// // not reached
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning line prefixed with a yellow `!`.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
