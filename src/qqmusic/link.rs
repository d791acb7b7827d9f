//! Playlist link classification and identifier extraction.
//!
//! QQ Music hands out playlist links in several shapes depending on the
//! client that shared them. Each shape is matched by a pattern, checked in a
//! fixed priority order, and handled on its own.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::{
    config::QqMusicConfig,
    error::{PlaylistError, Result},
    qqmusic::transport::Transport,
    types::PlaylistId,
    utils,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkShape {
    /// `https://y.qq.com/n/ryqq/playlist/7364061065`
    PlaylistPath,
    /// `...taoge.html?hosteuin=...&id=7364061065`
    IdQueryParam,
    /// `https://c6.y.qq.com/base/fcgi-bin/u?__=abc`, resolves via redirect
    ShortRedirect,
    /// Details page carrying the id in a query parameter.
    DetailsPage,
    Unrecognized,
}

static PLAYLIST_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".*playlist/\d+$").expect("valid pattern"));
static ID_QUERY_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"id=\d+").expect("valid pattern"));
static SHORT_REDIRECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"fcgi-bin").expect("valid pattern"));
static DETAILS_PAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"details").expect("valid pattern"));

/// Shapes in priority order; the first matching pattern wins.
static SHAPES: [(LinkShape, &LazyLock<Regex>); 4] = [
    (LinkShape::PlaylistPath, &PLAYLIST_PATH),
    (LinkShape::IdQueryParam, &ID_QUERY_PARAM),
    (LinkShape::ShortRedirect, &SHORT_REDIRECT),
    (LinkShape::DetailsPage, &DETAILS_PAGE),
];

impl LinkShape {
    pub fn classify(link: &str) -> Self {
        SHAPES
            .iter()
            .find(|(_, pattern)| pattern.is_match(link))
            .map(|(shape, _)| *shape)
            .unwrap_or(LinkShape::Unrecognized)
    }
}

/// Parses the run of ASCII digits that directly follows the first occurrence
/// of `keyword` in `link`.
pub fn extract_number_after_keyword(link: &str, keyword: &str) -> Result<PlaylistId> {
    let start = link
        .find(keyword)
        .map(|idx| idx + keyword.len())
        .ok_or_else(|| PlaylistError::InvalidIdentifier(format!("{keyword} not found in {link}")))?;

    let rest = &link[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];

    if digits.is_empty() {
        return Err(PlaylistError::InvalidIdentifier(format!(
            "no digits after {keyword} in {link}"
        )));
    }

    digits
        .parse::<PlaylistId>()
        .map_err(|e| PlaylistError::InvalidIdentifier(format!("{digits}: {e}")))
}

/// Resolves `link` to a playlist identifier.
///
/// Short links are resolved through `transport` and the landing URL is
/// classified again, at most `cfg.max_redirect_depth` times. An identifier of
/// zero is rejected with [`PlaylistError::InvalidLink`].
pub async fn resolve_playlist_id(
    link: &str,
    transport: &dyn Transport,
    cfg: &QqMusicConfig,
) -> Result<PlaylistId> {
    let mut current = link.trim().to_string();
    let mut hops = 0;

    loop {
        let shape = LinkShape::classify(&current);
        debug!(?shape, link = %current, "classified playlist link");

        let tid = match shape {
            LinkShape::PlaylistPath => extract_number_after_keyword(&current, "playlist/")?,
            LinkShape::IdQueryParam => extract_number_after_keyword(&current, "id=")?,
            LinkShape::ShortRedirect => {
                if hops >= cfg.max_redirect_depth {
                    return Err(PlaylistError::RedirectLoop(cfg.max_redirect_depth));
                }
                hops += 1;

                let landing = match transport.resolve_redirect(&current).await {
                    Ok(landing) => landing,
                    Err(e) => {
                        warn!(link = %current, error = %e, "short link redirect failed");
                        return Err(PlaylistError::RedirectResolutionFailed {
                            link: current,
                            reason: e.to_string(),
                        });
                    }
                };
                if landing == current {
                    return Err(PlaylistError::RedirectResolutionFailed {
                        link: current,
                        reason: "short link redirects to itself".to_string(),
                    });
                }
                debug!(from = %current, to = %landing, "followed short link");
                current = landing;
                continue;
            }
            LinkShape::DetailsPage => {
                let raw = utils::extract_query_param(&current, &cfg.details_param)?;
                raw.trim().parse::<PlaylistId>().map_err(|e| {
                    PlaylistError::InvalidIdentifier(format!("{}={raw}: {e}", cfg.details_param))
                })?
            }
            LinkShape::Unrecognized => return Err(PlaylistError::UnsupportedLinkFormat(current)),
        };

        if tid == 0 {
            return Err(PlaylistError::InvalidLink(format!(
                "playlist id 0 in {current}"
            )));
        }
        return Ok(tid);
    }
}
