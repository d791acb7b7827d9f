use std::sync::LazyLock;

use regex::Regex;
use url::{Url, form_urlencoded};

use crate::error::{PlaylistError, Result};

// Half- and full-width brackets with whatever they enclose.
static BRACKETED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*[\(（\[【][^\)）\]】]*[\)）\]】]").expect("bracket pattern is valid")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Strips bracketed qualifiers such as `(Live)`, `（伴奏）` or `[Remastered]`
/// from a song name and collapses the remaining whitespace.
///
/// The result may be empty when the whole name was bracketed.
pub fn standard_song_name(name: &str) -> String {
    let stripped = BRACKETED.replace_all(name, "");
    WHITESPACE.replace_all(stripped.trim(), " ").into_owned()
}

/// Reads `param` from the query of `link`, falling back to a query embedded in
/// the fragment (`...#/details?id=1`).
pub fn extract_query_param(link: &str, param: &str) -> Result<String> {
    let url = Url::parse(link)
        .map_err(|e| PlaylistError::InvalidIdentifier(format!("cannot parse {link}: {e}")))?;

    let from_query = url
        .query_pairs()
        .find(|(k, v)| k == param && !v.is_empty())
        .map(|(_, v)| v.into_owned());
    if let Some(value) = from_query {
        return Ok(value);
    }

    let from_fragment = url.fragment().and_then(|fragment| {
        let query = fragment.split_once('?').map_or(fragment, |(_, q)| q);
        form_urlencoded::parse(query.as_bytes())
            .find(|(k, v)| k == param && !v.is_empty())
            .map(|(_, v)| v.into_owned())
    });

    from_fragment.ok_or_else(|| {
        PlaylistError::InvalidIdentifier(format!("parameter {param} not found in {link}"))
    })
}
