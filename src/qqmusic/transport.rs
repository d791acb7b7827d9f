//! HTTP access for the playlist pipeline.
//!
//! [`Transport`] is the only way the resolver talks to the network, so tests
//! can replace it with a scripted fake. [`HttpTransport`] is the production
//! implementation on top of reqwest.

use async_trait::async_trait;
use reqwest::{Client, header, redirect};
use url::Url;

use crate::{
    config::HttpConfig,
    error::{PlaylistError, Result},
};

/// Ordered `(name, value)` header pairs.
pub type Headers<'a> = &'a [(&'a str, &'a str)];

/// The I/O surface the playlist pipeline needs.
///
/// Implementations return response bodies regardless of HTTP status; callers
/// decide whether a body counts as a success.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, headers: Headers<'_>) -> Result<Vec<u8>>;

    async fn post_with_headers(
        &self,
        url: &str,
        body: String,
        headers: Headers<'_>,
    ) -> Result<Vec<u8>>;

    /// Follows a single redirect hop and returns where it points.
    ///
    /// A response that is not a redirection is an error.
    async fn resolve_redirect(&self, url: &str) -> Result<String>;
}

/// [`Transport`] backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
    no_redirect: Client,
}

impl HttpTransport {
    /// Builds the transport from `cfg`.
    ///
    /// Two clients share the same timeouts and user agent: one follows
    /// redirects for regular requests, the other never does so short links
    /// can be resolved one hop at a time.
    ///
    /// # Arguments
    ///
    /// * `cfg` - Timeouts and default user agent
    ///
    /// # Errors
    ///
    /// Returns [`PlaylistError::Http`] if reqwest cannot build a client, for
    /// example when the TLS backend fails to initialize.
    pub fn new(cfg: &HttpConfig) -> Result<Self> {
        let builder = || {
            Client::builder()
                .timeout(cfg.timeout)
                .connect_timeout(cfg.connect_timeout)
                .user_agent(cfg.user_agent.as_str())
        };

        let http = builder()
            .build()
            .map_err(|e| PlaylistError::Http(format!("build client: {e}")))?;
        let no_redirect = builder()
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| PlaylistError::Http(format!("build client: {e}")))?;

        Ok(Self { http, no_redirect })
    }
}

fn header_map(headers: Headers<'_>) -> Result<header::HeaderMap> {
    let mut map = header::HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = header::HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| PlaylistError::Http(format!("invalid header name {name}: {e}")))?;
        let value = header::HeaderValue::from_str(value)
            .map_err(|e| PlaylistError::Http(format!("invalid header value for {name}: {e}")))?;
        map.insert(name, value);
    }
    Ok(map)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, headers: Headers<'_>) -> Result<Vec<u8>> {
        let response = self.http.get(url).headers(header_map(headers)?).send().await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn post_with_headers(
        &self,
        url: &str,
        body: String,
        headers: Headers<'_>,
    ) -> Result<Vec<u8>> {
        let response = self
            .http
            .post(url)
            .headers(header_map(headers)?)
            .body(body)
            .send()
            .await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn resolve_redirect(&self, url: &str) -> Result<String> {
        let response = self.no_redirect.get(url).send().await?;

        let status = response.status();
        if !status.is_redirection() {
            return Err(PlaylistError::Http(format!(
                "{url} did not redirect (status {status})"
            )));
        }

        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                PlaylistError::Http(format!("redirect from {url} without Location header"))
            })?;

        // Location may be relative to the short link.
        let base = Url::parse(url).map_err(|e| PlaylistError::Http(format!("{url}: {e}")))?;
        let target = base
            .join(location)
            .map_err(|e| PlaylistError::Http(format!("bad Location {location}: {e}")))?;
        Ok(target.to_string())
    }
}
