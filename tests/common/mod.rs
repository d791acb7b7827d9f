#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use serde_json::json;

use qqlist::{
    config::QqMusicConfig,
    error::{PlaylistError, Result},
    qqmusic::{QqMusic, Signer, Transport, transport::Headers},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Get {
        url: String,
        headers: Vec<(String, String)>,
    },
    Post {
        url: String,
        body: String,
        headers: Vec<(String, String)>,
    },
    Redirect {
        url: String,
    },
}

/// Transport that replays scripted responses and records every call.
#[derive(Default)]
pub struct FakeTransport {
    gets: Mutex<VecDeque<Result<Vec<u8>>>>,
    posts: Mutex<VecDeque<Result<Vec<u8>>>>,
    redirects: Mutex<HashMap<String, Result<String>>>,
    calls: Mutex<Vec<Call>>,
}

fn owned(headers: Headers<'_>) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_get(&self, response: Result<Vec<u8>>) {
        self.gets.lock().unwrap().push_back(response);
    }

    pub fn push_post(&self, response: Result<Vec<u8>>) {
        self.posts.lock().unwrap().push_back(response);
    }

    pub fn redirect(&self, from: &str, to: Result<String>) {
        self.redirects.lock().unwrap().insert(from.to_string(), to);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn posts(&self) -> Vec<(String, String, Vec<(String, String)>)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Post { url, body, headers } => Some((url, body, headers)),
                _ => None,
            })
            .collect()
    }

    pub fn gets(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Get { url, headers } => Some((url, headers)),
                _ => None,
            })
            .collect()
    }
}

fn unscripted(kind: &str, url: &str) -> PlaylistError {
    PlaylistError::Http(format!("no scripted {kind} response for {url}"))
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, url: &str, headers: Headers<'_>) -> Result<Vec<u8>> {
        self.calls.lock().unwrap().push(Call::Get {
            url: url.to_string(),
            headers: owned(headers),
        });
        self.gets
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted("GET", url)))
    }

    async fn post_with_headers(
        &self,
        url: &str,
        body: String,
        headers: Headers<'_>,
    ) -> Result<Vec<u8>> {
        self.calls.lock().unwrap().push(Call::Post {
            url: url.to_string(),
            body,
            headers: owned(headers),
        });
        self.posts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted("POST", url)))
    }

    async fn resolve_redirect(&self, url: &str) -> Result<String> {
        self.calls.lock().unwrap().push(Call::Redirect {
            url: url.to_string(),
        });
        match self.redirects.lock().unwrap().remove(url) {
            Some(target) => target,
            None => Err(unscripted("redirect", url)),
        }
    }
}

pub struct FixedSigner;

impl Signer for FixedSigner {
    fn sign(&self, _body: &str) -> String {
        "zzctestsign".to_string()
    }
}

pub fn client_with(fake: &Arc<FakeTransport>, config: QqMusicConfig) -> QqMusic {
    QqMusic::new(fake.clone(), config).with_signer(Arc::new(FixedSigner))
}

pub fn client(fake: &Arc<FakeTransport>) -> QqMusic {
    client_with(fake, QqMusicConfig::default())
}

pub fn legacy_body(code: i64, title: &str, songnum: u32, songs: &[(&str, &[&str])]) -> Vec<u8> {
    let songlist: Vec<_> = songs
        .iter()
        .map(|(name, singers)| {
            json!({
                "songid": 1,
                "songname": name,
                "singer": singers.iter().map(|s| json!({"id": 7, "name": s})).collect::<Vec<_>>(),
            })
        })
        .collect();

    serde_json::to_vec(&json!({
        "code": code,
        "subcode": 0,
        "cdlist": [{ "dissname": title, "songnum": songnum, "songlist": songlist, "logo": "x.jpg" }],
    }))
    .unwrap()
}

pub fn legacy_body_without_playlists(code: i64) -> Vec<u8> {
    serde_json::to_vec(&json!({ "code": code, "subcode": 0, "cdlist": [] })).unwrap()
}

pub fn json_callback(body: &[u8]) -> Vec<u8> {
    let mut wrapped = b"jsonCallback(".to_vec();
    wrapped.extend_from_slice(body);
    wrapped.push(b')');
    wrapped
}

pub fn paginated_body(title: &str, songnum: u32, songs: &[(&str, &[&str])]) -> Vec<u8> {
    let songlist: Vec<_> = songs
        .iter()
        .map(|(name, singers)| {
            json!({
                "id": 1,
                "name": name,
                "singer": singers.iter().map(|s| json!({"mid": "m", "name": s})).collect::<Vec<_>>(),
            })
        })
        .collect();

    serde_json::to_vec(&json!({
        "code": 0,
        "req_0": {
            "code": 0,
            "data": {
                "dirinfo": { "title": title, "songnum": songnum, "picurl": "p.jpg" },
                "songlist": songlist,
            }
        }
    }))
    .unwrap()
}

/// Body with the exact size of the provider's paginated error response.
pub fn sentinel_body() -> Vec<u8> {
    let mut body = br#"{"code":0,"req_0":{"code":2000,"data":{}}}"#.to_vec();
    body.resize(QqMusicConfig::default().error_response_length, b' ');
    body
}
