use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use qqlist::{
    config::{HttpConfig, QqMusicConfig},
    error::PlaylistError,
    qqmusic::{HttpTransport, QqMusic, Transport},
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

/// Loopback server answering every request with `response`.
struct Server {
    base: String,
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<String>>>,
}

async fn serve(response: &'static str) -> Server {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let hits = Arc::new(AtomicUsize::new(0));
    let requests = Arc::new(Mutex::new(Vec::new()));

    let (task_hits, task_requests) = (hits.clone(), requests.clone());
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut chunk).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => buf.extend_from_slice(&chunk[..n]),
                }
            }
            task_hits.fetch_add(1, Ordering::SeqCst);
            task_requests
                .lock()
                .unwrap()
                .push(String::from_utf8_lossy(&buf).to_string());
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    Server {
        base,
        hits,
        requests,
    }
}

fn http_config() -> HttpConfig {
    HttpConfig {
        timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(2),
        user_agent: "qqlist-test/1.0".to_string(),
    }
}

fn transport() -> HttpTransport {
    HttpTransport::new(&http_config()).unwrap()
}

const OK_PAGE: &str =
    "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 4\r\nConnection: close\r\n\r\ngone";

#[tokio::test]
async fn test_non_redirect_response_is_an_error() {
    let server = serve(OK_PAGE).await;
    let url = format!("{}/base/fcgi-bin/u?__=gone", server.base);

    let err = transport().resolve_redirect(&url).await.unwrap_err();

    assert!(matches!(err, PlaylistError::Http(ref msg) if msg.contains("did not redirect")));
    assert_eq!(server.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_short_link_without_redirect_is_requested_once() {
    let server = serve(OK_PAGE).await;
    let link = format!("{}/base/fcgi-bin/u?__=gone", server.base);
    let qq = QqMusic::new(Arc::new(transport()), QqMusicConfig::default());

    let err = qq.resolve_id(&link).await.unwrap_err();

    match err {
        PlaylistError::RedirectResolutionFailed { link: failed, .. } => assert_eq!(failed, link),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(server.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_absolute_location_is_returned() {
    let server = serve(
        "HTTP/1.1 302 Found\r\nLocation: https://y.qq.com/n/ryqq/playlist/7364061065\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
    )
    .await;
    let url = format!("{}/base/fcgi-bin/u?__=abc", server.base);

    let target = transport().resolve_redirect(&url).await.unwrap();

    assert_eq!(target, "https://y.qq.com/n/ryqq/playlist/7364061065");
}

#[tokio::test]
async fn test_root_relative_location_is_joined() {
    let server = serve(
        "HTTP/1.1 302 Found\r\nLocation: /n/ryqq/playlist/42\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
    )
    .await;
    let link = format!("{}/base/fcgi-bin/u?__=abc", server.base);

    let target = transport().resolve_redirect(&link).await.unwrap();
    assert_eq!(target, format!("{}/n/ryqq/playlist/42", server.base));

    let qq = QqMusic::new(Arc::new(transport()), QqMusicConfig::default());
    assert_eq!(qq.resolve_id(&link).await.unwrap(), 42);
}

#[tokio::test]
async fn test_path_relative_location_is_joined() {
    let server = serve(
        "HTTP/1.1 301 Moved Permanently\r\nLocation: share?id=8888\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
    )
    .await;
    let url = format!("{}/base/fcgi-bin/u?__=abc", server.base);

    let target = transport().resolve_redirect(&url).await.unwrap();

    assert_eq!(target, format!("{}/base/fcgi-bin/share?id=8888", server.base));
}

#[tokio::test]
async fn test_redirect_without_location_is_an_error() {
    let server = serve("HTTP/1.1 302 Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n").await;
    let url = format!("{}/base/fcgi-bin/u?__=abc", server.base);

    let err = transport().resolve_redirect(&url).await.unwrap_err();

    assert!(matches!(err, PlaylistError::Http(ref msg) if msg.contains("without Location")));
}

#[tokio::test]
async fn test_configured_user_agent_is_sent() {
    let server = serve(OK_PAGE).await;

    let body = transport()
        .get(&format!("{}/page", server.base), &[])
        .await
        .unwrap();

    assert_eq!(body, b"gone");
    let requests = server.requests.lock().unwrap();
    assert!(
        requests[0]
            .to_ascii_lowercase()
            .contains("user-agent: qqlist-test/1.0")
    );
}

#[tokio::test]
async fn test_explicit_user_agent_header_wins() {
    let server = serve(OK_PAGE).await;

    transport()
        .get(&format!("{}/page", server.base), &[("User-Agent", "Provider/2.0")])
        .await
        .unwrap();

    let request = server.requests.lock().unwrap()[0].to_ascii_lowercase();
    assert!(request.contains("user-agent: provider/2.0"));
    assert!(!request.contains("qqlist-test"));
}
