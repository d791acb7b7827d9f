mod common;

use std::sync::Arc;

use axum::{Extension, Form, http::StatusCode};
use common::{FakeTransport, client, json_callback, legacy_body, paginated_body, sentinel_body};
use qqlist::{
    api::{SongListRequest, songlist},
    error::PlaylistError,
};

#[tokio::test]
async fn test_discover_via_legacy_endpoint() {
    let fake = FakeTransport::new();
    fake.push_get(Ok(json_callback(&legacy_body(
        0,
        "Road Trip",
        2,
        &[("Highway (Live)", &["Alice", "Bob"]), ("Exit 9", &["Carol"])],
    ))));

    let list = client(&fake)
        .discover("https://y.qq.com/n/ryqq/playlist/123456", false)
        .await
        .unwrap();

    assert_eq!(list.name, "Road Trip");
    assert_eq!(list.songs_count, 2);
    assert_eq!(list.songs, vec!["Highway - Alice / Bob", "Exit 9 - Carol"]);
    assert!(fake.gets()[0].0.contains("disstid=123456"));
}

#[tokio::test]
async fn test_discover_falls_back_to_paginated_endpoint() {
    let fake = FakeTransport::new();
    fake.push_get(Ok(json_callback(&legacy_body(1, "", 0, &[]))));
    fake.push_post(Ok(sentinel_body()));
    fake.push_post(Ok(paginated_body(
        "Capped",
        120,
        &[("Song (Remix)", &["A"]), ("Other", &[])],
    )));

    let list = client(&fake)
        .discover("https://y.qq.com/x?id=98765&foo=1", true)
        .await
        .unwrap();

    // truncated playlists are returned as a success
    assert_eq!(list.name, "Capped");
    assert_eq!(list.songs_count, 120);
    assert_eq!(list.songs, vec!["Song (Remix) - A", "Other - "]);
    assert_eq!(fake.posts().len(), 2);
}

#[tokio::test]
async fn test_discover_rejects_zero_id_without_fetching() {
    let fake = FakeTransport::new();

    let err = client(&fake)
        .discover("https://y.qq.com/n/ryqq/playlist/0", false)
        .await
        .unwrap_err();

    assert!(matches!(err, PlaylistError::InvalidLink(_)));
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn test_discover_reports_exhausted_fallbacks() {
    let fake = FakeTransport::new();
    fake.push_get(Err(PlaylistError::Http("down".to_string())));
    for _ in 0..7 {
        fake.push_post(Ok(sentinel_body()));
    }

    let err = client(&fake)
        .discover("https://y.qq.com/n/ryqq/playlist/5", false)
        .await
        .unwrap_err();

    assert!(matches!(err, PlaylistError::AllFetchStrategiesFailed(_)));
    assert!(!err.is_link_error());
}

#[tokio::test]
async fn test_discover_surfaces_malformed_paginated_body() {
    let fake = FakeTransport::new();
    fake.push_get(Err(PlaylistError::Http("down".to_string())));
    fake.push_post(Ok(b"<html>502</html>".to_vec()));

    let err = client(&fake)
        .discover("https://y.qq.com/n/ryqq/playlist/5", false)
        .await
        .unwrap_err();

    assert!(matches!(err, PlaylistError::MalformedProviderResponse(_)));
}

#[tokio::test]
async fn test_songlist_handler_success() {
    let fake = FakeTransport::new();
    fake.push_get(Ok(legacy_body(0, "Road Trip", 1, &[("One", &["A"])])));

    let (status, body) = songlist(
        Extension(Arc::new(client(&fake))),
        Form(SongListRequest {
            url: "https://y.qq.com/n/ryqq/playlist/1".to_string(),
            detailed: false,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.0.code, 1);
    assert_eq!(body.0.msg, "success");
    assert_eq!(body.0.data.as_ref().unwrap().songs, vec!["One - A"]);
}

#[tokio::test]
async fn test_songlist_handler_bad_link() {
    let fake = FakeTransport::new();

    let (status, body) = songlist(
        Extension(Arc::new(client(&fake))),
        Form(SongListRequest {
            url: "https://example.com/".to_string(),
            detailed: false,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.0.code, -1);
    assert!(body.0.data.is_none());
}

#[tokio::test]
async fn test_songlist_handler_provider_failure() {
    let fake = FakeTransport::new();
    fake.push_get(Err(PlaylistError::Http("down".to_string())));

    let (status, body) = songlist(
        Extension(Arc::new(client(&fake))),
        Form(SongListRequest {
            url: "https://y.qq.com/n/ryqq/playlist/1".to_string(),
            detailed: false,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.0.msg.contains("all fetch strategies failed"));
}
