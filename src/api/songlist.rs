use std::sync::Arc;

use axum::{Extension, Form, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{qqmusic::QqMusic, types::SongList};

#[derive(Debug, Clone, Deserialize)]
pub struct SongListRequest {
    pub url: String,
    #[serde(default)]
    pub detailed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongListResponse {
    pub code: i32,
    pub msg: String,
    pub data: Option<SongList>,
}

pub async fn songlist(
    Extension(client): Extension<Arc<QqMusic>>,
    Form(request): Form<SongListRequest>,
) -> (StatusCode, Json<SongListResponse>) {
    match client.discover(&request.url, request.detailed).await {
        Ok(list) => (
            StatusCode::OK,
            Json(SongListResponse {
                code: 1,
                msg: "success".to_string(),
                data: Some(list),
            }),
        ),
        Err(e) => {
            warn!(url = %request.url, error = %e, "songlist request failed");
            let status = if e.is_link_error() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::BAD_GATEWAY
            };
            (
                status,
                Json(SongListResponse {
                    code: -1,
                    msg: e.to_string(),
                    data: None,
                }),
            )
        }
    }
}
