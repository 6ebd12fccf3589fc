//! Preview Audio Handlers

use axum::{
    extract::{Query, State},
    response::Response,
};
use std::sync::Arc;

use super::{file_response, parse_url};
use crate::infrastructure::http::dto::UrlQuery;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 获取试听音频
pub async fn get_preview(
    State(state): State<Arc<AppState>>,
    Query(req): Query<UrlQuery>,
) -> Result<Response, ApiError> {
    let url = parse_url(&req.url)?;
    let entry = state.caches.previews.resolve(&url).await?;

    file_response(&entry.path, Some("audio/mpeg"), &entry.key, entry.origin).await
}
