//! Speech Audio Handlers

use axum::{
    extract::{Query, State},
    response::Response,
    Json,
};
use std::sync::Arc;

use super::file_response;
use crate::domain::SpeechLookup;
use crate::infrastructure::http::dto::{ApiResponse, SpeechLookupResponse, SpeechQuery};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 获取朗读音频，未缓存时从 TTS 服务下载
pub async fn get_speech(
    State(state): State<Arc<AppState>>,
    Query(req): Query<SpeechQuery>,
) -> Result<Response, ApiError> {
    let lookup = SpeechLookup::new(req.text, req.lang);
    let entry = state.caches.speech.resolve(&lookup).await?;

    file_response(&entry.path, Some("audio/mpeg"), &entry.key, entry.origin).await
}

/// 只查询缓存文件名与是否已缓存，不触发下载
pub async fn lookup_speech(
    State(state): State<Arc<AppState>>,
    Query(req): Query<SpeechQuery>,
) -> Result<Json<ApiResponse<SpeechLookupResponse>>, ApiError> {
    let lookup = SpeechLookup::new(req.text, req.lang);
    let key = state.caches.speech.key_for(&lookup)?;
    let cached = state.caches.speech.cached_path(&lookup)?.is_some();

    Ok(Json(ApiResponse::success(SpeechLookupResponse {
        file_name: key.into_string(),
        cached,
    })))
}
