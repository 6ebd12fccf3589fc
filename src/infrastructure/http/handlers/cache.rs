//! Cache Management Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::infrastructure::http::dto::{
    ApiResponse, CacheStatsResponse, ClearCacheRequest, ClearCacheResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 各类缓存统计
pub async fn cache_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<CacheStatsResponse>>, ApiError> {
    let caches = state.caches.stats().await?;
    let total_size_bytes = caches.iter().map(|s| s.total_size_bytes).sum();

    Ok(Json(ApiResponse::success(CacheStatsResponse {
        total_size_bytes,
        caches,
    })))
}

/// 清理指定类型的缓存，未指定时清理全部
pub async fn clear_cache(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ClearCacheRequest>,
) -> Result<Json<ApiResponse<ClearCacheResponse>>, ApiError> {
    let results = match req.kind {
        Some(kind) => vec![state.caches.clear(kind).await?],
        None => state.caches.clear_all().await?,
    };

    let removed: u64 = results.iter().map(|r| r.removed).sum();
    tracing::info!(kind = ?req.kind, removed, "Cache cleared via API");

    Ok(Json(ApiResponse::success(ClearCacheResponse { results })))
}
