//! Stock Image Handlers

use axum::{
    extract::{Query, State},
    response::Response,
    Json,
};
use std::sync::Arc;

use super::{file_response, parse_url};
use crate::domain::StaleReference;
use crate::infrastructure::http::dto::{
    ApiResponse, ImageInfoResponse, RemoveImageRequest, RemoveResponse, RepairImageRequest,
    RepairImageResponse, UrlQuery,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 获取图片原始字节
///
/// 走内存层；磁盘命中会提升到内存
pub async fn get_image(
    State(state): State<Arc<AppState>>,
    Query(req): Query<UrlQuery>,
) -> Result<Response, ApiError> {
    let url = parse_url(&req.url)?;
    let cached = state.caches.images.load(&url).await?;

    if cached.path.is_file() {
        let content_type = Some(cached.asset.mime_type());
        return file_response(&cached.path, content_type, &cached.key, cached.origin).await;
    }

    // 内存命中但磁盘文件已被外部删除，重新落盘
    tracing::debug!(key = %cached.key, "Memory hit without disk file, resolving again");
    let entry = state.caches.images.resolve(&url).await?;
    file_response(&entry.path, None, &entry.key, entry.origin).await
}

/// 解码图片并返回尺寸信息（经过内存层）
pub async fn image_info(
    State(state): State<Arc<AppState>>,
    Query(req): Query<UrlQuery>,
) -> Result<Json<ApiResponse<ImageInfoResponse>>, ApiError> {
    let url = parse_url(&req.url)?;
    let cached = state.caches.images.load(&url).await?;

    Ok(Json(ApiResponse::success(ImageInfoResponse {
        file_name: cached.key.into_string(),
        origin: cached.origin.as_str(),
        width: cached.asset.width,
        height: cached.asset.height,
        mime_type: cached.asset.mime_type(),
    })))
}

/// 删除图片缓存（内存 + 磁盘）
pub async fn remove_image(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RemoveImageRequest>,
) -> Result<Json<ApiResponse<RemoveResponse>>, ApiError> {
    let url = parse_url(&req.url)?;
    let removed = state.caches.images.remove(&url).await?;

    Ok(Json(ApiResponse::success(RemoveResponse { removed })))
}

/// 修复客户端记录的失效图片引用
///
/// 修复失败不视为错误，返回 `available = false`
pub async fn repair_image(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RepairImageRequest>,
) -> Result<Json<ApiResponse<RepairImageResponse>>, ApiError> {
    let remote_url = req.remote_url.as_deref().map(parse_url).transpose()?;
    let stale = StaleReference::new(req.file_name.clone(), remote_url);

    let response = match state.caches.images.repair(&stale).await {
        Some(cached) => {
            let file_name = cached.key.into_string();
            RepairImageResponse {
                available: true,
                changed: req.file_name.as_deref() != Some(file_name.as_str()),
                file_name: Some(file_name),
            }
        }
        None => RepairImageResponse {
            available: false,
            file_name: None,
            changed: req.file_name.is_some(),
        },
    };

    Ok(Json(ApiResponse::success(response)))
}
