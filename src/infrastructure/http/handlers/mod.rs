//! HTTP Handlers

mod cache;
mod image;
mod ping;
mod preview;
mod speech;

pub use cache::*;
pub use image::*;
pub use ping::*;
pub use preview::*;
pub use speech::*;

use axum::{
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
};
use std::path::Path;
use url::Url;

use crate::application::CacheOrigin;
use crate::domain::CacheKey;
use crate::infrastructure::http::error::ApiError;

/// 响应对应的缓存文件名
pub const CACHE_KEY_HEADER: HeaderName = HeaderName::from_static("x-cache-key");
/// 命中来源：memory / disk / remote
pub const CACHE_ORIGIN_HEADER: HeaderName = HeaderName::from_static("x-cache-origin");

pub(crate) fn parse_url(raw: &str) -> Result<Url, ApiError> {
    Url::parse(raw.trim()).map_err(|e| ApiError::BadRequest(format!("Invalid url '{}': {}", raw, e)))
}

/// 读取已解析出的缓存文件并作为二进制响应返回
pub(crate) async fn file_response(
    path: &Path,
    content_type: Option<&'static str>,
    key: &CacheKey,
    origin: CacheOrigin,
) -> Result<Response, ApiError> {
    let data = tokio::fs::read(path)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to read cache file {}: {}", key, e)))?;

    let content_type = content_type.unwrap_or_else(|| {
        ::image::guess_format(&data)
            .map(|format| format.to_mime_type())
            .unwrap_or("application/octet-stream")
    });
    let key_value = HeaderValue::from_str(key.as_str())
        .map_err(|e| ApiError::Internal(format!("Invalid cache key header: {}", e)))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(content_type)),
            (CACHE_KEY_HEADER, key_value),
            (CACHE_ORIGIN_HEADER, HeaderValue::from_static(origin.as_str())),
        ],
        data,
    )
        .into_response())
}
