//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::{CacheStats, ClearResult};
use crate::domain::AssetKind;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// Speech DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SpeechQuery {
    pub text: String,
    pub lang: String,
}

#[derive(Debug, Serialize)]
pub struct SpeechLookupResponse {
    pub file_name: String,
    pub cached: bool,
}

// ============================================================================
// Image / Preview DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct UrlQuery {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct RemoveImageRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct RemoveResponse {
    pub removed: bool,
}

#[derive(Debug, Serialize)]
pub struct ImageInfoResponse {
    pub file_name: String,
    pub origin: &'static str,
    pub width: u32,
    pub height: u32,
    pub mime_type: &'static str,
}

/// 客户端持久化的旧引用
#[derive(Debug, Default, Deserialize)]
pub struct RepairImageRequest {
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub remote_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RepairImageResponse {
    pub available: bool,
    pub file_name: Option<String>,
    /// 文件名与请求中记录的不同，客户端应更新引用
    pub changed: bool,
}

// ============================================================================
// Cache DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CacheStatsResponse {
    pub total_size_bytes: u64,
    pub caches: Vec<CacheStats>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ClearCacheRequest {
    /// 为空时清理全部缓存
    #[serde(default)]
    pub kind: Option<AssetKind>,
}

#[derive(Debug, Serialize)]
pub struct ClearCacheResponse {
    pub results: Vec<ClearResult>,
}
