//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                GET   健康检查
//! - /api/speech              GET   朗读音频（text, lang）
//! - /api/speech/lookup       GET   查询朗读音频缓存文件名
//! - /api/image               GET   图片原始字节（url）
//! - /api/image/info          GET   图片解码信息（url）
//! - /api/image/remove        POST  删除图片缓存
//! - /api/image/repair        POST  修复失效的图片引用
//! - /api/preview             GET   试听音频（url）
//! - /api/cache/stats         GET   缓存统计
//! - /api/cache/clear         POST  清理缓存

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/speech", speech_routes())
        .nest("/image", image_routes())
        .route("/preview", get(handlers::get_preview))
        .nest("/cache", cache_routes())
}

/// Speech 路由
fn speech_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::get_speech))
        .route("/lookup", get(handlers::lookup_speech))
}

/// Image 路由
fn image_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::get_image))
        .route("/info", get(handlers::image_info))
        .route("/remove", post(handlers::remove_image))
        .route("/repair", post(handlers::repair_image))
}

/// Cache 路由
fn cache_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stats", get(handlers::cache_stats))
        .route("/clear", post(handlers::clear_cache))
}
