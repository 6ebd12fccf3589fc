//! Ping Handler
//!
//! 健康检查，附带远程源探测结果

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::http::state::AppState;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// 远程源不可用时仍可服务已缓存内容
    pub remote_available: bool,
}

/// Ping endpoint - 健康检查
pub async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    let remote_available = state.caches.remote_available().await;
    if !remote_available {
        tracing::warn!("Remote source health check failed");
    }

    Json(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        remote_available,
    })
}
