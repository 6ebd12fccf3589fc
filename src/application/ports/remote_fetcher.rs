//! Remote Fetcher Port - 远程资源下载
//!
//! 缓存未命中时获取原始字节。每次调用都是独立的网络往返，不做请求合并

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// 下载错误
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Download failed with HTTP status {status}")]
    DownloadFailed { status: u16 },
}

/// 下载请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: Url,
    /// Accept 头
    pub accept: &'static str,
}

impl FetchRequest {
    pub fn new(url: Url, accept: &'static str) -> Self {
        Self { url, accept }
    }
}

/// Remote Fetcher Port
#[async_trait]
pub trait RemoteFetcherPort: Send + Sync {
    /// 下载完整响应体；非 200 状态返回 `DownloadFailed`
    async fn fetch(&self, request: &FetchRequest) -> Result<Vec<u8>, FetchError>;

    /// 检查远程服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
