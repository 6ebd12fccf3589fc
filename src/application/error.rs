//! 应用层错误定义
//!
//! 内容缓存对调用方暴露的统一错误类型

use thiserror::Error;

use crate::application::ports::{FetchError, StoreError};
use crate::domain::DomainError;

/// 内容缓存错误
#[derive(Debug, Error)]
pub enum ContentCacheError {
    /// 输入校验失败，未做任何 I/O
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// 本地条目不存在
    #[error("Cache entry not found: {0}")]
    NotFound(String),

    /// 磁盘操作失败（权限、磁盘满等）
    #[error("IO failure: {0}")]
    IoFailure(String),

    /// 传输层失败
    #[error("Network error: {0}")]
    NetworkError(String),

    /// 远程返回非 200 状态
    #[error("Download failed with HTTP status {status}")]
    DownloadFailed { status: u16 },

    /// 下载内容无法解码为图片
    #[error("Invalid image data: {0}")]
    InvalidImageData(String),
}

impl ContentCacheError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// 下载失败时的 HTTP 状态码
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::DownloadFailed { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<DomainError> for ContentCacheError {
    fn from(err: DomainError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

impl From<StoreError> for ContentCacheError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(key) => Self::NotFound(key),
            StoreError::IoFailure(msg) => Self::IoFailure(msg),
        }
    }
}

impl From<FetchError> for ContentCacheError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::NetworkError(msg) => Self::NetworkError(msg),
            FetchError::Timeout => Self::NetworkError("request timed out".to_string()),
            FetchError::DownloadFailed { status } => Self::DownloadFailed { status },
        }
    }
}
