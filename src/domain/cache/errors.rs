//! Cache Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("文本不能为空")]
    EmptyText,

    #[error("无效的语言代码: {0:?}")]
    InvalidLanguageCode(String),

    #[error("无效的缓存 key: {0:?}")]
    InvalidKey(String),
}
