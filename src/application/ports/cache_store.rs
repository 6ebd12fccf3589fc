//! Cache Store Port - 磁盘缓存存储
//!
//! 每种资产类型一个目录，key 即文件名，目录内容即全部索引（无 manifest）

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::CacheKey;

/// 存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Cache entry not found: {0}")]
    NotFound(String),

    #[error("IO failure: {0}")]
    IoFailure(String),
}

impl StoreError {
    /// 区分"文件不存在"与其它 I/O 错误（权限、磁盘满、路径过长等）
    pub fn from_io(key: &CacheKey, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(key.to_string())
        } else {
            Self::IoFailure(err.to_string())
        }
    }
}

/// Cache Store Port
///
/// 写入只发生在确认未命中之后；并发写同一 key 时后写者胜出，
/// 实现必须保证读者看不到半写入的文件
#[async_trait]
pub trait CacheStorePort: Send + Sync {
    /// key 对应的本地路径（不检查是否存在）
    fn path_for(&self, key: &CacheKey) -> PathBuf;

    /// 文件是否存在，无副作用
    fn exists(&self, key: &CacheKey) -> bool;

    /// 读取文件内容，不存在时返回 `NotFound`
    async fn read(&self, key: &CacheKey) -> Result<Vec<u8>, StoreError>;

    /// 写入完整内容并返回本地路径，必要时创建目录
    async fn write(&self, key: &CacheKey, data: &[u8]) -> Result<PathBuf, StoreError>;

    /// 删除单个条目，返回是否确实删除了文件；不存在时为 no-op
    async fn delete(&self, key: &CacheKey) -> Result<bool, StoreError>;

    /// 删除所有条目，返回删除数量
    async fn clear_all(&self) -> Result<u64, StoreError>;

    /// 所有条目的文件大小之和，读不到的条目跳过
    async fn total_size_bytes(&self) -> Result<u64, StoreError>;

    /// 条目数量
    async fn entry_count(&self) -> Result<u64, StoreError>;
}
