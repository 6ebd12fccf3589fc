//! Content Cache - 缓存旁路编排
//!
//! 一次查询的完整流程：
//! 1. 派生 key，输入无效直接失败（不做 I/O）
//! 2. 内存层（仅图片）→ 磁盘，命中即返回，不访问网络
//! 3. 未命中：远程下载 → 解码校验 → 写盘 → 写内存层 → 返回
//! 4. 修复（仅 URL 类资产）：记录的本地文件丢失但仍有远程 URL 时重新下载，
//!    返回新的 key 供调用方更新外部记录；任何失败都转为 `None`
//!
//! 同一 key 的并发未命中不做合并，各自下载、各自写入，后写者胜出

use serde::Serialize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use url::Url;

use crate::application::assets::AssetStrategy;
use crate::application::error::ContentCacheError;
use crate::application::ports::{
    CacheStorePort, MemoryCachePort, RemoteFetcherPort, StoreError,
};
use crate::domain::{AssetKind, CacheKey, StaleReference};

/// 结果来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheOrigin {
    Memory,
    Disk,
    Remote,
}

impl CacheOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Disk => "disk",
            Self::Remote => "remote",
        }
    }
}

/// 解析到本地路径的条目（不读取内容）
#[derive(Debug, Clone)]
pub struct ResolvedEntry {
    pub key: CacheKey,
    pub path: PathBuf,
    pub origin: CacheOrigin,
}

/// 已解码的缓存资产
#[derive(Debug, Clone)]
pub struct CachedAsset<A> {
    pub key: CacheKey,
    pub path: PathBuf,
    pub origin: CacheOrigin,
    pub asset: A,
}

/// 缓存统计信息
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub kind: AssetKind,
    pub entries: u64,
    pub total_size_bytes: u64,
    pub memory_entries: usize,
    pub memory_cost_bytes: usize,
    pub hit_count: u64,
    pub miss_count: u64,
    pub fetch_count: u64,
}

/// 通用内容缓存
pub struct ContentCache<S: AssetStrategy> {
    strategy: S,
    store: Arc<dyn CacheStorePort>,
    fetcher: Arc<dyn RemoteFetcherPort>,
    memory: Option<Arc<dyn MemoryCachePort<S::Asset>>>,
    hit_count: AtomicU64,
    miss_count: AtomicU64,
    fetch_count: AtomicU64,
}

impl<S: AssetStrategy> ContentCache<S> {
    pub fn new(
        strategy: S,
        store: Arc<dyn CacheStorePort>,
        fetcher: Arc<dyn RemoteFetcherPort>,
    ) -> Self {
        Self {
            strategy,
            store,
            fetcher,
            memory: None,
            hit_count: AtomicU64::new(0),
            miss_count: AtomicU64::new(0),
            fetch_count: AtomicU64::new(0),
        }
    }

    /// 在磁盘前叠加内存层
    pub fn with_memory(mut self, memory: Arc<dyn MemoryCachePort<S::Asset>>) -> Self {
        self.memory = Some(memory);
        self
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn kind(&self) -> AssetKind {
        self.strategy.kind()
    }

    /// 远程源是否可用（共享下载器的健康检查）
    pub async fn remote_available(&self) -> bool {
        self.fetcher.health_check().await
    }

    pub fn key_for(&self, lookup: &S::Lookup) -> Result<CacheKey, ContentCacheError> {
        self.strategy.derive_key(lookup)
    }

    /// 已缓存时返回本地路径，只做 stat
    pub fn cached_path(&self, lookup: &S::Lookup) -> Result<Option<PathBuf>, ContentCacheError> {
        let key = self.strategy.derive_key(lookup)?;
        Ok(self
            .store
            .exists(&key)
            .then(|| self.store.path_for(&key)))
    }

    /// 解析为本地路径
    ///
    /// 命中时直接返回路径，不读取文件；未命中时下载并落盘
    pub async fn resolve(&self, lookup: &S::Lookup) -> Result<ResolvedEntry, ContentCacheError> {
        let key = self.strategy.derive_key(lookup)?;

        if self.store.exists(&key) {
            self.hit_count.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(kind = %self.kind(), key = %key, "Cache hit");
            let path = self.store.path_for(&key);
            return Ok(ResolvedEntry {
                key,
                path,
                origin: CacheOrigin::Disk,
            });
        }

        let (path, _) = self.fetch_and_store(&key, lookup).await?;
        Ok(ResolvedEntry {
            key,
            path,
            origin: CacheOrigin::Remote,
        })
    }

    /// 加载并解码资产：内存 → 磁盘 → 远程
    pub async fn load(
        &self,
        lookup: &S::Lookup,
    ) -> Result<CachedAsset<S::Asset>, ContentCacheError> {
        let key = self.strategy.derive_key(lookup)?;

        if let Some(cached) = self.load_local(&key).await? {
            return Ok(cached);
        }

        let (path, asset) = self.fetch_and_store(&key, lookup).await?;
        Ok(CachedAsset {
            key,
            path,
            origin: CacheOrigin::Remote,
            asset,
        })
    }

    /// 删除单个条目（磁盘 + 内存）
    pub async fn remove(&self, lookup: &S::Lookup) -> Result<bool, ContentCacheError> {
        let key = self.strategy.derive_key(lookup)?;
        if let Some(memory) = &self.memory {
            memory.remove(key.as_str());
        }
        let removed = self.store.delete(&key).await?;
        tracing::debug!(kind = %self.kind(), key = %key, removed, "Cache entry removed");
        Ok(removed)
    }

    /// 清空缓存，返回删除的文件数
    pub async fn clear(&self) -> Result<u64, ContentCacheError> {
        if let Some(memory) = &self.memory {
            memory.clear();
        }
        let removed = self.store.clear_all().await?;
        tracing::info!(kind = %self.kind(), removed, "Cache cleared");
        Ok(removed)
    }

    pub async fn total_size_bytes(&self) -> Result<u64, ContentCacheError> {
        Ok(self.store.total_size_bytes().await?)
    }

    pub async fn stats(&self) -> Result<CacheStats, ContentCacheError> {
        let (memory_entries, memory_cost_bytes) = self
            .memory
            .as_ref()
            .map(|m| (m.len(), m.total_cost()))
            .unwrap_or((0, 0));

        Ok(CacheStats {
            kind: self.kind(),
            entries: self.store.entry_count().await?,
            total_size_bytes: self.store.total_size_bytes().await?,
            memory_entries,
            memory_cost_bytes,
            hit_count: self.hit_count.load(Ordering::Relaxed),
            miss_count: self.miss_count.load(Ordering::Relaxed),
            fetch_count: self.fetch_count.load(Ordering::Relaxed),
        })
    }

    /// 内存或磁盘命中；磁盘内容无法解码时删除并视为未命中
    async fn load_local(
        &self,
        key: &CacheKey,
    ) -> Result<Option<CachedAsset<S::Asset>>, ContentCacheError> {
        if let Some(asset) = self.memory_get(key) {
            self.hit_count.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(kind = %self.kind(), key = %key, "Memory cache hit");
            return Ok(Some(CachedAsset {
                key: key.clone(),
                path: self.store.path_for(key),
                origin: CacheOrigin::Memory,
                asset,
            }));
        }

        if !self.store.exists(key) {
            return Ok(None);
        }

        let data = match self.store.read(key).await {
            Ok(data) => data,
            // exists 与 read 之间被删除
            Err(StoreError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match self.strategy.decode(&data) {
            Ok(asset) => {
                self.hit_count.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(kind = %self.kind(), key = %key, "Cache hit");
                self.memory_put(key, &asset);
                Ok(Some(CachedAsset {
                    key: key.clone(),
                    path: self.store.path_for(key),
                    origin: CacheOrigin::Disk,
                    asset,
                }))
            }
            Err(e) => {
                tracing::warn!(
                    kind = %self.kind(),
                    key = %key,
                    error = %e,
                    "Corrupt cache entry, refetching"
                );
                self.store.delete(key).await?;
                Ok(None)
            }
        }
    }

    /// 未命中路径：下载 → 解码 → 写盘 → 写内存
    ///
    /// 只有拿到完整且解码成功的内容后才写盘，失败不会留下文件
    async fn fetch_and_store(
        &self,
        key: &CacheKey,
        lookup: &S::Lookup,
    ) -> Result<(PathBuf, S::Asset), ContentCacheError> {
        self.miss_count.fetch_add(1, Ordering::Relaxed);
        let request = self.strategy.remote_request(lookup)?;

        tracing::info!(
            kind = %self.kind(),
            key = %key,
            url = %request.url,
            "Cache miss, fetching remote asset"
        );

        self.fetch_count.fetch_add(1, Ordering::Relaxed);
        let data = self.fetcher.fetch(&request).await.map_err(|e| {
            tracing::warn!(kind = %self.kind(), key = %key, error = %e, "Remote fetch failed");
            ContentCacheError::from(e)
        })?;

        let asset = self.strategy.decode(&data)?;
        let path = self.store.write(key, &data).await?;
        self.memory_put(key, &asset);

        tracing::debug!(
            kind = %self.kind(),
            key = %key,
            size_bytes = data.len(),
            "Asset cached"
        );

        Ok((path, asset))
    }

    fn memory_get(&self, key: &CacheKey) -> Option<S::Asset> {
        self.memory.as_ref().and_then(|m| m.get(key.as_str()))
    }

    fn memory_put(&self, key: &CacheKey, asset: &S::Asset) {
        if let Some(memory) = &self.memory {
            memory.put(key.to_string(), asset.clone(), self.strategy.cost(asset));
        }
    }
}

impl<S> ContentCache<S>
where
    S: AssetStrategy<Lookup = Url>,
{
    /// 修复失效的本地引用
    ///
    /// - 记录的文件仍在：直接返回
    /// - 文件丢失且有远程 URL：重新下载，按 URL 派生的 key 落盘并返回
    /// - 否则返回 `None`；修复失败只记日志，不向调用方抛错
    pub async fn repair(&self, stale: &StaleReference) -> Option<CachedAsset<S::Asset>> {
        if let Some(name) = &stale.file_name {
            match CacheKey::parse(name.clone()) {
                Ok(key) if !self.store.exists(&key) => {
                    tracing::debug!(kind = %self.kind(), key = %key, "Recorded cache file missing")
                }
                Ok(key) => match self.load_local(&key).await {
                    Ok(Some(cached)) => return Some(cached),
                    Ok(None) => {
                        tracing::debug!(kind = %self.kind(), key = %key, "Recorded cache file discarded")
                    }
                    Err(e) => {
                        tracing::warn!(kind = %self.kind(), key = %key, error = %e, "Failed to read recorded cache file")
                    }
                },
                Err(e) => {
                    tracing::warn!(kind = %self.kind(), error = %e, "Ignoring invalid recorded file name")
                }
            }
        }

        let remote_url = stale.remote_url.as_ref()?;

        // 修复结果必须落在磁盘上，内存里残留的同 key 条目不算
        if let Ok(key) = self.strategy.derive_key(remote_url) {
            if !self.store.exists(&key) {
                if let Some(memory) = &self.memory {
                    memory.remove(key.as_str());
                }
            }
        }

        match self.load(remote_url).await {
            Ok(cached) => {
                tracing::info!(
                    kind = %self.kind(),
                    old_file = ?stale.file_name,
                    key = %cached.key,
                    "Cache entry repaired"
                );
                Some(cached)
            }
            Err(e) => {
                tracing::warn!(
                    kind = %self.kind(),
                    url = %remote_url,
                    error = %e,
                    "Cache repair failed"
                );
                None
            }
        }
    }
}
