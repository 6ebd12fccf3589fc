//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（CacheStore、RemoteFetcher、MemoryCache）
//! - assets: 语音 / 图片 / 试听三种资产策略
//! - content_cache: 通用缓存旁路编排（命中、未命中、修复）
//! - caches: 三种具体缓存及其组合
//! - error: 应用层错误定义

pub mod assets;
pub mod caches;
pub mod content_cache;
pub mod error;
pub mod ports;

pub use assets::{
    AssetStrategy, DecodedImage, PreviewAudioAsset, SpeechAudioAsset, StockImageAsset,
    TtsEndpoint,
};
pub use caches::{
    ClearResult, ContentCaches, PreviewAudioCache, SpeechAudioCache, StockImageCache,
};
pub use content_cache::{CacheOrigin, CacheStats, CachedAsset, ContentCache, ResolvedEntry};
pub use error::ContentCacheError;
pub use ports::{
    CacheStorePort, FetchError, FetchRequest, MemoryCachePort, RemoteFetcherPort, StoreError,
};
