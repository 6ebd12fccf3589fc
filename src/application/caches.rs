//! 三种资产缓存的具体类型与组合
//!
//! 每种资产一个实例，在启动时构造一次，通过 `Arc` 注入使用方

use serde::Serialize;
use std::sync::Arc;

use crate::application::assets::{PreviewAudioAsset, SpeechAudioAsset, StockImageAsset};
use crate::application::content_cache::{CacheStats, ContentCache};
use crate::application::error::ContentCacheError;
use crate::domain::AssetKind;

pub type SpeechAudioCache = ContentCache<SpeechAudioAsset>;
pub type StockImageCache = ContentCache<StockImageAsset>;
pub type PreviewAudioCache = ContentCache<PreviewAudioAsset>;

/// 单类缓存的清理结果
#[derive(Debug, Clone, Serialize)]
pub struct ClearResult {
    pub kind: AssetKind,
    pub removed: u64,
}

/// 全部内容缓存
#[derive(Clone)]
pub struct ContentCaches {
    pub speech: Arc<SpeechAudioCache>,
    pub images: Arc<StockImageCache>,
    pub previews: Arc<PreviewAudioCache>,
}

impl ContentCaches {
    pub fn new(
        speech: Arc<SpeechAudioCache>,
        images: Arc<StockImageCache>,
        previews: Arc<PreviewAudioCache>,
    ) -> Self {
        Self {
            speech,
            images,
            previews,
        }
    }

    pub async fn stats(&self) -> Result<Vec<CacheStats>, ContentCacheError> {
        Ok(vec![
            self.speech.stats().await?,
            self.images.stats().await?,
            self.previews.stats().await?,
        ])
    }

    pub async fn clear(&self, kind: AssetKind) -> Result<ClearResult, ContentCacheError> {
        let removed = match kind {
            AssetKind::SpeechAudio => self.speech.clear().await?,
            AssetKind::Image => self.images.clear().await?,
            AssetKind::PreviewAudio => self.previews.clear().await?,
        };
        Ok(ClearResult { kind, removed })
    }

    pub async fn clear_all(&self) -> Result<Vec<ClearResult>, ContentCacheError> {
        let mut results = Vec::with_capacity(AssetKind::ALL.len());
        for kind in AssetKind::ALL {
            results.push(self.clear(kind).await?);
        }
        Ok(results)
    }

    /// 三种缓存共享同一个下载器，探测任意一个即可
    pub async fn remote_available(&self) -> bool {
        self.speech.remote_available().await
    }

    /// 所有缓存目录的总大小
    pub async fn total_size_bytes(&self) -> Result<u64, ContentCacheError> {
        Ok(self.speech.total_size_bytes().await?
            + self.images.total_size_bytes().await?
            + self.previews.total_size_bytes().await?)
    }
}
