//! Bootstrap - 组合根
//!
//! 按配置构造三种内容缓存（各一个实例），共享同一个下载器

use std::sync::Arc;
use thiserror::Error;

use crate::application::ports::{FetchError, RemoteFetcherPort, StoreError};
use crate::application::{
    ContentCache, ContentCaches, DecodedImage, PreviewAudioAsset, SpeechAudioAsset, StockImageAsset,
    TtsEndpoint,
};
use crate::config::AppConfig;
use crate::infrastructure::adapters::{
    FakeRemoteFetcher, FileCacheStore, HttpFetcherConfig, HttpRemoteFetcher,
};
use crate::infrastructure::memory::LruMemoryCache;

/// 启动错误
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Invalid TTS endpoint: {0}")]
    InvalidEndpoint(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// 构造下载器；离线模式下所有远程请求都失败，只使用已有缓存
pub fn build_fetcher(
    config: &AppConfig,
    endpoint: &TtsEndpoint,
) -> Result<Arc<dyn RemoteFetcherPort>, BootstrapError> {
    if config.fetch.offline {
        tracing::warn!("Offline mode enabled, remote fetches are disabled");
        return Ok(Arc::new(FakeRemoteFetcher::offline()));
    }

    let fetcher_config = HttpFetcherConfig::default()
        .with_timeout(config.fetch.timeout_secs)
        .with_user_agent(config.fetch.user_agent.clone());
    let mut fetcher = HttpRemoteFetcher::new(fetcher_config)?;
    if let Ok(root) = endpoint.base.join("/") {
        fetcher = fetcher.with_health_url(root);
    }

    Ok(Arc::new(fetcher))
}

/// 构造全部内容缓存
pub async fn build_caches(config: &AppConfig) -> Result<ContentCaches, BootstrapError> {
    let endpoint = TtsEndpoint::parse(&config.tts.endpoint, config.tts.client.clone())
        .map_err(|e| BootstrapError::InvalidEndpoint(e.to_string()))?;
    let fetcher = build_fetcher(config, &endpoint)?;

    build_caches_with_fetcher(config, endpoint, fetcher).await
}

/// 使用指定下载器构造全部内容缓存
pub async fn build_caches_with_fetcher(
    config: &AppConfig,
    endpoint: TtsEndpoint,
    fetcher: Arc<dyn RemoteFetcherPort>,
) -> Result<ContentCaches, BootstrapError> {
    let audio_store = FileCacheStore::new(config.cache.audio_path()).await?;
    let image_store = FileCacheStore::new(config.cache.image_path()).await?;
    let preview_store = FileCacheStore::new(config.cache.preview_path()).await?;

    let speech = ContentCache::new(
        SpeechAudioAsset::new(endpoint),
        Arc::new(audio_store),
        fetcher.clone(),
    );

    let image_memory = Arc::new(LruMemoryCache::<DecodedImage>::new(
        config.cache.memory_max_entries,
        config.cache.memory_max_cost_bytes,
    ));
    let images = ContentCache::new(StockImageAsset, Arc::new(image_store), fetcher.clone())
        .with_memory(image_memory);

    let previews = ContentCache::new(PreviewAudioAsset, Arc::new(preview_store), fetcher);

    tracing::info!(
        root_dir = %config.cache.root_dir.display(),
        "Content caches initialized"
    );

    Ok(ContentCaches::new(speech.arc(), images.arc(), previews.arc()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SpeechLookup;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_build_caches_creates_directories() {
        let dir = tempdir().unwrap();
        let mut config = AppConfig::default();
        config.cache.root_dir = dir.path().to_path_buf();
        config.fetch.offline = true;

        let caches = build_caches(&config).await.unwrap();

        assert!(dir.path().join("AudioCache").is_dir());
        assert!(dir.path().join("ImageCache").is_dir());
        assert!(dir.path().join("PreviewAudioCache").is_dir());
        assert_eq!(caches.total_size_bytes().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_offline_mode_serves_only_cached_entries() {
        let dir = tempdir().unwrap();
        let mut config = AppConfig::default();
        config.cache.root_dir = dir.path().to_path_buf();
        config.fetch.offline = true;

        let caches = build_caches(&config).await.unwrap();
        let lookup = SpeechLookup::new("Hola", "es");

        let err = caches.speech.resolve(&lookup).await.unwrap_err();
        assert!(matches!(
            err,
            crate::application::ContentCacheError::NetworkError(_)
        ));

        let key = caches.speech.key_for(&lookup).unwrap();
        std::fs::write(dir.path().join("AudioCache").join(key.as_str()), b"mp3").unwrap();
        assert!(caches.speech.resolve(&lookup).await.is_ok());
    }

    #[tokio::test]
    async fn test_clear_all_kinds() {
        let dir = tempdir().unwrap();
        let mut config = AppConfig::default();
        config.cache.root_dir = dir.path().to_path_buf();
        let endpoint = TtsEndpoint::parse(&config.tts.endpoint, "tw-ob").unwrap();
        let fetcher = Arc::new(FakeRemoteFetcher::returning(b"bytes".to_vec()));

        let caches = build_caches_with_fetcher(&config, endpoint, fetcher)
            .await
            .unwrap();
        caches.speech.resolve(&SpeechLookup::new("uno", "es")).await.unwrap();
        caches
            .previews
            .resolve(&url::Url::parse("https://v.example.com/p/alloy.mp3").unwrap())
            .await
            .unwrap();

        let results = caches.clear_all().await.unwrap();
        let removed: u64 = results.iter().map(|r| r.removed).sum();
        assert_eq!(removed, 2);
        assert_eq!(caches.total_size_bytes().await.unwrap(), 0);
    }
}
