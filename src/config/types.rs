//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 缓存目录与内存层配置
    #[serde(default)]
    pub cache: CacheConfig,

    /// 远程下载配置
    #[serde(default)]
    pub fetch: FetchConfig,

    /// TTS 服务配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8787
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 缓存配置
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// 缓存根目录
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// 语音缓存子目录
    #[serde(default = "default_audio_dir")]
    pub audio_dir: String,

    /// 图片缓存子目录
    #[serde(default = "default_image_dir")]
    pub image_dir: String,

    /// 试听音频缓存子目录
    #[serde(default = "default_preview_dir")]
    pub preview_dir: String,

    /// 图片内存缓存最大条目数
    #[serde(default = "default_memory_max_entries")]
    pub memory_max_entries: usize,

    /// 图片内存缓存最大成本（字节）
    #[serde(default = "default_memory_max_cost_bytes")]
    pub memory_max_cost_bytes: usize,
}

fn default_root_dir() -> PathBuf {
    PathBuf::from("data/cache")
}

fn default_audio_dir() -> String {
    "AudioCache".to_string()
}

fn default_image_dir() -> String {
    "ImageCache".to_string()
}

fn default_preview_dir() -> String {
    "PreviewAudioCache".to_string()
}

fn default_memory_max_entries() -> usize {
    100
}

fn default_memory_max_cost_bytes() -> usize {
    50 * 1024 * 1024 // 50 MB
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            audio_dir: default_audio_dir(),
            image_dir: default_image_dir(),
            preview_dir: default_preview_dir(),
            memory_max_entries: default_memory_max_entries(),
            memory_max_cost_bytes: default_memory_max_cost_bytes(),
        }
    }
}

impl CacheConfig {
    pub fn audio_path(&self) -> PathBuf {
        self.root_dir.join(&self.audio_dir)
    }

    pub fn image_path(&self) -> PathBuf {
        self.root_dir.join(&self.image_dir)
    }

    pub fn preview_path(&self) -> PathBuf {
        self.root_dir.join(&self.preview_dir)
    }
}

/// 远程下载配置
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// 请求超时时间（秒）
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,

    /// User-Agent 头
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// 离线模式：不访问网络，只使用已有缓存
    #[serde(default)]
    pub offline: bool,
}

fn default_fetch_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    crate::infrastructure::adapters::DEFAULT_USER_AGENT.to_string()
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout(),
            user_agent: default_user_agent(),
            offline: false,
        }
    }
}

/// TTS 服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    /// 合成接口地址
    #[serde(default = "default_tts_endpoint")]
    pub endpoint: String,

    /// client 参数
    #[serde(default = "default_tts_client")]
    pub client: String,
}

fn default_tts_endpoint() -> String {
    "https://translate.google.com/translate_tts".to_string()
}

fn default_tts_client() -> String {
    "tw-ob".to_string()
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            endpoint: default_tts_endpoint(),
            client: default_tts_client(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8787);
        assert_eq!(config.fetch.timeout_secs, 30);
        assert_eq!(config.cache.memory_max_entries, 100);
        assert_eq!(config.cache.memory_max_cost_bytes, 50 * 1024 * 1024);
        assert!(!config.fetch.offline);
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:8787");
    }

    #[test]
    fn test_cache_paths() {
        let config = CacheConfig::default();
        assert_eq!(config.audio_path(), PathBuf::from("data/cache/AudioCache"));
        assert_eq!(config.image_path(), PathBuf::from("data/cache/ImageCache"));
        assert_eq!(
            config.preview_path(),
            PathBuf::from("data/cache/PreviewAudioCache")
        );
    }
}
