//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `LINGOCACHE_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `LINGOCACHE_SERVER__PORT=8080`
/// - `LINGOCACHE_CACHE__ROOT_DIR=/var/lib/lingocache`
/// - `LINGOCACHE_FETCH__TIMEOUT_SECS=10`
/// - `LINGOCACHE_FETCH__OFFLINE=true`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8787)?
        .set_default("cache.root_dir", "data/cache")?
        .set_default("cache.audio_dir", "AudioCache")?
        .set_default("cache.image_dir", "ImageCache")?
        .set_default("cache.preview_dir", "PreviewAudioCache")?
        .set_default("cache.memory_max_entries", 100)?
        .set_default("cache.memory_max_cost_bytes", 50_u64 * 1024 * 1024)?
        .set_default("fetch.timeout_secs", 30)?
        .set_default(
            "fetch.user_agent",
            crate::infrastructure::adapters::DEFAULT_USER_AGENT,
        )?
        .set_default("fetch.offline", false)?
        .set_default("tts.endpoint", "https://translate.google.com/translate_tts")?
        .set_default("tts.client", "tw-ob")?
        .set_default("log.level", "info")?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: LINGOCACHE_TTS__ENDPOINT=https://tts.example.com/translate_tts
    builder = builder.add_source(
        Environment::with_prefix("LINGOCACHE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.tts.endpoint.is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS endpoint cannot be empty".to_string(),
        ));
    }

    if url::Url::parse(&config.tts.endpoint).is_err() {
        return Err(ConfigError::ValidationError(format!(
            "TTS endpoint is not a valid URL: {}",
            config.tts.endpoint
        )));
    }

    if config.fetch.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Fetch timeout cannot be 0".to_string(),
        ));
    }

    if config.cache.memory_max_entries == 0 || config.cache.memory_max_cost_bytes == 0 {
        return Err(ConfigError::ValidationError(
            "Memory cache limits must be greater than 0".to_string(),
        ));
    }

    let dirs = [
        &config.cache.audio_dir,
        &config.cache.image_dir,
        &config.cache.preview_dir,
    ];
    if dirs.iter().any(|d| d.is_empty()) {
        return Err(ConfigError::ValidationError(
            "Cache directory names cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Cache Root: {:?}", config.cache.root_dir);
    tracing::info!("Audio Cache: {:?}", config.cache.audio_path());
    tracing::info!("Image Cache: {:?}", config.cache.image_path());
    tracing::info!("Preview Cache: {:?}", config.cache.preview_path());
    tracing::info!(
        "Image Memory Cache: {} entries / {} bytes",
        config.cache.memory_max_entries,
        config.cache.memory_max_cost_bytes
    );
    tracing::info!("Fetch Timeout: {}s", config.fetch.timeout_secs);
    tracing::info!("Offline Mode: {}", config.fetch.offline);
    tracing::info!("TTS Endpoint: {}", config.tts.endpoint);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_bad_tts_endpoint() {
        let mut config = AppConfig::default();
        config.tts.endpoint = String::new();
        assert!(validate_config(&config).is_err());

        config.tts.endpoint = "not a url".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_timeout() {
        let mut config = AppConfig::default();
        config.fetch.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_memory_limits() {
        let mut config = AppConfig::default();
        config.cache.memory_max_entries = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_dir_name() {
        let mut config = AppConfig::default();
        config.cache.image_dir = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 9090\n\n[cache]\nroot_dir = \"/tmp/lc\"\nmemory_max_entries = 5\n\n[fetch]\noffline = true"
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.cache.memory_max_entries, 5);
        assert_eq!(config.cache.audio_dir, "AudioCache");
        assert!(config.fetch.offline);
        assert_eq!(config.fetch.timeout_secs, 30);
    }
}
