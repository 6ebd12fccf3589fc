//! HTTP Remote Fetcher - 通过 HTTP GET 下载远程资源
//!
//! 实现 RemoteFetcherPort trait
//!
//! - 固定 User-Agent（模拟移动端浏览器，部分 TTS / 图库服务会拒绝默认 UA）
//! - Accept 头由请求决定（audio/mpeg 或 image/*）
//! - 超时默认 30 秒；非 200 状态一律视为下载失败

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

use crate::application::ports::{FetchError, FetchRequest, RemoteFetcherPort};

/// 默认 User-Agent
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) \
     AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";

/// HTTP 下载器配置
#[derive(Debug, Clone)]
pub struct HttpFetcherConfig {
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// User-Agent 头
    pub user_agent: String,
}

impl Default for HttpFetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpFetcherConfig {
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP 下载器
pub struct HttpRemoteFetcher {
    client: Client,
    /// 健康检查地址，未设置时视为始终可用
    health_url: Option<Url>,
}

impl HttpRemoteFetcher {
    /// 创建新的 HTTP 下载器
    pub fn new(config: HttpFetcherConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| FetchError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            health_url: None,
        })
    }

    pub fn with_health_url(mut self, url: Url) -> Self {
        self.health_url = Some(url);
        self
    }
}

#[async_trait]
impl RemoteFetcherPort for HttpRemoteFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<Vec<u8>, FetchError> {
        tracing::debug!(url = %request.url, accept = request.accept, "Sending download request");

        let response = self
            .client
            .get(request.url.clone())
            .header(ACCEPT, request.accept)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout
                } else if e.is_connect() {
                    FetchError::NetworkError(format!("Cannot connect to {}: {}", request.url, e))
                } else {
                    FetchError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::DownloadFailed {
                status: status.as_u16(),
            });
        }

        let data = response
            .bytes()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout
                } else {
                    FetchError::NetworkError(format!("Failed to read body: {}", e))
                }
            })?
            .to_vec();

        tracing::info!(url = %request.url, size_bytes = data.len(), "Download completed");
        Ok(data)
    }

    async fn health_check(&self) -> bool {
        let Some(url) = &self.health_url else {
            return true;
        };

        match self
            .client
            .get(url.clone())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => !response.status().is_server_error(),
            Err(_) => false,
        }
    }
}
