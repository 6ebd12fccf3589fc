//! Fake Remote Fetcher - 不访问网络的下载器
//!
//! 按 URL 返回预设响应并记录调用次数；测试和离线模式（只用已有缓存）使用

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::application::ports::{FetchError, FetchRequest, RemoteFetcherPort};

/// 预设响应
#[derive(Debug, Clone)]
pub enum FakeResponse {
    /// 200 + 响应体
    Body(Vec<u8>),
    /// 非 200 状态
    Status(u16),
    /// 传输层失败
    NetworkFailure(String),
}

impl FakeResponse {
    fn to_result(&self) -> Result<Vec<u8>, FetchError> {
        match self {
            Self::Body(data) => Ok(data.clone()),
            Self::Status(status) => Err(FetchError::DownloadFailed { status: *status }),
            Self::NetworkFailure(msg) => Err(FetchError::NetworkError(msg.clone())),
        }
    }
}

/// Fake Remote Fetcher
pub struct FakeRemoteFetcher {
    /// url -> 响应
    responses: Mutex<HashMap<String, FakeResponse>>,
    /// 未单独配置的 URL 使用的响应
    default_response: FakeResponse,
    requests: Mutex<Vec<FetchRequest>>,
    calls: AtomicUsize,
}

impl FakeRemoteFetcher {
    pub fn new(default_response: FakeResponse) -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            default_response,
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// 所有请求都返回同一响应体
    pub fn returning(data: impl Into<Vec<u8>>) -> Self {
        Self::new(FakeResponse::Body(data.into()))
    }

    /// 离线模式：所有请求都以网络错误失败
    pub fn offline() -> Self {
        Self::new(FakeResponse::NetworkFailure("offline mode".to_string()))
    }

    /// 为指定 URL 设置响应
    pub fn respond(&self, url: &str, response: FakeResponse) {
        lock(&self.responses).insert(url.to_string(), response);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 按顺序记录的请求
    pub fn requests(&self) -> Vec<FetchRequest> {
        lock(&self.requests).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl RemoteFetcherPort for FakeRemoteFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<Vec<u8>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.requests).push(request.clone());

        let response = lock(&self.responses)
            .get(request.url.as_str())
            .cloned()
            .unwrap_or_else(|| self.default_response.clone());

        tracing::debug!(url = %request.url, "FakeRemoteFetcher: returning scripted response");
        response.to_result()
    }

    async fn health_check(&self) -> bool {
        !matches!(self.default_response, FakeResponse::NetworkFailure(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn request(url: &str) -> FetchRequest {
        FetchRequest::new(Url::parse(url).unwrap(), "image/*")
    }

    #[tokio::test]
    async fn test_scripted_responses() {
        let fetcher = FakeRemoteFetcher::returning(b"default".to_vec());
        fetcher.respond("https://a.example.com/x.jpg", FakeResponse::Status(503));

        let ok = fetcher.fetch(&request("https://b.example.com/y.jpg")).await;
        assert_eq!(ok.unwrap(), b"default");

        let err = fetcher.fetch(&request("https://a.example.com/x.jpg")).await;
        assert!(matches!(err, Err(FetchError::DownloadFailed { status: 503 })));

        assert_eq!(fetcher.call_count(), 2);
        assert_eq!(fetcher.requests()[1].url.as_str(), "https://a.example.com/x.jpg");
    }

    #[tokio::test]
    async fn test_offline() {
        let fetcher = FakeRemoteFetcher::offline();
        let err = fetcher.fetch(&request("https://a.example.com/x.jpg")).await;
        assert!(matches!(err, Err(FetchError::NetworkError(_))));
        assert!(!fetcher.health_check().await);
    }
}
