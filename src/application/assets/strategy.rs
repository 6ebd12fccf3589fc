//! 资产策略 trait

use url::Url;

use crate::application::error::ContentCacheError;
use crate::application::ports::FetchRequest;
use crate::domain::{AssetKind, CacheKey};

/// 资产策略
///
/// `ContentCache` 只负责命中/未命中/修复流程，具体 key 格式、
/// 远程地址和字节解码由策略决定
pub trait AssetStrategy: Send + Sync + 'static {
    /// 查询输入
    type Lookup: Send + Sync;

    /// 解码后的资产
    type Asset: Clone + Send + Sync + 'static;

    fn kind(&self) -> AssetKind;

    /// 派生缓存 key；输入无效时返回 `InvalidInput`，不做任何 I/O
    fn derive_key(&self, lookup: &Self::Lookup) -> Result<CacheKey, ContentCacheError>;

    /// 未命中时的远程请求
    fn remote_request(&self, lookup: &Self::Lookup) -> Result<FetchRequest, ContentCacheError>;

    /// 校验并解码字节；写盘前调用，失败的内容不会落盘
    fn decode(&self, data: &[u8]) -> Result<Self::Asset, ContentCacheError>;

    /// 内存缓存成本（字节）
    fn cost(&self, asset: &Self::Asset) -> usize;
}

/// 以 URL 为输入的资产直接请求该 URL，仅允许 http/https
pub(crate) fn direct_request(url: &Url, kind: AssetKind) -> Result<FetchRequest, ContentCacheError> {
    match url.scheme() {
        "http" | "https" => Ok(FetchRequest::new(url.clone(), kind.accept())),
        scheme => Err(ContentCacheError::invalid_input(format!(
            "unsupported URL scheme: {}",
            scheme
        ))),
    }
}
