//! 音色试听资产：按源 URL 直接下载，原样缓存

use url::Url;

use super::strategy::{direct_request, AssetStrategy};
use crate::application::error::ContentCacheError;
use crate::application::ports::FetchRequest;
use crate::domain::{preview_key, AssetKind, CacheKey};

#[derive(Debug, Clone, Copy, Default)]
pub struct PreviewAudioAsset;

impl AssetStrategy for PreviewAudioAsset {
    type Lookup = Url;
    type Asset = Vec<u8>;

    fn kind(&self) -> AssetKind {
        AssetKind::PreviewAudio
    }

    fn derive_key(&self, lookup: &Url) -> Result<CacheKey, ContentCacheError> {
        Ok(preview_key(lookup))
    }

    fn remote_request(&self, lookup: &Url) -> Result<FetchRequest, ContentCacheError> {
        direct_request(lookup, self.kind())
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<u8>, ContentCacheError> {
        Ok(data.to_vec())
    }

    fn cost(&self, asset: &Vec<u8>) -> usize {
        asset.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_http_scheme() {
        let url = Url::parse("file:///etc/passwd").unwrap();
        let err = PreviewAudioAsset.remote_request(&url).unwrap_err();
        assert!(matches!(err, ContentCacheError::InvalidInput(_)));
    }
}
