//! 合成语音资产
//!
//! GET {endpoint}?ie=UTF-8&client={client}&q={text}&tl={lang}

use url::Url;

use super::strategy::AssetStrategy;
use crate::application::error::ContentCacheError;
use crate::application::ports::FetchRequest;
use crate::domain::{speech_key, AssetKind, CacheKey, SpeechLookup};

/// TTS 服务地址
#[derive(Debug, Clone)]
pub struct TtsEndpoint {
    pub base: Url,
    pub client: String,
}

impl TtsEndpoint {
    pub fn parse(endpoint: &str, client: impl Into<String>) -> Result<Self, url::ParseError> {
        Ok(Self {
            base: Url::parse(endpoint)?,
            client: client.into(),
        })
    }
}

/// 合成语音策略
#[derive(Debug, Clone)]
pub struct SpeechAudioAsset {
    endpoint: TtsEndpoint,
}

impl SpeechAudioAsset {
    pub fn new(endpoint: TtsEndpoint) -> Self {
        Self { endpoint }
    }

    /// 构造合成请求地址，文本取 trim 后的内容
    pub fn speech_url(&self, lookup: &SpeechLookup) -> Result<Url, ContentCacheError> {
        let mut base = self.endpoint.base.clone();
        base.set_query(None);
        let raw = format!(
            "{}?ie=UTF-8&client={}&q={}&tl={}",
            base,
            urlencoding::encode(&self.endpoint.client),
            urlencoding::encode(lookup.trimmed_text()),
            urlencoding::encode(&lookup.language_code),
        );
        Url::parse(&raw).map_err(|e| ContentCacheError::invalid_input(e.to_string()))
    }
}

impl AssetStrategy for SpeechAudioAsset {
    type Lookup = SpeechLookup;
    type Asset = Vec<u8>;

    fn kind(&self) -> AssetKind {
        AssetKind::SpeechAudio
    }

    fn derive_key(&self, lookup: &SpeechLookup) -> Result<CacheKey, ContentCacheError> {
        Ok(speech_key(&lookup.text, &lookup.language_code)?)
    }

    fn remote_request(&self, lookup: &SpeechLookup) -> Result<FetchRequest, ContentCacheError> {
        let url = self.speech_url(lookup)?;
        Ok(FetchRequest::new(url, self.kind().accept()))
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<u8>, ContentCacheError> {
        Ok(data.to_vec())
    }

    fn cost(&self, asset: &Vec<u8>) -> usize {
        asset.len()
    }
}
