//! 资产类型

use serde::{Deserialize, Serialize};

/// 缓存的资产类型，每种类型独占一个缓存目录
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// 合成语音（TTS）
    SpeechAudio,
    /// 图库图片
    Image,
    /// 音色试听片段
    PreviewAudio,
}

impl AssetKind {
    pub const ALL: [AssetKind; 3] = [Self::SpeechAudio, Self::Image, Self::PreviewAudio];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SpeechAudio => "speech_audio",
            Self::Image => "image",
            Self::PreviewAudio => "preview_audio",
        }
    }

    /// 远程请求的 Accept 头
    pub fn accept(&self) -> &'static str {
        match self {
            Self::SpeechAudio | Self::PreviewAudio => "audio/mpeg",
            Self::Image => "image/*",
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_names() {
        let kind: AssetKind = serde_json::from_str("\"preview_audio\"").unwrap();
        assert_eq!(kind, AssetKind::PreviewAudio);
        assert_eq!(serde_json::to_string(&AssetKind::SpeechAudio).unwrap(), "\"speech_audio\"");
    }

    #[test]
    fn test_accept_header() {
        assert_eq!(AssetKind::SpeechAudio.accept(), "audio/mpeg");
        assert_eq!(AssetKind::Image.accept(), "image/*");
    }
}
