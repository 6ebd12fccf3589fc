//! 缓存 key 派生
//!
//! key 同时就是缓存目录下的文件名：
//! - 语音: `{lang}_{hash(text)}.mp3`
//! - 图片: `{hash(url)}_{last}.{ext 或 jpg}`
//! - 试听: `{hash(url)}_{last}`
//!
//! hash 取 md5 摘要的前 8 字节（大端）作为 u64，十进制输出。
//! 跨平台、跨进程稳定；碰撞风险可接受，不做处理

use serde::Serialize;
use url::Url;

use super::errors::DomainError;

/// 文件名长度上限（常见文件系统为 255 字节）
const MAX_KEY_LEN: usize = 255;

/// 缺少可用路径段时的占位文件名
const FALLBACK_SEGMENT: &str = "asset";

/// 图片缺少扩展名时的默认扩展名
const DEFAULT_IMAGE_EXT: &str = "jpg";

/// 可保留的扩展名长度上限，超出时改用默认扩展名
const MAX_EXT_LEN: usize = 16;

/// 缓存 key（即缓存文件名）
///
/// 不变量：非空、不含路径分隔符、不以 `.` 开头（`.` 前缀保留给写入中的临时文件）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// 校验外部传入的文件名（例如持久化记录里保存的旧文件名）
    pub fn parse(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let valid = !name.is_empty()
            && name.len() <= MAX_KEY_LEN
            && !name.starts_with('.')
            && !name.contains(['/', '\\', '\0']);
        if !valid {
            return Err(DomainError::InvalidKey(name));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// 稳定 hash：md5 前 8 字节，大端
pub fn stable_hash(input: &str) -> u64 {
    let digest = md5::compute(input.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest.0[..8]);
    u64::from_be_bytes(head)
}

/// 语音缓存 key
///
/// 文本先去除首尾空白；相同文本不同语言得到不同 key
pub fn speech_key(text: &str, language_code: &str) -> Result<CacheKey, DomainError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DomainError::EmptyText);
    }
    let valid_lang = !language_code.is_empty()
        && language_code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');
    if !valid_lang {
        return Err(DomainError::InvalidLanguageCode(language_code.to_string()));
    }

    CacheKey::parse(format!("{}_{}.mp3", language_code, stable_hash(text)))
}

/// 图片缓存 key
pub fn image_key(source: &Url) -> CacheKey {
    let last = last_segment(source);
    let ext = extension_of(&last)
        .filter(|ext| ext.len() <= MAX_EXT_LEN)
        .unwrap_or(DEFAULT_IMAGE_EXT)
        .to_string();
    bounded_key(format!("{}_{}", stable_hash(source.as_str()), last), Some(&ext))
}

/// 试听音频缓存 key（不强制扩展名）
pub fn preview_key(source: &Url) -> CacheKey {
    bounded_key(
        format!("{}_{}", stable_hash(source.as_str()), last_segment(source)),
        None,
    )
}

/// 拼接扩展名并截断到文件名长度上限
///
/// 输入均已过 sanitize，只含 ASCII，按字节截断安全。
/// 扩展名不超过 `MAX_EXT_LEN`，截断后 `{hash}_` 前缀总会保留
fn bounded_key(mut stem: String, ext: Option<&str>) -> CacheKey {
    let suffix_len = ext.map(|e| e.len() + 1).unwrap_or(0);
    stem.truncate(MAX_KEY_LEN.saturating_sub(suffix_len));
    if let Some(ext) = ext {
        stem.push('.');
        stem.push_str(ext);
    }
    // hash 前缀保证非空、不以 `.` 开头、不含分隔符
    CacheKey(stem)
}

/// URL 最后一个非空路径段（百分号解码后 sanitize）
fn last_segment(source: &Url) -> String {
    let raw = source
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(|s| {
            urlencoding::decode(s)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| s.to_string())
        })
        .unwrap_or_default();

    let sanitized: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.is_empty() {
        FALLBACK_SEGMENT.to_string()
    } else {
        sanitized
    }
}

fn extension_of(segment: &str) -> Option<&str> {
    match segment.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_speech_key_is_deterministic() {
        let a = speech_key("Hola", "es").unwrap();
        let b = speech_key("Hola", "es").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), format!("es_{}.mp3", stable_hash("Hola")));
    }

    #[test]
    fn test_speech_key_trims_whitespace() {
        let plain = speech_key("Hola", "es").unwrap();
        let padded = speech_key("  Hola\n\t", "es").unwrap();
        assert_eq!(plain, padded);
    }

    #[test]
    fn test_speech_key_differs_by_language() {
        let es = speech_key("taxi", "es").unwrap();
        let en = speech_key("taxi", "en").unwrap();
        assert_ne!(es, en);
        assert!(es.as_str().starts_with("es_"));
        assert!(en.as_str().starts_with("en_"));
    }

    #[test]
    fn test_speech_key_rejects_empty_text() {
        assert_eq!(speech_key("   \n", "es"), Err(DomainError::EmptyText));
    }

    #[test]
    fn test_speech_key_rejects_bad_language() {
        assert!(speech_key("Hola", "").is_err());
        assert!(speech_key("Hola", "../es").is_err());
        assert!(speech_key("Hola", "zh-CN").is_ok());
    }

    #[test]
    fn test_image_key_keeps_extension() {
        let source = url("https://images.example.com/photos/cat.png?w=400");
        let key = image_key(&source);
        assert_eq!(
            key.as_str(),
            format!("{}_cat.png.png", stable_hash(source.as_str()))
        );
    }

    #[test]
    fn test_image_key_defaults_to_jpg() {
        let source = url("https://images.example.com/photos/12345");
        let key = image_key(&source);
        assert!(key.as_str().ends_with("_12345.jpg"));
    }

    #[test]
    fn test_image_key_differs_by_query() {
        let a = image_key(&url("https://cdn.example.com/p/dog.jpg?w=200"));
        let b = image_key(&url("https://cdn.example.com/p/dog.jpg?w=800"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_preview_key_has_no_forced_extension() {
        let source = url("https://voices.example.com/previews/alloy");
        let key = preview_key(&source);
        assert_eq!(key.as_str(), format!("{}_alloy", stable_hash(source.as_str())));
    }

    #[test]
    fn test_last_segment_is_sanitized() {
        let key = preview_key(&url("https://x.example.com/a/b%20c%2Fd.mp3/"));
        assert!(key.as_str().ends_with("_b_c_d.mp3"));
        assert!(!key.as_str().contains('/'));

        let root = image_key(&url("https://x.example.com/"));
        assert!(root.as_str().ends_with("_asset.jpg"));
    }

    #[test]
    fn test_long_segment_is_truncated() {
        let long = "a".repeat(400);
        let key = image_key(&url(&format!("https://x.example.com/{}.webp", long)));
        assert!(key.as_str().len() <= MAX_KEY_LEN);
        assert!(key.as_str().ends_with(".webp"));
    }

    #[test]
    fn test_long_extension_keeps_hash_prefix() {
        let ext = "x".repeat(300);
        let a = url(&format!("https://x.example.com/a.{}", ext));
        let b = url(&format!("https://y.example.com/other/b.{}", ext));

        let key_a = image_key(&a);
        let key_b = image_key(&b);

        assert_ne!(key_a, key_b);
        for (key, source) in [(&key_a, &a), (&key_b, &b)] {
            assert!(key.as_str().len() <= MAX_KEY_LEN);
            assert!(key.as_str().starts_with(&format!("{}_", stable_hash(source.as_str()))));
            assert!(key.as_str().ends_with(".jpg"));
            assert_eq!(CacheKey::parse(key.as_str()).unwrap(), *key);
        }
    }

    #[test]
    fn test_parse_rejects_unsafe_names() {
        assert!(CacheKey::parse("").is_err());
        assert!(CacheKey::parse("..").is_err());
        assert!(CacheKey::parse(".tmp").is_err());
        assert!(CacheKey::parse("a/b").is_err());
        assert!(CacheKey::parse("a\\b").is_err());
        assert!(CacheKey::parse("123_cat.jpg").is_ok());
    }
}
