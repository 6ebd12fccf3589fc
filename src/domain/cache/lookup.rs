//! 查询输入值对象

use url::Url;

/// 语音合成查询：文本 + 语言代码
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechLookup {
    pub text: String,
    pub language_code: String,
}

impl SpeechLookup {
    pub fn new(text: impl Into<String>, language_code: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language_code: language_code.into(),
        }
    }

    /// 去除首尾空白（含换行）后的文本
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }
}

/// 外部记录持有的旧引用
///
/// `file_name` 为之前写入缓存的文件名（可能已被系统清理），
/// `remote_url` 为原始远程地址，用于修复
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaleReference {
    pub file_name: Option<String>,
    pub remote_url: Option<Url>,
}

impl StaleReference {
    pub fn new(file_name: Option<String>, remote_url: Option<Url>) -> Self {
        Self {
            file_name,
            remote_url,
        }
    }
}
