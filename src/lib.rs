//! LingoCache - 语言学习应用的内容缓存
//!
//! 按 key 缓存远程内容：TTS 朗读音频、图库图片、试听音频。
//! 未命中时从远程下载并落盘，命中时直接返回本地文件。
//!
//! 领域层 (domain/):
//! - Cache Context: 资产类型、缓存 key 派生、查询参数
//!
//! 应用层 (application/):
//! - Ports: CacheStore, RemoteFetcher, MemoryCache
//! - Assets: 三种资产策略
//! - ContentCache: 通用缓存旁路编排
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: 文件缓存存储, HTTP 下载器
//! - Memory: 解码图片的 LRU 内存层
//! - HTTP: 内容缓存网关
//! - Bootstrap: 组合根

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
