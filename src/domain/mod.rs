//! Domain Layer - 领域层
//!
//! Cache Context: 资产类型、缓存 key、查询输入

pub mod cache;

pub use cache::{
    image_key, preview_key, speech_key, stable_hash, AssetKind, CacheKey, DomainError,
    SpeechLookup, StaleReference,
};
