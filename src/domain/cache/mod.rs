//! Cache Context - 内容缓存领域模型
//!
//! 资产类型、缓存 key 以及 key 派生规则，全部为纯函数，不做任何 I/O

mod asset_kind;
mod cache_key;
mod errors;
mod lookup;

pub use asset_kind::AssetKind;
pub use cache_key::{image_key, preview_key, speech_key, stable_hash, CacheKey};
pub use errors::DomainError;
pub use lookup::{SpeechLookup, StaleReference};
