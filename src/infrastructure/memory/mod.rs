//! Memory Layer - 内存实现

mod lru_cache;

pub use lru_cache::LruMemoryCache;
