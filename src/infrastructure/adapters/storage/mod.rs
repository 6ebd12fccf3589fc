//! Storage Adapter - 磁盘缓存存储

mod file_cache_store;

pub use file_cache_store::FileCacheStore;
