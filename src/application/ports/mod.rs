//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod cache_store;
mod memory_cache;
mod remote_fetcher;

pub use cache_store::{CacheStorePort, StoreError};
pub use memory_cache::MemoryCachePort;
pub use remote_fetcher::{FetchError, FetchRequest, RemoteFetcherPort};
