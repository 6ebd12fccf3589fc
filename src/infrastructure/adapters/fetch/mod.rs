//! Fetch Adapter - 远程资源下载实现

mod fake_fetcher;
mod http_fetcher;

pub use fake_fetcher::{FakeRemoteFetcher, FakeResponse};
pub use http_fetcher::*;
