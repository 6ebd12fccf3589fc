//! HTTP Layer - 内容缓存网关
//!
//! 把三种内容缓存以 REST 接口暴露给非进程内的使用方

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_routes;
pub use server::HttpServer;
pub use state::AppState;
