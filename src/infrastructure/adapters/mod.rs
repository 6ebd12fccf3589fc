//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod fetch;
pub mod storage;

pub use fetch::*;
pub use storage::*;
