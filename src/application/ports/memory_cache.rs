//! Memory Cache Port - 内存热缓存
//!
//! 有界（条目数 + 总成本）的内存缓存，淘汰顺序由实现决定，调用方不应依赖

/// Memory Cache Port
pub trait MemoryCachePort<V>: Send + Sync {
    fn get(&self, key: &str) -> Option<V>;

    /// 插入并按需淘汰；`cost` 为该条目计入成本上限的字节数
    fn put(&self, key: String, value: V, cost: usize);

    fn remove(&self, key: &str) -> Option<V>;

    fn clear(&self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 当前总成本
    fn total_cost(&self) -> usize;
}
