//! Memory management for partition generation.

pub mod memo;
pub mod pool;

// Re-export key items
pub use memo::{Memo, MemoKey, MemoStats, Partition, SharedPartitions};
pub use pool::{AddendBuffer, BufferPool, PooledBuffer};
