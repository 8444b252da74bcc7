//! Core generators for unique addend partitions.
//!
//! A unique addend partition of `sum` into `count` parts is a strictly
//! increasing tuple of `count` positive integers adding up to `sum`. This
//! crate enumerates them in a fixed canonical order through two
//! complementary strategies.
//!
//! # Key Concepts
//!
//! - **Memoized generation**: every `(count, sum)` answer is materialized
//!   once and shared, and sub-problems reuse stored answers
//! - **Buffered generation**: no results are kept; one buffer is rewritten
//!   in place for each item of a single pass
//!
//! # Modules
//!
//! - [`cached`]: Memoizing generator with disposal
//! - [`pooled`]: Allocation-free streaming enumeration
//! - [`memory`]: Partition memo and buffer pool
//! - [`lifecycle`]: Disposal contract
//! - [`config`]: Pooling thresholds
//! - [`error`]: Error types

pub mod cached;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod memory;
pub mod pooled;

mod recurrence;

// Re-export commonly used items at the crate root
pub use cached::{PossibleAddends, UniqueAddends};
pub use error::{AddendsError, Result};
pub use lifecycle::Dispose;
pub use memory::{Partition, SharedPartitions};
pub use pooled::{partitions_buffered, partitions_enumerable, BufferedPartitions, OwnedPartitions};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use addends_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::cached::{PossibleAddends, UniqueAddends};
    pub use crate::config::{get_config, set_config, AddendsConfig, AddendsConfigBuilder};
    pub use crate::error::{AddendsError, Result};
    pub use crate::lifecycle::Dispose;
    pub use crate::memory::{BufferPool, MemoStats, Partition, SharedPartitions};
    pub use crate::pooled::{
        partitions_buffered, partitions_enumerable, BufferedPartitions, OwnedPartitions, Phase,
    };
}
