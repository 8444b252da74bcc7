//! Unique addend partitions.
//!
//! Enumerates every way to write a sum as a fixed number of distinct
//! positive integers in increasing order. Results are available memoized
//! ([`PossibleAddends`]) or streamed through a single reusable buffer
//! ([`partitions_buffered`]).
//!
//! # Example
//!
//! ```rust
//! use addends::prelude::*;
//!
//! let addends = PossibleAddends::new();
//! let memoized = addends.unique_addends_for(8, 3)?;
//! let streamed: Vec<Vec<u32>> = partitions_enumerable(8, 3)?.collect();
//!
//! assert_eq!(streamed, vec![vec![1, 2, 5], vec![1, 3, 4]]);
//! assert_eq!(memoized.len(), streamed.len());
//! # Ok::<(), AddendsError>(())
//! ```

pub use addends_core::*;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use addends_core::prelude::*;
}
