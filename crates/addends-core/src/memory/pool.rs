//! Buffer pool for allocation-free enumeration.
//!
//! Buffered traversals hold one addend buffer for their whole lifetime.
//! Large buffers are rented from a [`BufferPool`] and handed back when the
//! traversal's [`PooledBuffer`] is dropped, whichever way the traversal ends.

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::config::get_config;

/// Idle buffers organized by length.
#[derive(Debug)]
struct BufferPoolInner {
    /// Pools organized by buffer length
    pools: HashMap<usize, Vec<Box<[u32]>>>,
    /// Maximum number of buffers to keep per length
    max_per_size: usize,
}

impl BufferPoolInner {
    fn new(max_per_size: usize) -> Self {
        Self {
            pools: HashMap::new(),
            max_per_size,
        }
    }

    fn acquire(&mut self, len: usize) -> Box<[u32]> {
        if let Some(buffer) = self.pools.get_mut(&len).and_then(Vec::pop) {
            return buffer;
        }
        vec![0; len].into_boxed_slice()
    }

    fn release(&mut self, mut buffer: Box<[u32]>) {
        let pool = self.pools.entry(buffer.len()).or_default();

        if pool.len() < self.max_per_size {
            buffer.fill(0);
            pool.push(buffer);
        }
    }
}

/// Thread-safe pool of addend buffers.
#[derive(Clone)]
pub struct BufferPool {
    inner: Arc<Mutex<BufferPoolInner>>,
}

static SHARED_POOL: Lazy<BufferPool> =
    Lazy::new(|| BufferPool::new(get_config().max_pooled_per_size));

impl BufferPool {
    /// Create a new pool keeping at most `max_per_size` idle buffers per length.
    pub fn new(max_per_size: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(BufferPoolInner::new(max_per_size))),
        }
    }

    /// The process-wide pool used by buffered enumeration by default.
    pub fn shared() -> &'static BufferPool {
        &SHARED_POOL
    }

    /// Rent a zeroed buffer of exactly `len` addends.
    pub fn acquire(&self, len: usize) -> PooledBuffer {
        let buffer = self.inner.lock().acquire(len);
        tracing::trace!(len, "rented addend buffer");
        PooledBuffer {
            buffer: Some(buffer),
            pool: self.clone(),
        }
    }

    /// Get the number of idle buffers of a specific length.
    pub fn pool_size(&self, len: usize) -> usize {
        self.inner.lock().pools.get(&len).map_or(0, Vec::len)
    }

    /// Drop all idle buffers.
    pub fn clear(&self) {
        self.inner.lock().pools.clear();
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(get_config().max_pooled_per_size)
    }
}

impl fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("BufferPool")
            .field("lengths", &inner.pools.len())
            .field("max_per_size", &inner.max_per_size)
            .finish()
    }
}

/// A buffer rented from a pool that returns itself when dropped.
pub struct PooledBuffer {
    buffer: Option<Box<[u32]>>,
    pool: BufferPool,
}

impl PooledBuffer {
    /// Take ownership of the buffer, preventing it from returning to the pool.
    pub fn take(mut self) -> Box<[u32]> {
        self.buffer.take().unwrap_or_default()
    }
}

impl Deref for PooledBuffer {
    type Target = [u32];

    fn deref(&self) -> &Self::Target {
        self.buffer.as_deref().unwrap_or(&[])
    }
}

impl DerefMut for PooledBuffer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.buffer.as_deref_mut().unwrap_or(&mut [])
    }
}

impl Drop for PooledBuffer {
    fn drop(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            tracing::trace!(len = buffer.len(), "returned addend buffer");
            self.pool.inner.lock().release(buffer);
        }
    }
}

impl fmt::Debug for PooledBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledBuffer")
            .field("len", &self.len())
            .finish()
    }
}

/// Storage backing one buffered traversal: rented for large part counts,
/// freshly allocated otherwise.
#[derive(Debug)]
pub enum AddendBuffer {
    /// Rented from a pool; returned on drop.
    Pooled(PooledBuffer),
    /// Plain allocation, freed on drop.
    Owned(Box<[u32]>),
}

impl AddendBuffer {
    /// Acquire storage for `len` addends, renting from `pool` if one is given.
    pub fn acquire(len: usize, pool: Option<&BufferPool>) -> Self {
        match pool {
            Some(pool) => Self::Pooled(pool.acquire(len)),
            None => Self::Owned(vec![0; len].into_boxed_slice()),
        }
    }

    /// Whether this buffer came from a pool.
    pub fn is_pooled(&self) -> bool {
        matches!(self, Self::Pooled(_))
    }
}

impl Deref for AddendBuffer {
    type Target = [u32];

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Pooled(buffer) => buffer,
            Self::Owned(buffer) => buffer,
        }
    }
}

impl DerefMut for AddendBuffer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self {
            Self::Pooled(buffer) => buffer,
            Self::Owned(buffer) => buffer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_pool_basic() {
        let pool = BufferPool::new(2);

        let mut b1 = pool.acquire(10);
        let mut b2 = pool.acquire(10);
        let mut b3 = pool.acquire(20);

        b1[0] = 1;
        b2[1] = 2;
        b3[2] = 3;

        assert_eq!(pool.pool_size(10), 0);
        assert_eq!(pool.pool_size(20), 0);

        drop(b1);
        drop(b2);
        drop(b3);

        assert_eq!(pool.pool_size(10), 2);
        assert_eq!(pool.pool_size(20), 1);

        // Reused buffers come back zeroed
        let b4 = pool.acquire(10);
        assert_eq!(b4.len(), 10);
        assert!(b4.iter().all(|&x| x == 0));
        assert_eq!(pool.pool_size(10), 1);
    }

    #[test]
    fn test_pool_limit() {
        let pool = BufferPool::new(2);

        let buffers: Vec<_> = (0..5).map(|_| pool.acquire(10)).collect();
        drop(buffers);

        assert_eq!(pool.pool_size(10), 2);
    }

    #[test]
    fn test_take_ownership() {
        let pool = BufferPool::new(2);

        let owned = pool.acquire(10).take();
        assert_eq!(owned.len(), 10);

        drop(owned);
        assert_eq!(pool.pool_size(10), 0);
    }

    #[test]
    fn test_clear() {
        let pool = BufferPool::new(4);
        drop(pool.acquire(3));
        assert_eq!(pool.pool_size(3), 1);

        pool.clear();
        assert_eq!(pool.pool_size(3), 0);
    }

    #[test]
    fn test_addend_buffer_variants() {
        let pool = BufferPool::new(1);

        let pooled = AddendBuffer::acquire(4, Some(&pool));
        let owned = AddendBuffer::acquire(4, None);
        assert!(pooled.is_pooled());
        assert!(!owned.is_pooled());
        assert_eq!(pooled.len(), 4);
        assert_eq!(owned.len(), 4);

        drop(owned);
        assert_eq!(pool.pool_size(4), 0);
        drop(pooled);
        assert_eq!(pool.pool_size(4), 1);
    }
}
