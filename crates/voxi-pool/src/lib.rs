//! Fixed-capacity object pools for chunk resources.
//!
//! Every slot is constructed once when the pool is built. `allocate` pops a
//! slot off a bounded free list and `free` (or dropping the handle) runs the
//! slot's [`Reclaim`] teardown before pushing it back. Both are O(1) and never
//! touch the global allocator. Capacity never grows.
#![forbid(unsafe_code)]

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_channel::{Receiver, Sender, bounded};

/// Teardown run on a slot before it is returned to its pool.
pub trait Reclaim {
    fn reclaim(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("{pool} pool exhausted (capacity {capacity})")]
    OutOfCapacity { pool: &'static str, capacity: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    pub label: &'static str,
    pub capacity: usize,
    pub in_use: usize,
}

impl fmt::Display for PoolStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}/{}", self.label, self.in_use, self.capacity)
    }
}

struct PoolInner<T> {
    free_tx: Sender<Box<T>>,
    free_rx: Receiver<Box<T>>,
    in_use: AtomicUsize,
    capacity: usize,
    label: &'static str,
}

impl<T> PoolInner<T> {
    fn release(&self, slot: Box<T>) {
        // Decrement first so `in_use` never over-reports while the slot is in flight.
        self.in_use.fetch_sub(1, Ordering::AcqRel);
        // Cannot fail: the channel holds `capacity` slots and only pooled slots come back.
        let _ = self.free_tx.try_send(slot);
    }
}

/// Shared handle to a pool; clones refer to the same slots.
pub struct Pool<T: Reclaim> {
    inner: Arc<PoolInner<T>>,
}

impl<T: Reclaim> Clone for Pool<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Reclaim> Pool<T> {
    /// Builds `capacity` slots up front with `init`.
    pub fn new(label: &'static str, capacity: usize, mut init: impl FnMut() -> T) -> Self {
        debug_assert!(capacity > 0);
        let (tx, rx) = bounded(capacity);
        for _ in 0..capacity {
            // Cannot fail: the channel was sized for exactly this many slots.
            let _ = tx.try_send(Box::new(init()));
        }
        log::info!("{label} pool ready: {capacity} slots of {} bytes", std::mem::size_of::<T>());
        Self {
            inner: Arc::new(PoolInner {
                free_tx: tx,
                free_rx: rx,
                in_use: AtomicUsize::new(0),
                capacity,
                label,
            }),
        }
    }

    /// Takes a free slot. Exhaustion means the pool was sized too small for
    /// the working set; callers are expected to treat it as fatal.
    pub fn allocate(&self) -> Result<Pooled<T>, PoolError> {
        match self.inner.free_rx.try_recv() {
            Ok(slot) => {
                self.inner.in_use.fetch_add(1, Ordering::AcqRel);
                Ok(Pooled {
                    slot: Some(slot),
                    pool: Arc::clone(&self.inner),
                })
            }
            Err(_) => {
                log::warn!(
                    "{} pool exhausted ({} slots in use)",
                    self.inner.label,
                    self.inner.capacity
                );
                Err(PoolError::OutOfCapacity {
                    pool: self.inner.label,
                    capacity: self.inner.capacity,
                })
            }
        }
    }

    /// Returns a slot to this pool. Equivalent to dropping the handle.
    pub fn free(&self, item: Pooled<T>) {
        debug_assert!(
            Arc::ptr_eq(&self.inner, &item.pool),
            "slot freed into a foreign {} pool",
            self.inner.label
        );
        drop(item);
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    #[inline]
    pub fn in_use(&self) -> usize {
        self.inner.in_use.load(Ordering::Acquire)
    }

    #[inline]
    pub fn available(&self) -> usize {
        self.capacity() - self.in_use()
    }

    #[inline]
    pub fn label(&self) -> &'static str {
        self.inner.label
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            label: self.inner.label,
            capacity: self.inner.capacity,
            in_use: self.in_use(),
        }
    }
}

/// Owned slot borrowed from a [`Pool`]; goes back on drop.
pub struct Pooled<T: Reclaim> {
    slot: Option<Box<T>>,
    pool: Arc<PoolInner<T>>,
}

impl<T: Reclaim> Deref for Pooled<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.slot.as_deref().expect("pooled slot already released")
    }
}

impl<T: Reclaim> DerefMut for Pooled<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.slot.as_deref_mut().expect("pooled slot already released")
    }
}

impl<T: Reclaim> Drop for Pooled<T> {
    fn drop(&mut self) {
        if let Some(mut slot) = self.slot.take() {
            slot.reclaim();
            self.pool.release(slot);
        }
    }
}

impl<T: Reclaim + fmt::Debug> fmt::Debug for Pooled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pooled")
            .field("pool", &self.pool.label)
            .field("slot", &self.slot)
            .finish()
    }
}
