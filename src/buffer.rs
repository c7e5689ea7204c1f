//! Blocking bounded buffer shared by one producer and one consumer
//!
//! The protocol is the classical semaphore pair plus a mutual-exclusion
//! region: `put` acquires a free-slot permit, writes inside the region,
//! then releases a filled-slot permit; `take` is symmetric. A slot is
//! therefore never overwritten before it has been read, and neither side
//! ever blocks while holding the region.

use std::{
    cell::UnsafeCell,
    sync::atomic::{AtomicBool, Ordering},
};

use crate::{
    error::{CouloirError, Result},
    sync::{Exclusion, LockExclusion, Semaphore},
};

/// Slot storage and position bookkeeping, only ever touched inside the
/// mutual-exclusion region.
#[derive(Debug)]
struct Inner<T> {
    slots: Box<[Option<T>]>,
    /// Monotonically increasing write position; slot index is `pos % capacity`
    write_pos: usize,
    /// Monotonically increasing read position
    read_pos: usize,
}

impl<T> Inner<T> {
    fn len(&self) -> usize {
        self.write_pos - self.read_pos
    }

    fn push(&mut self, item: T) {
        let index = self.write_pos % self.slots.len();
        debug_assert!(self.slots[index].is_none(), "overwrote an unread slot");
        self.slots[index] = Some(item);
        self.write_pos += 1;
    }

    fn pop(&mut self) -> Option<T> {
        if self.read_pos == self.write_pos {
            return None;
        }
        let index = self.read_pos % self.slots.len();
        let item = self.slots[index].take();
        debug_assert!(item.is_some(), "read an empty slot");
        self.read_pos += 1;
        item
    }
}

/// Fixed-capacity blocking buffer for a single-producer single-consumer pair.
///
/// Generic over the mutual-exclusion backend; [`LockExclusion`] is the
/// default and [`SemaphoreExclusion`](crate::sync::SemaphoreExclusion) is
/// behaviorally interchangeable.
///
/// # Example
///
/// ```
/// use couloir::BoundedBuffer;
///
/// let buffer: BoundedBuffer<u64> = BoundedBuffer::new(4).unwrap();
/// buffer.put(7).unwrap();
/// assert_eq!(buffer.take().unwrap(), Some(7));
/// buffer.close().unwrap();
/// assert_eq!(buffer.take().unwrap(), None);
/// ```
#[derive(Debug)]
pub struct BoundedBuffer<T, X: Exclusion = LockExclusion> {
    /// Capacity fixed at construction
    capacity: usize,
    /// Shared slot state; the exclusion backend serializes all access
    inner: UnsafeCell<Inner<T>>,
    /// Free-slot permits, initially `capacity`
    empty: Semaphore,
    /// Filled-slot permits, initially 0
    filled: Semaphore,
    /// Mutual-exclusion region around the slot state
    exclusion: X,
    /// End-of-stream flag set by [`close`](Self::close)
    closed: AtomicBool,
}

// Safety: the slot state behind the UnsafeCell is only dereferenced inside
// `exclusion.with`, which admits one thread at a time; everything else is
// Sync by construction.
unsafe impl<T: Send, X: Exclusion> Send for BoundedBuffer<T, X> {}
unsafe impl<T: Send, X: Exclusion> Sync for BoundedBuffer<T, X> {}

impl<T> BoundedBuffer<T> {
    /// Create a buffer with the default mutex-backed exclusion region
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_exclusion(capacity, LockExclusion::default())
    }
}

impl<T, X: Exclusion> BoundedBuffer<T, X> {
    /// Create a buffer with an explicit mutual-exclusion backend
    pub fn with_exclusion(capacity: usize, exclusion: X) -> Result<Self> {
        if capacity == 0 {
            return Err(CouloirError::invalid_parameter(
                "capacity",
                "must be greater than 0",
            ));
        }

        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);

        Ok(Self {
            capacity,
            inner: UnsafeCell::new(Inner {
                slots: slots.into_boxed_slice(),
                write_pos: 0,
                read_pos: 0,
            }),
            empty: Semaphore::new(capacity),
            filled: Semaphore::new(0),
            exclusion,
            closed: AtomicBool::new(false),
        })
    }

    /// Insert an item, blocking while the buffer is full.
    ///
    /// Fails with [`CouloirError::Closed`] once the buffer has been closed.
    pub fn put(&self, item: T) -> Result<()> {
        if self.is_closed() {
            return Err(CouloirError::Closed);
        }

        self.empty.acquire()?;
        self.exclusion.with(|| {
            let inner = unsafe { &mut *self.inner.get() };
            inner.push(item);
        })?;
        self.filled.release()?;
        Ok(())
    }

    /// Remove the oldest item, blocking while the buffer is empty.
    ///
    /// Returns `Ok(None)` once the buffer is closed and fully drained.
    pub fn take(&self) -> Result<Option<T>> {
        self.filled.acquire()?;
        let item = self.exclusion.with(|| {
            let inner = unsafe { &mut *self.inner.get() };
            inner.pop()
        })?;

        match item {
            Some(item) => {
                self.empty.release()?;
                Ok(Some(item))
            }
            None => {
                // The permit we consumed was the close wakeup token, not an
                // item. Pass it on so every later take also observes
                // end-of-stream.
                self.filled.release()?;
                Ok(None)
            }
        }
    }

    /// Signal end-of-stream. Idempotent.
    ///
    /// Pending items remain takeable; once drained, `take` returns `None`.
    pub fn close(&self) -> Result<()> {
        if !self.closed.swap(true, Ordering::SeqCst) {
            // One wakeup token for a consumer blocked on an empty buffer
            self.filled.release()?;
        }
        Ok(())
    }

    /// Whether [`close`](Self::close) has been called
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Capacity fixed at construction
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of produced-but-not-consumed items
    pub fn len(&self) -> Result<usize> {
        self.exclusion.with(|| {
            let inner = unsafe { &*self.inner.get() };
            inner.len()
        })
    }

    /// Check if the buffer holds no items
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Slots currently available for writing
    pub fn free_slots(&self) -> Result<usize> {
        Ok(self.capacity - self.len()?)
    }

    /// Slots currently available for reading
    pub fn filled_slots(&self) -> Result<usize> {
        self.len()
    }

    /// Consistent `(free, filled)` snapshot taken in one pass through the
    /// exclusion region; the pair always sums to the capacity
    pub fn counters(&self) -> Result<(usize, usize)> {
        self.exclusion.with(|| {
            let inner = unsafe { &*self.inner.get() };
            (self.capacity - inner.len(), inner.len())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::SemaphoreExclusion;

    #[test]
    fn test_zero_capacity_rejected() {
        let result: Result<BoundedBuffer<u32>> = BoundedBuffer::new(0);
        assert!(matches!(
            result,
            Err(CouloirError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_put_take_single_thread() {
        let buffer: BoundedBuffer<u32> = BoundedBuffer::new(4).unwrap();

        for i in 0..4 {
            buffer.put(i).unwrap();
        }
        assert_eq!(buffer.len().unwrap(), 4);
        assert_eq!(buffer.free_slots().unwrap(), 0);

        for i in 0..4 {
            assert_eq!(buffer.take().unwrap(), Some(i));
        }
        assert!(buffer.is_empty().unwrap());
        assert_eq!(buffer.free_slots().unwrap(), 4);
    }

    #[test]
    fn test_wraparound_reuses_slots() {
        let buffer: BoundedBuffer<usize> = BoundedBuffer::new(3).unwrap();

        // Cross the capacity boundary several times
        for i in 0..10 {
            buffer.put(i).unwrap();
            assert_eq!(buffer.take().unwrap(), Some(i));
        }
        assert!(buffer.is_empty().unwrap());
    }

    #[test]
    fn test_capacity_invariant_at_quiescent_points() {
        let buffer: BoundedBuffer<u8> = BoundedBuffer::new(4).unwrap();

        for step in 0..4u8 {
            buffer.put(step).unwrap();
            let (free, filled) = buffer.counters().unwrap();
            assert_eq!(free + filled, buffer.capacity());
        }
    }

    #[test]
    fn test_close_semantics() {
        let buffer: BoundedBuffer<u32> = BoundedBuffer::new(2).unwrap();
        buffer.put(1).unwrap();
        buffer.close().unwrap();
        buffer.close().unwrap(); // idempotent

        // Pending item still drains, then end-of-stream sticks
        assert!(matches!(buffer.put(2), Err(CouloirError::Closed)));
        assert_eq!(buffer.take().unwrap(), Some(1));
        assert_eq!(buffer.take().unwrap(), None);
        assert_eq!(buffer.take().unwrap(), None);
    }

    #[test]
    fn test_semaphore_exclusion_backend() {
        let buffer: BoundedBuffer<u32, SemaphoreExclusion> =
            BoundedBuffer::with_exclusion(2, SemaphoreExclusion::default()).unwrap();
        buffer.put(10).unwrap();
        buffer.put(20).unwrap();
        assert_eq!(buffer.take().unwrap(), Some(10));
        assert_eq!(buffer.take().unwrap(), Some(20));
    }
}
