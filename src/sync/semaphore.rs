//! Counting semaphore built on `Mutex` + `Condvar`

use std::sync::{Condvar, Mutex};

use crate::error::{CouloirError, Result};

/// Counting semaphore: a non-negative permit count with blocking acquire.
///
/// `acquire` blocks while the count is zero, then decrements; `release`
/// increments and wakes blocked acquirers. No fairness guarantee is made
/// about which waiter wakes first.
#[derive(Debug)]
pub struct Semaphore {
    permits: Mutex<usize>,
    available: Condvar,
}

impl Semaphore {
    /// Create a semaphore with the given initial permit count
    pub fn new(permits: usize) -> Self {
        Self {
            permits: Mutex::new(permits),
            available: Condvar::new(),
        }
    }

    /// Acquire one permit, blocking while none are available
    pub fn acquire(&self) -> Result<()> {
        let mut count = self
            .permits
            .lock()
            .map_err(|_| CouloirError::concurrency("semaphore mutex poisoned"))?;
        // Wait loop guards against spurious wakeups
        while *count == 0 {
            count = self
                .available
                .wait(count)
                .map_err(|_| CouloirError::concurrency("semaphore mutex poisoned"))?;
        }
        *count -= 1;
        Ok(())
    }

    /// Acquire one permit without blocking; returns whether one was taken
    pub fn try_acquire(&self) -> Result<bool> {
        let mut count = self
            .permits
            .lock()
            .map_err(|_| CouloirError::concurrency("semaphore mutex poisoned"))?;
        if *count == 0 {
            return Ok(false);
        }
        *count -= 1;
        Ok(true)
    }

    /// Release one permit, potentially waking a blocked acquirer
    pub fn release(&self) -> Result<()> {
        let mut count = self
            .permits
            .lock()
            .map_err(|_| CouloirError::concurrency("semaphore mutex poisoned"))?;
        *count += 1;
        self.available.notify_one();
        Ok(())
    }

    /// Current permit count (a snapshot; only meaningful at quiescent points)
    pub fn permits(&self) -> Result<usize> {
        let count = self
            .permits
            .lock()
            .map_err(|_| CouloirError::concurrency("semaphore mutex poisoned"))?;
        Ok(*count)
    }
}
