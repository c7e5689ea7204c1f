//! Pluggable mutual-exclusion backends for the buffer's critical section

use std::sync::Mutex;

use crate::error::{CouloirError, Result};
use crate::sync::semaphore::Semaphore;

/// Mutual-exclusion capability: run a closure with at most one thread
/// inside at a time.
///
/// The buffer's critical section (slot write/read plus position update) is
/// expressed as a closure so the backend choice stays orthogonal to the
/// protocol. Backends must not block inside `with` for any reason other
/// than waiting for the region itself.
pub trait Exclusion: Send + Sync {
    /// Execute `f` inside the mutual-exclusion region
    fn with<R>(&self, f: impl FnOnce() -> R) -> Result<R>;
}

/// Mutex-backed exclusion (the default backend)
#[derive(Debug, Default)]
pub struct LockExclusion {
    lock: Mutex<()>,
}

impl Exclusion for LockExclusion {
    fn with<R>(&self, f: impl FnOnce() -> R) -> Result<R> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| CouloirError::concurrency("exclusion mutex poisoned"))?;
        Ok(f())
    }
}

/// Binary-semaphore-backed exclusion, behaviorally equivalent to
/// [`LockExclusion`]
#[derive(Debug)]
pub struct SemaphoreExclusion {
    gate: Semaphore,
}

impl Default for SemaphoreExclusion {
    fn default() -> Self {
        Self {
            gate: Semaphore::new(1),
        }
    }
}

impl Exclusion for SemaphoreExclusion {
    fn with<R>(&self, f: impl FnOnce() -> R) -> Result<R> {
        self.gate.acquire()?;
        let result = f();
        self.gate.release()?;
        Ok(result)
    }
}
