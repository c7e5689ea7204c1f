//! Synchronization primitives for the bounded-buffer protocol
//!
//! Two building blocks:
//! - A counting [`Semaphore`] tracking free and filled slots. Acquire blocks
//!   while the count is zero; release increments and wakes waiters.
//! - An [`Exclusion`] capability guarding the critical section around the
//!   slot array. Two interchangeable backends are provided: a plain mutex
//!   ([`LockExclusion`]) and a binary semaphore ([`SemaphoreExclusion`]).
//!   Both give the same guarantee; callers pick one at construction.

pub mod exclusion;
pub mod semaphore;

pub use exclusion::{Exclusion, LockExclusion, SemaphoreExclusion};
pub use semaphore::Semaphore;
