//! # Couloir - Blocking Bounded Buffer
//!
//! Couloir is a small synchronization library implementing the classical
//! bounded-buffer (producer/consumer) protocol: a fixed-capacity circular
//! slot array coordinated by two counting semaphores and one
//! mutual-exclusion region.
//!
//! ## Features
//!
//! - **Blocking put/take**: the producer blocks when the buffer is full,
//!   the consumer blocks when it is empty
//! - **Explicit end-of-stream**: `close()` lets producer and consumer run
//!   different iteration counts safely
//! - **Pluggable exclusion**: mutex-backed or binary-semaphore-backed
//!   critical section, behaviorally interchangeable
//! - **Worker orchestration**: role loops plus spawn/join plumbing for the
//!   one-producer-one-consumer pair
//!
//! ## Protocol
//!
//! ```text
//!                    ┌────────────────────────────────┐
//! producer ──put──▶  │  empty ──▶ [guard] ──▶ filled  │  ──take──▶ consumer
//!                    │  slots[pos % capacity]         │
//!                    └────────────────────────────────┘
//! ```
//!
//! `put` acquires a free-slot permit, writes inside the guarded region,
//! releases a filled-slot permit; `take` is symmetric. Neither side ever
//! blocks while holding the region, and at most one counting resource is
//! held at a time, so circular wait cannot arise.

pub mod buffer;
pub mod error;
pub mod sync;
pub mod workers;
pub mod workload;

// Main API re-exports
pub use buffer::BoundedBuffer;
pub use error::{CouloirError, Result};
pub use sync::{Exclusion, LockExclusion, Semaphore, SemaphoreExclusion};
pub use workers::{run_consumer, run_pair, run_producer, PairReport};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration constants
pub mod config {
    /// Default buffer capacity for the CLI runner
    pub const DEFAULT_CAPACITY: usize = 100;

    /// Default item count for the CLI runner
    pub const DEFAULT_ITEMS: usize = 100;
}
