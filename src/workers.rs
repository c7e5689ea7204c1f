//! Producer and consumer role loops plus pair orchestration
//!
//! The role entry points are plain blocking functions meant to run on their
//! own threads; [`run_pair`] does the spawn/join plumbing for the common
//! one-producer-one-consumer setup and closes the buffer once production
//! finishes, so the consumer always observes end-of-stream instead of
//! relying on a shared iteration count.

use std::{sync::Arc, thread};

use log::debug;

use crate::{
    buffer::BoundedBuffer,
    error::{CouloirError, Result},
    sync::Exclusion,
};

/// Outcome of a [`run_pair`] execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairReport {
    /// Items the producer inserted
    pub produced: usize,
    /// Items the consumer removed
    pub consumed: usize,
}

/// Produce `item_count` items into the buffer, generating each with
/// `generate(slot)`. Blocks whenever the buffer is full.
///
/// Does not close the buffer; callers decide when the stream ends.
pub fn run_producer<T, X, G>(
    buffer: &BoundedBuffer<T, X>,
    item_count: usize,
    mut generate: G,
) -> Result<usize>
where
    X: Exclusion,
    G: FnMut(usize) -> T,
{
    for slot in 0..item_count {
        let item = generate(slot);
        buffer.put(item)?;
        debug!("producer: slot {}", slot);
    }
    Ok(item_count)
}

/// Consume up to `item_count` items from the buffer, blocking whenever it
/// is empty. Stops early at end-of-stream (closed and drained).
///
/// Returns the items in arrival order.
pub fn run_consumer<T, X>(buffer: &BoundedBuffer<T, X>, item_count: usize) -> Result<Vec<T>>
where
    X: Exclusion,
{
    let mut items = Vec::with_capacity(item_count);
    while items.len() < item_count {
        match buffer.take()? {
            Some(item) => {
                debug!("consumer: slot {}", items.len());
                items.push(item);
            }
            None => break,
        }
    }
    Ok(items)
}

/// Run one producer thread and one consumer thread over the buffer, each
/// for `item_count` operations, and join both.
///
/// The producer closes the buffer after its last `put`. Spawn and join
/// failures surface as [`CouloirError::Thread`]; a panic inside either role
/// is reported as a join failure rather than propagated.
pub fn run_pair<T, X, G>(
    buffer: Arc<BoundedBuffer<T, X>>,
    item_count: usize,
    generate: G,
) -> Result<PairReport>
where
    T: Send + 'static,
    X: Exclusion + 'static,
    G: FnMut(usize) -> T + Send + 'static,
{
    let producer = {
        let buffer = buffer.clone();
        thread::Builder::new()
            .name("producer".into())
            .spawn(move || -> Result<usize> {
                let produced = run_producer(&buffer, item_count, generate)?;
                buffer.close()?;
                Ok(produced)
            })
            .map_err(|e| CouloirError::thread("spawn", format!("producer: {}", e)))?
    };

    let consumer = {
        let buffer = buffer.clone();
        thread::Builder::new()
            .name("consumer".into())
            .spawn(move || -> Result<usize> { Ok(run_consumer(&buffer, item_count)?.len()) })
            .map_err(|e| CouloirError::thread("spawn", format!("consumer: {}", e)))?
    };

    let produced = producer
        .join()
        .map_err(|_| CouloirError::thread("join", "producer thread panicked"))??;
    let consumed = consumer
        .join()
        .map_err(|_| CouloirError::thread("join", "consumer thread panicked"))??;

    Ok(PairReport { produced, consumed })
}
