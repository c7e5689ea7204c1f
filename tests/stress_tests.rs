//! Stress tests: long runs with deliberate scheduling perturbation
//!
//! Both exclusion backends push 10,000+ items through a small buffer while
//! producer and consumer yield and sleep at different periods to shake out
//! orderings; invariants are sampled between operations.

use std::{
    sync::{Arc, Barrier},
    thread,
    time::Duration,
};

use couloir::{
    run_pair, BoundedBuffer, Exclusion, LockExclusion, SemaphoreExclusion,
};

const STRESS_ITEMS: usize = 10_000;
const STRESS_CAPACITY: usize = 4;

fn stress_backend<X: Exclusion + Default + 'static>() {
    let buffer = Arc::new(
        BoundedBuffer::<usize, X>::with_exclusion(STRESS_CAPACITY, X::default()).unwrap(),
    );
    let barrier = Arc::new(Barrier::new(2));

    let producer = {
        let buffer = buffer.clone();
        let barrier = barrier.clone();
        thread::Builder::new()
            .name("stress-producer".into())
            .spawn(move || {
                barrier.wait();
                for i in 0..STRESS_ITEMS {
                    buffer.put(i).unwrap();
                    // Perturb scheduling at prime-ish periods
                    if i % 193 == 0 {
                        thread::yield_now();
                    }
                    if i % 1999 == 0 {
                        thread::sleep(Duration::from_millis(1));
                    }
                }
                buffer.close().unwrap();
            })
            .unwrap()
    };

    let consumer = {
        let buffer = buffer.clone();
        let barrier = barrier.clone();
        thread::Builder::new()
            .name("stress-consumer".into())
            .spawn(move || {
                barrier.wait();
                let mut next = 0;
                while let Some(item) = buffer.take().unwrap() {
                    // FIFO: every item arrives exactly once, in order
                    assert_eq!(item, next);
                    next += 1;

                    // Sampled invariants
                    if next % 512 == 0 {
                        let (free, filled) = buffer.counters().unwrap();
                        assert_eq!(free + filled, STRESS_CAPACITY);
                    }
                    if next % 149 == 0 {
                        thread::yield_now();
                    }
                    if next % 2503 == 0 {
                        thread::sleep(Duration::from_millis(1));
                    }
                }
                next
            })
            .unwrap()
    };

    producer.join().unwrap();
    let consumed = consumer.join().unwrap();

    assert_eq!(consumed, STRESS_ITEMS);
    assert_eq!(buffer.free_slots().unwrap(), STRESS_CAPACITY);
    assert_eq!(buffer.filled_slots().unwrap(), 0);
}

/// Test: 10,000 items through a 4-slot buffer with the mutex backend
#[test]
fn test_stress_lock_exclusion() {
    stress_backend::<LockExclusion>();
}

/// Test: 10,000 items through a 4-slot buffer with the binary-semaphore
/// backend
#[test]
fn test_stress_semaphore_exclusion() {
    stress_backend::<SemaphoreExclusion>();
}

/// Test: the orchestrated pair survives the same load end to end
#[test]
fn test_stress_run_pair() {
    let buffer = Arc::new(BoundedBuffer::<usize>::new(STRESS_CAPACITY).unwrap());
    let report = run_pair(buffer.clone(), STRESS_ITEMS, |slot| slot).unwrap();

    assert_eq!(report.produced, STRESS_ITEMS);
    assert_eq!(report.consumed, STRESS_ITEMS);
    assert_eq!(buffer.free_slots().unwrap(), STRESS_CAPACITY);
}

/// Test: repeated short runs terminate for a spread of capacities and counts
#[test]
fn test_termination_matrix() {
    for capacity in [1, 2, 3, 7] {
        for items in [1, 2, 5, 64] {
            let buffer = Arc::new(BoundedBuffer::<usize>::new(capacity).unwrap());
            let report = run_pair(buffer, items, |slot| slot).unwrap();
            assert_eq!(report.produced, items, "capacity {}", capacity);
            assert_eq!(report.consumed, items, "capacity {}", capacity);
        }
    }
}
