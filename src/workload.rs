//! Placeholder item generator
//!
//! Stands in for a real production cost so the demo CLI has something to
//! push through the buffer. It is deliberately outside the buffer's
//! interface; tests substitute cheap fixtures instead.

/// Compute `n!` as an `f64` (overflows to infinity for large `n`, which is
/// fine for a placeholder workload)
pub fn factorial(n: usize) -> f64 {
    if n == 0 {
        1.0
    } else {
        n as f64 * factorial(n - 1)
    }
}
