//! Diagnostics hooks for the exact phase.
//!
//! Evaluators report to a [`PredicateObserver`] supplied at construction. The
//! default [`NoopObserver`] compiles to nothing. [`CountingObserver`] keeps
//! advisory counters that may be shared between threads, for capacity tuning
//! and for checking that a given input really took the exact path. Nothing
//! reported here is ever consulted for a result.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

pub trait PredicateObserver {
    /// Called once per call that leaves the interval phase.
    fn exact_phase_entered(&self, _predicate: &'static str) {}

    /// Largest limb count held by any scratch node at the end of an exact
    /// evaluation.
    fn blocks_used(&self, _blocks: usize) {}
}

impl<O: PredicateObserver + ?Sized> PredicateObserver for &O {
    #[inline]
    fn exact_phase_entered(&self, predicate: &'static str) {
        (**self).exact_phase_entered(predicate);
    }

    #[inline]
    fn blocks_used(&self, blocks: usize) {
        (**self).blocks_used(blocks);
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl PredicateObserver for NoopObserver {}

/// Counts exact-phase entries and tracks the largest limb count seen.
#[derive(Debug, Default)]
pub struct CountingObserver {
    exact_entries: AtomicU64,
    max_blocks: AtomicUsize,
}

impl CountingObserver {
    pub const fn new() -> Self {
        Self {
            exact_entries: AtomicU64::new(0),
            max_blocks: AtomicUsize::new(0),
        }
    }

    pub fn exact_entries(&self) -> u64 {
        self.exact_entries.load(Ordering::Relaxed)
    }

    pub fn max_blocks(&self) -> usize {
        self.max_blocks.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.exact_entries.store(0, Ordering::Relaxed);
        self.max_blocks.store(0, Ordering::Relaxed);
    }
}

impl PredicateObserver for CountingObserver {
    #[inline]
    fn exact_phase_entered(&self, _predicate: &'static str) {
        self.exact_entries.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn blocks_used(&self, blocks: usize) {
        self.max_blocks.fetch_max(blocks, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn counts_across_threads() {
        let observer = Arc::new(CountingObserver::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let observer = Arc::clone(&observer);
                thread::spawn(move || {
                    for _ in 0..100 {
                        observer.exact_phase_entered("test");
                    }
                    observer.blocks_used(i * 10);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(observer.exact_entries(), 400);
        assert_eq!(observer.max_blocks(), 30);
        observer.reset();
        assert_eq!(observer.exact_entries(), 0);
    }

    #[test]
    fn borrowed_observer_forwards() {
        let observer = CountingObserver::new();
        let borrowed = &observer;
        borrowed.exact_phase_entered("test");
        PredicateObserver::blocks_used(&borrowed, 7);
        assert_eq!(observer.exact_entries(), 1);
        assert_eq!(observer.max_blocks(), 7);
    }
}
