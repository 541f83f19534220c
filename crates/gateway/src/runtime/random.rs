//! Injected randomness for nag item/person selection.

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::Rng;

/// Uniform index picker.
pub trait RandomSource: Send + Sync {
    /// Return an index in `0..len`. `len` must be non-zero.
    fn pick(&self, len: usize) -> usize;
}

/// Production source backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&self, len: usize) -> usize {
        debug_assert!(len > 0, "pick from an empty list");
        rand::thread_rng().gen_range(0..len)
    }
}

/// Deterministic source that replays a fixed sequence of picks, cycling
/// when exhausted. Each pick is reduced modulo `len`.
#[derive(Debug)]
pub struct SequenceRandom {
    picks: Vec<usize>,
    cursor: AtomicUsize,
}

impl SequenceRandom {
    pub fn new(picks: Vec<usize>) -> Self {
        Self {
            picks,
            cursor: AtomicUsize::new(0),
        }
    }
}

impl RandomSource for SequenceRandom {
    fn pick(&self, len: usize) -> usize {
        if self.picks.is_empty() || len == 0 {
            return 0;
        }
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.picks[i % self.picks.len()] % len
    }
}
