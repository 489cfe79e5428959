//! # Caching Module
//!
//! Two layers of fitness caching live here.
//!
//! The per-genome layer, [`ScoreCache`] and [`Scored`], guarantees that a genome's
//! fitness function runs at most once per genome state. Every structural change to
//! the wrapped value goes through [`Scored::modify`], which invalidates the cached
//! score, so new genome representations cannot forget to do it.
//!
//! The cross-genome layer in [`memo`] memoizes a [`Challenge`](crate::challenge::Challenge)
//! by gene content. It helps when identical gene sequences show up in different
//! genomes, which happens often when parents are cloned through unchanged.

pub mod memo;

use std::sync::OnceLock;

pub use memo::{CacheType, CachingChallenge, MemoizedChallenge, ThreadLocalMemoizedChallenge};

/// A lazily computed fitness score with an explicit validity flag.
///
/// The cell is `Sync`, so a population can be scored from several threads; a score
/// that is computed concurrently is still computed once.
#[derive(Debug, Clone, Default)]
pub struct ScoreCache {
    cell: OnceLock<f64>,
}

impl ScoreCache {
    /// Creates an empty (invalid) cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached score, computing and storing it first if needed.
    pub fn get_or_compute<F>(&self, compute: F) -> f64
    where
        F: FnOnce() -> f64,
    {
        *self.cell.get_or_init(compute)
    }

    /// Returns the cached score if it is valid.
    pub fn get(&self) -> Option<f64> {
        self.cell.get().copied()
    }

    /// Returns `true` if a score is cached.
    pub fn is_valid(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Discards the cached score.
    pub fn invalidate(&mut self) {
        self.cell.take();
    }
}

/// A value paired with the cached score of that value.
///
/// Read access is free; write access is only available through [`Scored::modify`],
/// which invalidates the score after the closure runs.
#[derive(Debug, Clone, Default)]
pub struct Scored<T> {
    value: T,
    cache: ScoreCache,
}

impl<T> Scored<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            cache: ScoreCache::new(),
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Mutates the value and invalidates the cached score.
    pub fn modify<R, F>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        let result = f(&mut self.value);
        self.cache.invalidate();
        result
    }

    /// Returns the cached score, scoring the value with `score` if needed.
    pub fn score_with<F>(&self, score: F) -> f64
    where
        F: FnOnce(&T) -> f64,
    {
        self.cache.get_or_compute(|| score(&self.value))
    }

    pub fn cached_score(&self) -> Option<f64> {
        self.cache.get()
    }

    pub fn is_scored(&self) -> bool {
        self.cache.is_valid()
    }

    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_score_cache_computes_once() {
        let calls = AtomicUsize::new(0);
        let cache = ScoreCache::new();
        assert!(!cache.is_valid());

        let compute = || {
            calls.fetch_add(1, Ordering::SeqCst);
            3.5
        };
        assert_eq!(cache.get_or_compute(compute), 3.5);
        assert_eq!(cache.get_or_compute(|| unreachable!()), 3.5);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.get(), Some(3.5));
    }

    #[test]
    fn test_modify_invalidates() {
        let mut scored = Scored::new(vec![1, 2, 3]);
        let sum = |v: &Vec<i32>| v.iter().sum::<i32>() as f64;

        assert_eq!(scored.score_with(sum), 6.0);
        assert!(scored.is_scored());

        scored.modify(|v| v[0] = 10);
        assert!(!scored.is_scored());
        assert_eq!(scored.score_with(sum), 15.0);
    }

    #[test]
    fn test_clone_preserves_validity() {
        let scored = Scored::new(2u8);
        scored.score_with(|v| *v as f64);

        let copy = scored.clone();
        assert_eq!(copy.cached_score(), Some(2.0));
    }

    #[test]
    fn test_concurrent_first_score_runs_once() {
        use rayon::prelude::*;

        let calls = AtomicUsize::new(0);
        let scored = Scored::new(1u32);
        (0..64).into_par_iter().for_each(|_| {
            scored.score_with(|v| {
                calls.fetch_add(1, Ordering::SeqCst);
                *v as f64
            });
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
