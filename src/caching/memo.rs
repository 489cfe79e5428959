//! # Fitness Memoization
//!
//! Wrappers that memoize a [`Challenge`] by gene content, so two genomes holding the
//! same genes share one evaluation.

use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};

use thread_local::ThreadLocal;

use crate::challenge::Challenge;

/// Where memoized scores are kept.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheType {
    /// One mutex-protected map shared by every thread.
    Global,
    /// One map per thread, no locking.
    ThreadLocal,
}

/// A wrapper around a challenge that caches fitness evaluations in a shared map.
#[derive(Debug)]
pub struct MemoizedChallenge<T, C>
where
    T: Eq + Hash,
{
    challenge: C,
    cache: Arc<Mutex<HashMap<Vec<T>, f64>>>,
}

impl<T, C> MemoizedChallenge<T, C>
where
    T: Eq + Hash + Clone,
    C: Challenge<T>,
{
    /// Creates a new memoized challenge wrapping the given challenge.
    pub fn new(challenge: C) -> Self {
        Self {
            challenge,
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Creates a new memoized challenge with a pre-populated cache.
    pub fn with_cache(challenge: C, cache: HashMap<Vec<T>, f64>) -> Self {
        Self {
            challenge,
            cache: Arc::new(Mutex::new(cache)),
        }
    }

    /// Returns a reference to the wrapped challenge.
    pub fn inner(&self) -> &C {
        &self.challenge
    }

    /// Returns the number of cached fitness evaluations.
    pub fn cache_size(&self) -> usize {
        self.lock().len()
    }

    /// Clears the cache.
    pub fn clear_cache(&self) {
        self.lock().clear();
    }

    /// Returns a copy of the cache.
    pub fn get_cache(&self) -> HashMap<Vec<T>, f64> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Vec<T>, f64>> {
        // A panic inside a fitness function cannot leave the map half-written.
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T, C> Clone for MemoizedChallenge<T, C>
where
    T: Eq + Hash,
    C: Clone,
{
    /// Clones share the same cache.
    fn clone(&self) -> Self {
        Self {
            challenge: self.challenge.clone(),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<T, C> Challenge<T> for MemoizedChallenge<T, C>
where
    T: Eq + Hash + Clone + Send + Sync,
    C: Challenge<T>,
{
    fn score(&self, genes: &[T]) -> f64 {
        if let Some(score) = self.lock().get(genes) {
            return *score;
        }

        // Not holding the lock while scoring lets other threads hit the cache.
        let score = self.challenge.score(genes);
        self.lock().insert(genes.to_vec(), score);
        score
    }
}

/// A thread-local cache for fitness evaluations.
#[derive(Debug)]
pub struct ThreadLocalCache<T>
where
    T: Eq + Hash + Send,
{
    cache: ThreadLocal<RefCell<HashMap<Vec<T>, f64>>>,
}

impl<T> ThreadLocalCache<T>
where
    T: Eq + Hash + Clone + Send,
{
    /// Creates a new empty thread-local cache.
    pub fn new() -> Self {
        Self {
            cache: ThreadLocal::new(),
        }
    }

    /// Gets a cached fitness value if available.
    pub fn get(&self, key: &[T]) -> Option<f64> {
        self.cache
            .get()
            .and_then(|cell| cell.try_borrow().ok())
            .and_then(|cache| cache.get(key).copied())
    }

    /// Inserts a fitness value into the current thread's cache.
    pub fn insert(&self, key: &[T], value: f64) {
        if let Ok(mut cache) = self.cache.get_or_default().try_borrow_mut() {
            cache.insert(key.to_vec(), value);
        }
    }

    /// Clears the cache for the current thread.
    pub fn clear(&self) {
        if let Some(cell) = self.cache.get() {
            if let Ok(mut cache) = cell.try_borrow_mut() {
                cache.clear();
            }
        }
    }

    /// Returns the number of cached fitness evaluations for the current thread.
    pub fn len(&self) -> usize {
        self.cache
            .get()
            .and_then(|cell| cell.try_borrow().ok())
            .map_or(0, |cache| cache.len())
    }

    /// Returns `true` if the cache for the current thread is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for ThreadLocalCache<T>
where
    T: Eq + Hash + Clone + Send,
{
    fn default() -> Self {
        Self::new()
    }
}

/// A wrapper around a challenge that uses a thread-local cache for fitness evaluations.
///
/// Designed for parallel evaluation, where each worker thread keeps its own cache
/// to avoid mutex contention.
#[derive(Debug)]
pub struct ThreadLocalMemoizedChallenge<T, C>
where
    T: Eq + Hash + Send,
{
    challenge: C,
    cache: Arc<ThreadLocalCache<T>>,
}

impl<T, C> ThreadLocalMemoizedChallenge<T, C>
where
    T: Eq + Hash + Clone + Send,
    C: Challenge<T>,
{
    pub fn new(challenge: C) -> Self {
        Self {
            challenge,
            cache: Arc::new(ThreadLocalCache::new()),
        }
    }

    pub fn inner(&self) -> &C {
        &self.challenge
    }

    /// Clears the cache for the current thread.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Returns the number of cached fitness evaluations for the current thread.
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl<T, C> Clone for ThreadLocalMemoizedChallenge<T, C>
where
    T: Eq + Hash + Send,
    C: Clone,
{
    fn clone(&self) -> Self {
        Self {
            challenge: self.challenge.clone(),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<T, C> Challenge<T> for ThreadLocalMemoizedChallenge<T, C>
where
    T: Eq + Hash + Clone + Send + Sync,
    C: Challenge<T>,
{
    fn score(&self, genes: &[T]) -> f64 {
        if let Some(score) = self.cache.get(genes) {
            return score;
        }

        let score = self.challenge.score(genes);
        self.cache.insert(genes, score);
        score
    }
}

/// Extension trait for wrapping any challenge with memoization.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use galib::caching::{CacheType, CachingChallenge, MemoizedChallenge};
/// use galib::challenge::Challenge;
///
/// let challenge = |genes: &[u8]| genes.iter().map(|&g| g as f64).sum::<f64>();
/// let memoized: MemoizedChallenge<u8, _> = challenge.memoized();
/// assert_eq!(memoized.score(&[1, 2]), 3.0);
///
/// let counter = |genes: &[u8]| genes.len() as f64;
/// let shared: Arc<dyn Challenge<u8>> = counter.with_cache(CacheType::ThreadLocal);
/// assert_eq!(shared.score(&[1, 2]), 2.0);
/// ```
pub trait CachingChallenge<T>: Challenge<T> + Sized
where
    T: Eq + Hash + Clone + Send + Sync + 'static,
{
    /// Wraps this challenge in a `MemoizedChallenge`, which uses a mutex-protected
    /// cache shared across all threads.
    fn memoized(self) -> MemoizedChallenge<T, Self> {
        MemoizedChallenge::new(self)
    }

    /// Wraps this challenge in a `ThreadLocalMemoizedChallenge`, which uses a separate
    /// cache for each thread.
    fn thread_local_memoized(self) -> ThreadLocalMemoizedChallenge<T, Self> {
        ThreadLocalMemoizedChallenge::new(self)
    }

    /// Wraps this challenge with a cache of the given type, ready to be shared
    /// between genomes.
    fn with_cache(self, cache_type: CacheType) -> Arc<dyn Challenge<T>>
    where
        Self: 'static,
    {
        match cache_type {
            CacheType::Global => Arc::new(self.memoized()),
            CacheType::ThreadLocal => Arc::new(self.thread_local_memoized()),
        }
    }
}

impl<T, C> CachingChallenge<T> for C
where
    T: Eq + Hash + Clone + Send + Sync + 'static,
    C: Challenge<T>,
{
}
