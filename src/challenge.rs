//! # Challenge
//!
//! A `Challenge` is the user-supplied fitness function. It scores a gene sequence;
//! genomes hold a shared handle to it and cache the result.
//!
//! Any `Fn(&[T]) -> f64 + Send + Sync` closure is a challenge:
//!
//! ```rust
//! use galib::challenge::Challenge;
//!
//! let distance_to_four = |genes: &[i32]| genes.iter().map(|g| (4 - g) as f64).sum::<f64>();
//! assert_eq!(distance_to_four.score(&[1, 4, 4]), 3.0);
//! ```

/// Scores a gene sequence.
///
/// Implementations are expected to be deterministic and pure with respect to the gene
/// content: genomes evaluate a challenge at most once per state and reuse the value.
pub trait Challenge<T>: Send + Sync {
    fn score(&self, genes: &[T]) -> f64;
}

impl<T, F> Challenge<T> for F
where
    F: Fn(&[T]) -> f64 + Send + Sync,
{
    fn score(&self, genes: &[T]) -> f64 {
        self(genes)
    }
}
