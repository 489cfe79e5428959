//! # Genome Trait
//!
//! The `Genome` trait defines the interface for candidate solutions. The evolutionary
//! loop, selectors, breeders and mutators are written against this trait only, so any
//! representation that provides these capabilities can be evolved.
//!
//! ## Capabilities
//!
//! - copy: `Clone`, a deep-independent copy that keeps the cached score
//! - randomize: redraw every gene
//! - crossover: swap a gene range between copies of two parents
//! - splice: copy a gene range from another genome
//! - switch: swap two genes
//! - len: number of genes
//! - score: cached fitness
//! - reset: invalidate the cached fitness
//! - valid: representation-specific sanity check
//! - string: `Display`
//!
//! Every operator that changes genes must invalidate the cached score. Implementations
//! backed by [`Scored`](crate::caching::Scored) get this for free.
//!
//! ## Example
//!
//! ```rust
//! use galib::genome::{AlphabetGenome, Genome};
//! use galib::rng::RandomNumberGenerator;
//!
//! let genome = AlphabetGenome::new(
//!     vec![1, 2, 3, 4],
//!     None,
//!     vec![1, 2, 3, 4],
//!     |genes: &[i32]| genes.iter().map(|&g| (4 - g) as f64).sum::<f64>(),
//! )
//! .unwrap();
//!
//! assert_eq!(genome.score(), 6.0);
//!
//! let mut rng = RandomNumberGenerator::from_seed(3);
//! let mut copy = genome.clone();
//! copy.randomize(&mut rng);
//! assert!(!copy.is_scored());
//! ```

mod alphabet;

use std::fmt::{Debug, Display};

use crate::error::Result;
use crate::rng::RandomNumberGenerator;

pub use alphabet::{Alphabet, AlphabetGenome};

/// Trait for types that represent candidate solutions.
///
/// Types implementing this trait must also implement `Clone`, `Debug`, `Display`,
/// `Send`, and `Sync` so populations can be copied, reported and scored in parallel.
pub trait Genome: Clone + Debug + Display + Send + Sync + 'static {
    /// The gene value type.
    type Gene: Clone + PartialEq + Debug + Send + Sync;

    /// Read access to the genes, in order.
    fn genes(&self) -> &[Self::Gene];

    /// Replaces every gene with a random one and invalidates the cached score.
    fn randomize(&mut self, rng: &mut RandomNumberGenerator);

    /// Partially-mapped crossover.
    ///
    /// Clones both parents and swaps the inclusive gene range `[p1, p2]` between the
    /// clones. Both children start without a cached score.
    ///
    /// # Errors
    ///
    /// - `OutOfBounds` unless `p1 <= p2 < self.len()`
    /// - `IncompatibleGenomes` if the genomes differ in length or representation
    fn crossover(&self, other: &Self, p1: usize, p2: usize) -> Result<(Self, Self)>;

    /// Overwrites `[to, to + length)` of `self` with `[from, from + length)` of `other`
    /// and invalidates the cached score.
    fn splice(&mut self, other: &Self, from: usize, to: usize, length: usize) -> Result<()>;

    /// Swaps the genes at `x` and `y` and invalidates the cached score.
    fn switch(&mut self, x: usize, y: usize) -> Result<()>;

    /// Returns the number of genes.
    fn len(&self) -> usize {
        self.genes().len()
    }

    /// Returns `true` if the genome has no genes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the fitness score, evaluating the fitness function only if no valid
    /// score is cached.
    fn score(&self) -> f64;

    /// Returns `true` if a valid score is cached.
    fn is_scored(&self) -> bool;

    /// Invalidates the cached score.
    fn reset(&mut self);

    /// Representation-specific sanity check.
    fn is_valid(&self) -> bool {
        true
    }
}
