//! # Breeding
//!
//! A breeder combines two parents into two children. It only chooses the cut points;
//! the actual exchange of genes is the genome's own [`Genome::crossover`], so every
//! representation keeps its invariants.

pub mod point;

use std::fmt::Debug;

use crate::error::Result;
use crate::genome::Genome;
use crate::rng::RandomNumberGenerator;

pub use point::{OnePointBreeder, TwoPointBreeder};

/// Trait for crossover policies.
pub trait Breeder<G: Genome>: Debug + Send + Sync {
    /// Breeds two children from `a` and `b`. The parents are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Breeding` when the parents cannot be crossed.
    fn breed(&self, a: &G, b: &G, rng: &mut RandomNumberGenerator) -> Result<(G, G)>;

    /// Human-readable name, used in reports.
    fn name(&self) -> &str;
}
