//! # Mutation
//!
//! Mutators take a genome and return a (possibly) perturbed copy. The input is never
//! modified, so a mutator can be applied to a population member that is still being
//! read by a selector.

pub mod multi;
pub mod operators;

use std::fmt::Debug;

use crate::error::Result;
use crate::genome::Genome;
use crate::rng::RandomNumberGenerator;

pub use multi::{DrawPolicy, MultiMutator, MutatorUsage};
pub use operators::{RandomMutator, ShiftMutator, SwitchMutator};

/// Trait for mutation operators.
pub trait Mutator<G: Genome>: Debug + Send + Sync {
    /// Returns a mutated copy of `genome`.
    fn mutate(&self, genome: &G, rng: &mut RandomNumberGenerator) -> Result<G>;

    /// Human-readable name, used in reports.
    fn name(&self) -> &str;

    /// Usage statistics, for mutators that keep any.
    fn stats(&self) -> Option<String> {
        None
    }
}
