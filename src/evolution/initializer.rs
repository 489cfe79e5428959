//! Population initializers.

use std::fmt::Debug;

use crate::error::{GeneticError, Result};
use crate::genome::Genome;
use crate::rng::RandomNumberGenerator;

/// Trait for building the first generation from a seed genome.
pub trait Initializer<G: Genome>: Debug + Send + Sync {
    /// Builds `size` members from `seed`. The seed itself is not modified.
    fn init(&self, seed: &G, size: usize, rng: &mut RandomNumberGenerator) -> Result<Vec<G>>;
}

/// Fills the population with randomized copies of the seed genome.
///
/// # Examples
///
/// ```
/// use galib::evolution::{Initializer, RandomInitializer};
/// use galib::genome::{AlphabetGenome, Genome};
/// use galib::rng::RandomNumberGenerator;
///
/// let seed = AlphabetGenome::new(vec!['a', 'b'], None, vec!['a'; 4], |g: &[char]| g.len() as f64).unwrap();
/// let mut rng = RandomNumberGenerator::from_seed(3);
/// let members = RandomInitializer.init(&seed, 6, &mut rng).unwrap();
///
/// assert_eq!(members.len(), 6);
/// assert!(members.iter().all(|m| m.len() == 4));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomInitializer;

impl<G: Genome> Initializer<G> for RandomInitializer {
    fn init(&self, seed: &G, size: usize, rng: &mut RandomNumberGenerator) -> Result<Vec<G>> {
        if size == 0 {
            return Err(GeneticError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }

        Ok((0..size)
            .map(|_| {
                let mut member = seed.clone();
                member.randomize(rng);
                member
            })
            .collect())
    }
}
