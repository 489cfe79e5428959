//! Cut-point breeders.

use crate::breeding::Breeder;
use crate::error::{GeneticError, Result};
use crate::genome::Genome;
use crate::rng::RandomNumberGenerator;

fn check_parents<G: Genome>(a: &G, b: &G) -> Result<usize> {
    if a.is_empty() || b.is_empty() {
        return Err(GeneticError::Breeding(
            "Cannot breed empty genomes".to_string(),
        ));
    }
    if a.len() != b.len() {
        return Err(GeneticError::Breeding(format!(
            "Parents have different lengths ({} and {})",
            a.len(),
            b.len()
        )));
    }
    Ok(a.len())
}

fn cross<G: Genome>(a: &G, b: &G, p1: usize, p2: usize) -> Result<(G, G)> {
    a.crossover(b, p1, p2).map_err(|e| {
        GeneticError::Breeding(format!("Crossover at [{}, {}] failed: {}", p1, p2, e))
    })
}

/// Two-point crossover.
///
/// Draws two cut points in `0..len`, orders them, and exchanges the inclusive range
/// between the parents.
///
/// # Examples
///
/// ```
/// use galib::breeding::{Breeder, TwoPointBreeder};
/// use galib::genome::{AlphabetGenome, Genome};
/// use galib::rng::RandomNumberGenerator;
///
/// let fitness = |genes: &[u8]| genes.len() as f64;
/// let a = AlphabetGenome::new(vec![0, 1], None, vec![0; 6], fitness).unwrap();
/// let b = AlphabetGenome::new(vec![0, 1], None, vec![1; 6], fitness).unwrap();
///
/// let mut rng = RandomNumberGenerator::from_seed(11);
/// let (x, y) = TwoPointBreeder.breed(&a, &b, &mut rng).unwrap();
///
/// // Every position comes from exactly one parent.
/// for i in 0..6 {
///     assert_ne!(x.genes()[i], y.genes()[i]);
/// }
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TwoPointBreeder;

impl<G: Genome> Breeder<G> for TwoPointBreeder {
    fn breed(&self, a: &G, b: &G, rng: &mut RandomNumberGenerator) -> Result<(G, G)> {
        let len = check_parents(a, b)?;
        let mut p1 = rng.gen_index(len);
        let mut p2 = rng.gen_index(len);
        if p1 > p2 {
            std::mem::swap(&mut p1, &mut p2);
        }
        cross(a, b, p1, p2)
    }

    fn name(&self) -> &str {
        "TwoPointBreeder"
    }
}

/// One-point crossover: exchanges everything from a random cut to the end.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OnePointBreeder;

impl<G: Genome> Breeder<G> for OnePointBreeder {
    fn breed(&self, a: &G, b: &G, rng: &mut RandomNumberGenerator) -> Result<(G, G)> {
        let len = check_parents(a, b)?;
        let p1 = rng.gen_index(len);
        cross(a, b, p1, len - 1)
    }

    fn name(&self) -> &str {
        "OnePointBreeder"
    }
}
