use std::fmt::Debug;

use crate::error::Result;
use crate::genome::Genome;
use crate::population::Population;
use crate::rng::RandomNumberGenerator;

/// Trait for selection policies.
///
/// A selector picks one member of a population to become a parent. It only reads the
/// population; the direction of "better" comes from the population's
/// [`Objective`](crate::objective::Objective).
///
/// # Examples
///
/// ```
/// use galib::genome::AlphabetGenome;
/// use galib::objective::Objective;
/// use galib::population::Population;
/// use galib::rng::RandomNumberGenerator;
/// use galib::selection::{Selector, TournamentSelector};
///
/// let sum = |genes: &[i32]| genes.iter().sum::<i32>() as f64;
/// let members = vec![
///     AlphabetGenome::new(vec![0, 1], None, vec![0, 0], sum).unwrap(),
///     AlphabetGenome::new(vec![0, 1], None, vec![1, 1], sum).unwrap(),
/// ];
/// let population = Population::new(members, Objective::Minimize);
///
/// let selector = TournamentSelector::new(0.7, 2).unwrap();
/// let mut rng = RandomNumberGenerator::from_seed(5);
/// let parent = selector.select_one(&population, &mut rng);
/// assert!(population.iter().any(|member| std::ptr::eq(member, parent)));
/// ```
pub trait Selector<G: Genome>: Debug + Send + Sync {
    /// Selects one member of the population.
    ///
    /// # Panics
    ///
    /// Implementations panic on violated preconditions (an empty population or a
    /// misconfigured selector); those are programming errors, not runtime conditions.
    /// Call [`Selector::validate`] up front to catch misconfiguration as an error.
    fn select_one<'a>(&self, population: &'a Population<G>, rng: &mut RandomNumberGenerator) -> &'a G;

    /// Checks the selector's configuration.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Human-readable name, used in reports.
    fn name(&self) -> &str;
}
