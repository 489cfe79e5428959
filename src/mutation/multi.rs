//! Composition of several mutators into one.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use rand::distributions::{Distribution, WeightedIndex};
use tracing::trace;

use crate::error::{GeneticError, Result};
use crate::genome::Genome;
use crate::mutation::Mutator;
use crate::rng::RandomNumberGenerator;

/// How [`MultiMutator`] picks the mutator to apply.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawPolicy {
    /// Probability proportional to the registered weight.
    #[default]
    Weighted,
    /// Every registered mutator is equally likely; weights are only reported.
    Uniform,
}

/// Per-mutator usage report.
#[derive(Debug, Clone, PartialEq)]
pub struct MutatorUsage {
    pub name: String,
    pub weight: f64,
    pub uses: usize,
}

struct Entry<G: Genome> {
    mutator: Box<dyn Mutator<G>>,
    weight: f64,
    uses: AtomicUsize,
}

/// Combines several mutators into one.
///
/// Each call to [`Mutator::mutate`] draws one registered mutator, counts the use, and
/// delegates to it. With nothing registered, the genome is copied unchanged.
///
/// # Examples
///
/// ```
/// use galib::genome::AlphabetGenome;
/// use galib::mutation::{MultiMutator, Mutator, RandomMutator, SwitchMutator};
/// use galib::rng::RandomNumberGenerator;
///
/// let mut mutator: MultiMutator<AlphabetGenome<i32>> = MultiMutator::new();
/// mutator.add(RandomMutator);
/// mutator.add_weighted(SwitchMutator, 3.0).unwrap();
///
/// let genome = AlphabetGenome::new(vec![1, 2], None, vec![1, 2, 1], |g: &[i32]| g.len() as f64).unwrap();
/// let mut rng = RandomNumberGenerator::from_seed(1);
/// for _ in 0..10 {
///     mutator.mutate(&genome, &mut rng).unwrap();
/// }
/// assert_eq!(mutator.usage().iter().map(|u| u.uses).sum::<usize>(), 10);
/// ```
pub struct MultiMutator<G: Genome> {
    entries: Vec<Entry<G>>,
    policy: DrawPolicy,
    index: Option<WeightedIndex<f64>>,
}

impl<G: Genome> MultiMutator<G> {
    /// Creates an empty multi mutator with weighted draws.
    pub fn new() -> Self {
        Self::with_policy(DrawPolicy::Weighted)
    }

    pub fn with_policy(policy: DrawPolicy) -> Self {
        Self {
            entries: Vec::new(),
            policy,
            index: None,
        }
    }

    pub fn policy(&self) -> DrawPolicy {
        self.policy
    }

    /// Registers a mutator with weight 1.
    pub fn add<M>(&mut self, mutator: M)
    where
        M: Mutator<G> + 'static,
    {
        self.push(Box::new(mutator), 1.0);
    }

    /// Registers a mutator with an explicit weight.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` unless `weight` is finite and positive.
    pub fn add_weighted<M>(&mut self, mutator: M, weight: f64) -> Result<()>
    where
        M: Mutator<G> + 'static,
    {
        if !(weight.is_finite() && weight > 0.0) {
            return Err(GeneticError::Configuration(format!(
                "Mutator weight must be finite and positive, got {}",
                weight
            )));
        }
        self.push(Box::new(mutator), weight);
        Ok(())
    }

    /// Registers an already boxed mutator.
    pub fn add_boxed(&mut self, mutator: Box<dyn Mutator<G>>, weight: f64) -> Result<()> {
        if !(weight.is_finite() && weight > 0.0) {
            return Err(GeneticError::Configuration(format!(
                "Mutator weight must be finite and positive, got {}",
                weight
            )));
        }
        self.push(mutator, weight);
        Ok(())
    }

    fn push(&mut self, mutator: Box<dyn Mutator<G>>, weight: f64) {
        self.entries.push(Entry {
            mutator,
            weight,
            uses: AtomicUsize::new(0),
        });
        // Weights were validated on the way in, so the index always builds.
        self.index = WeightedIndex::new(self.entries.iter().map(|e| e.weight)).ok();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Per-mutator name, weight and invocation count, in registration order.
    pub fn usage(&self) -> Vec<MutatorUsage> {
        self.entries
            .iter()
            .map(|entry| MutatorUsage {
                name: entry.mutator.name().to_string(),
                weight: entry.weight,
                uses: entry.uses.load(Ordering::Relaxed),
            })
            .collect()
    }

    /// Human-readable usage summary, e.g. `Used RandomMutator 3 times, SwitchMutator 1 times`.
    pub fn summary(&self) -> String {
        let parts: Vec<String> = self
            .usage()
            .iter()
            .map(|usage| format!("{} {} times", usage.name, usage.uses))
            .collect();
        format!("Used {}", parts.join(", "))
    }

    fn draw(&self, rng: &mut RandomNumberGenerator) -> usize {
        match (self.policy, &self.index) {
            (DrawPolicy::Weighted, Some(index)) => index.sample(&mut rng.rng),
            _ => rng.gen_index(self.entries.len()),
        }
    }
}

impl<G: Genome> Default for MultiMutator<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Genome> fmt::Debug for MultiMutator<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiMutator")
            .field("policy", &self.policy)
            .field("mutators", &self.usage())
            .finish()
    }
}

impl<G: Genome> Mutator<G> for MultiMutator<G> {
    fn mutate(&self, genome: &G, rng: &mut RandomNumberGenerator) -> Result<G> {
        if self.entries.is_empty() {
            return Ok(genome.clone());
        }

        let entry = &self.entries[self.draw(rng)];
        entry.uses.fetch_add(1, Ordering::Relaxed);
        trace!(mutator = entry.mutator.name(), "applying mutator");
        entry.mutator.mutate(genome, rng)
    }

    fn name(&self) -> &str {
        "MultiMutator"
    }

    fn stats(&self) -> Option<String> {
        Some(self.summary())
    }
}
