//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct holds the run-level configuration of a
//! [`GeneticOptimizer`](crate::evolution::GeneticOptimizer): population size, the
//! optional generation bound, fitness direction, replacement policy, logging and
//! parallel evaluation.
//!
//! ## Example
//!
//! ```rust
//! use galib::evolution::options::{EvolutionOptions, LogLevel, Replacement};
//! use galib::objective::Objective;
//!
//! // Defaults: minimize, generational replacement, sequential evaluation.
//! let defaults = EvolutionOptions::default();
//! assert_eq!(defaults.get_objective(), Objective::Minimize);
//!
//! let options = EvolutionOptions::builder()
//!     .population_size(50)
//!     .max_generations(500)
//!     .replacement(Replacement::Elitist)
//!     .log_level(LogLevel::Minimal)
//!     .seed(42)
//!     .build();
//! assert_eq!(options.get_max_generations(), Some(500));
//! ```
//!
//! ## `LogLevel`
//!
//! - `Verbose`: a `debug!` event per generation plus a `trace!` event per member.
//! - `Minimal`: a `debug!` event per generation.
//! - `None`: no per-generation events. Start, convergence and stop are still reported.

use crate::objective::Objective;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Verbose,
    Minimal,
    #[default]
    None,
}

/// How the next generation is assembled.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Replacement {
    /// The next generation consists of `size` freshly bred (and possibly mutated)
    /// children of selected parents.
    #[default]
    Generational,
    /// Children and mutants are appended to the current members, then the combined
    /// pool is sorted and cut back to `size`. The current best can never be lost.
    Elitist,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    population_size: usize,
    /// Upper bound on generations for `optimize_until`
    max_generations: Option<usize>,
    objective: Objective,
    replacement: Replacement,
    log_level: LogLevel,
    parallel_evaluation: bool,
    /// Minimum population size for parallel evaluation
    parallel_threshold: usize,
    seed: Option<u64>,
}

impl EvolutionOptions {
    pub fn new(population_size: usize, objective: Objective, log_level: LogLevel) -> Self {
        Self {
            population_size,
            objective,
            log_level,
            ..Self::default()
        }
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_max_generations(&self) -> Option<usize> {
        self.max_generations
    }

    pub fn get_objective(&self) -> Objective {
        self.objective
    }

    pub fn get_replacement(&self) -> Replacement {
        self.replacement
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn get_parallel_evaluation(&self) -> bool {
        self.parallel_evaluation
    }

    /// Returns the minimum population size for parallel evaluation.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    /// Whether a population of `len` members is scored on the rayon pool.
    pub fn evaluates_in_parallel(&self, len: usize) -> bool {
        self.parallel_evaluation && len >= self.parallel_threshold
    }

    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    pub fn set_max_generations(&mut self, max_generations: Option<usize>) {
        self.max_generations = max_generations;
    }

    pub fn set_objective(&mut self, objective: Objective) {
        self.objective = objective;
    }

    pub fn set_replacement(&mut self, replacement: Replacement) {
        self.replacement = replacement;
    }

    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    pub fn set_parallel_evaluation(&mut self, parallel: bool) {
        self.parallel_evaluation = parallel;
    }

    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            population_size: 10,
            max_generations: None,
            objective: Objective::Minimize,
            replacement: Replacement::Generational,
            log_level: LogLevel::None,
            parallel_evaluation: false,
            parallel_threshold: 1000,
            seed: None,
        }
    }
}

/// Builder for `EvolutionOptions`.
///
/// Unset fields take the values of [`EvolutionOptions::default`].
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    population_size: Option<usize>,
    max_generations: Option<usize>,
    objective: Option<Objective>,
    replacement: Option<Replacement>,
    log_level: Option<LogLevel>,
    parallel_evaluation: Option<bool>,
    parallel_threshold: Option<usize>,
    seed: Option<u64>,
}

impl EvolutionOptionsBuilder {
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn max_generations(mut self, value: usize) -> Self {
        self.max_generations = Some(value);
        self
    }

    pub fn objective(mut self, value: Objective) -> Self {
        self.objective = Some(value);
        self
    }

    pub fn replacement(mut self, value: Replacement) -> Self {
        self.replacement = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    pub fn parallel_evaluation(mut self, value: bool) -> Self {
        self.parallel_evaluation = Some(value);
        self
    }

    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    /// Fixes the master seed, making the run reproducible.
    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    pub fn build(self) -> EvolutionOptions {
        let defaults = EvolutionOptions::default();
        EvolutionOptions {
            population_size: self.population_size.unwrap_or(defaults.population_size),
            max_generations: self.max_generations.or(defaults.max_generations),
            objective: self.objective.unwrap_or(defaults.objective),
            replacement: self.replacement.unwrap_or(defaults.replacement),
            log_level: self.log_level.unwrap_or(defaults.log_level),
            parallel_evaluation: self
                .parallel_evaluation
                .unwrap_or(defaults.parallel_evaluation),
            parallel_threshold: self.parallel_threshold.unwrap_or(defaults.parallel_threshold),
            seed: self.seed.or(defaults.seed),
        }
    }
}
