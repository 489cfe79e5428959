//! # GeneticOptimizer
//!
//! The evolutionary loop. A `GeneticOptimizer` owns the population, drives it one
//! generation at a time through the configured selector, breeder and mutator, and
//! keeps an independent copy of the best genome ever seen.
//!
//! ## Lifecycle
//!
//! `Uninitialized` → [`init`](GeneticOptimizer::init) → `Running`, then
//! [`optimize_until`](GeneticOptimizer::optimize_until) ends in `Converged` when the
//! predicate holds or `Stopped` when the generation bound is reached.
//!
//! ## Example
//!
//! ```rust
//! use galib::breeding::TwoPointBreeder;
//! use galib::evolution::{EvolutionOptions, GeneticOptimizer, OptimizerState};
//! use galib::genome::{AlphabetGenome, Genome};
//! use galib::mutation::RandomMutator;
//! use galib::selection::TournamentSelector;
//!
//! let seed = AlphabetGenome::new(vec![0, 1], None, vec![0; 16], |genes: &[u8]| {
//!     genes.iter().filter(|&&g| g == 0).count() as f64
//! })
//! .unwrap();
//!
//! let options = EvolutionOptions::builder()
//!     .max_generations(1000)
//!     .seed(7)
//!     .build();
//! let mut optimizer = GeneticOptimizer::builder()
//!     .with_selector(TournamentSelector::new(0.7, 4).unwrap())
//!     .with_breeder(TwoPointBreeder)
//!     .with_mutator(RandomMutator)
//!     .with_options(options)
//!     .build()
//!     .unwrap();
//!
//! optimizer.init(20, &seed).unwrap();
//! let outcome = optimizer.optimize_until(|best| best.score() <= 2.0).unwrap();
//! assert!(outcome.state == OptimizerState::Stopped || outcome.score <= 2.0);
//! ```

use std::fmt;

use tracing::{debug, info, trace, warn};

use crate::breeding::Breeder;
use crate::error::{GeneticError, OptionExt, Result};
use crate::evolution::builder::OptimizerBuilder;
use crate::evolution::initializer::Initializer;
use crate::evolution::options::{EvolutionOptions, LogLevel, Replacement};
use crate::genome::Genome;
use crate::mutation::Mutator;
use crate::population::Population;
use crate::rng::RngStreams;
use crate::selection::Selector;

/// The genetic operators and their application probabilities.
pub struct OptimizerParameters<G: Genome> {
    pub initializer: Box<dyn Initializer<G>>,
    pub selector: Box<dyn Selector<G>>,
    pub breeder: Box<dyn Breeder<G>>,
    pub mutator: Box<dyn Mutator<G>>,
    /// Probability that a child (or, with elitist replacement, a member) is mutated.
    pub p_mutate: f64,
    /// Probability that two selected parents are crossed.
    pub p_breed: f64,
}

impl<G: Genome> OptimizerParameters<G> {
    /// Checks the probabilities and the selector configuration.
    pub fn validate(&self) -> Result<()> {
        for (name, p) in [("p_mutate", self.p_mutate), ("p_breed", self.p_breed)] {
            if !(0.0..=1.0).contains(&p) {
                return Err(GeneticError::Configuration(format!(
                    "{} must be within [0, 1], got {}",
                    name, p
                )));
            }
        }
        self.selector.validate()
    }
}

impl<G: Genome> fmt::Debug for OptimizerParameters<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptimizerParameters")
            .field("initializer", &self.initializer)
            .field("selector", &self.selector)
            .field("breeder", &self.breeder)
            .field("mutator", &self.mutator)
            .field("p_mutate", &self.p_mutate)
            .field("p_breed", &self.p_breed)
            .finish()
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizerState {
    Uninitialized,
    Running,
    /// The stopping predicate accepted the best genome.
    Converged,
    /// The generation bound was reached first.
    Stopped,
}

/// Result of a run: a copy of the best genome plus how the run ended.
#[derive(Debug, Clone)]
pub struct OptimizationOutcome<G: Genome> {
    pub best: G,
    pub score: f64,
    pub generations: usize,
    pub state: OptimizerState,
}

#[derive(Debug)]
pub struct GeneticOptimizer<G: Genome> {
    parameters: OptimizerParameters<G>,
    options: EvolutionOptions,
    streams: RngStreams,
    population: Option<Population<G>>,
    best: Option<G>,
    generation: usize,
    state: OptimizerState,
}

impl<G: Genome> GeneticOptimizer<G> {
    /// Creates an optimizer.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if a probability lies outside `[0, 1]`
    /// or the selector is misconfigured.
    pub fn new(parameters: OptimizerParameters<G>, options: EvolutionOptions) -> Result<Self> {
        parameters.validate()?;
        let streams = RngStreams::from_optional_seed(options.get_seed());
        Ok(Self {
            parameters,
            options,
            streams,
            population: None,
            best: None,
            generation: 0,
            state: OptimizerState::Uninitialized,
        })
    }

    pub fn builder() -> OptimizerBuilder<G> {
        OptimizerBuilder::new()
    }

    pub fn state(&self) -> OptimizerState {
        self.state
    }

    /// Generations completed since the last `init`.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn options(&self) -> &EvolutionOptions {
        &self.options
    }

    pub fn parameters(&self) -> &OptimizerParameters<G> {
        &self.parameters
    }

    pub fn population(&self) -> Option<&Population<G>> {
        self.population.as_ref()
    }

    /// Builds and scores the first generation of `size` members from `seed`.
    ///
    /// Calling `init` again discards the current run.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if `size` is zero, and
    /// `GeneticError::FitnessCalculation` if a member scores NaN.
    pub fn init(&mut self, size: usize, seed: &G) -> Result<()> {
        if size == 0 {
            return Err(GeneticError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }

        let members = self
            .parameters
            .initializer
            .init(seed, size, &mut self.streams.initialization)?;
        if members.len() != size {
            return Err(GeneticError::Configuration(format!(
                "Initializer produced {} members, expected {}",
                members.len(),
                size
            )));
        }

        let population = Population::new(members, self.options.get_objective());
        self.evaluate(&population)?;

        self.best = population.best().cloned();
        self.population = Some(population);
        self.generation = 0;
        self.state = OptimizerState::Running;

        info!(
            size,
            objective = ?self.options.get_objective(),
            best_score = ?self.best.as_ref().map(|b| b.score()),
            "population initialized"
        );
        Ok(())
    }

    /// Same as [`init`](Self::init), with the population size from the options.
    pub fn init_from_options(&mut self, seed: &G) -> Result<()> {
        self.init(self.options.get_population_size(), seed)
    }

    /// Runs one generation.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Evolution` before `init`, operator errors as they occur,
    /// and `GeneticError::FitnessCalculation` if a new member scores NaN.
    pub fn step(&mut self) -> Result<()> {
        let current = self
            .population
            .as_ref()
            .ok_or_else_genetic(|| not_initialized("step"))?;

        let size = current.len();
        let next = match self.options.get_replacement() {
            Replacement::Generational => {
                Self::generational(&self.parameters, &mut self.streams, current)?
            }
            Replacement::Elitist => Self::elitist(&self.parameters, &mut self.streams, current)?,
        };

        let mut next = Population::new(next, self.options.get_objective());
        self.evaluate(&next)?;
        if self.options.get_replacement() == Replacement::Elitist {
            next.sort();
            next.truncate(size);
        }

        self.generation += 1;
        self.update_best(&next);
        self.log_generation(&next);
        self.population = Some(next);
        Ok(())
    }

    /// Runs exactly `generations` generations, ignoring the generation bound.
    pub fn optimize(&mut self, generations: usize) -> Result<OptimizationOutcome<G>> {
        self.ensure_initialized("optimize")?;
        for _ in 0..generations {
            self.step()?;
        }
        self.outcome()
    }

    /// Steps until `predicate` accepts the best genome.
    ///
    /// The predicate is checked before the first step, so an already good enough
    /// population converges after zero generations. When the options carry a
    /// generation bound, the run stops once `generation()` reaches it.
    pub fn optimize_until<F>(&mut self, mut predicate: F) -> Result<OptimizationOutcome<G>>
    where
        F: FnMut(&G) -> bool,
    {
        self.ensure_initialized("optimize_until")?;
        self.state = OptimizerState::Running;

        loop {
            let best = self.best.as_ref().ok_or_else_genetic(|| {
                GeneticError::Evolution("No best genome recorded".to_string())
            })?;
            if predicate(best) {
                self.state = OptimizerState::Converged;
                info!(
                    generations = self.generation,
                    score = best.score(),
                    "optimization converged"
                );
                break;
            }
            if let Some(max) = self.options.get_max_generations() {
                if self.generation >= max {
                    self.state = OptimizerState::Stopped;
                    warn!(
                        generations = self.generation,
                        score = best.score(),
                        "generation limit reached before convergence"
                    );
                    break;
                }
            }
            self.step()?;
        }

        self.outcome()
    }

    /// Independent copy of the best genome seen since `init`.
    pub fn best(&self) -> Result<G> {
        self.best
            .clone()
            .ok_or_else_genetic(|| not_initialized("best"))
    }

    /// The `n` best members of the current population, best first.
    pub fn top(&self, n: usize) -> Result<Vec<&G>> {
        let population = self
            .population
            .as_ref()
            .ok_or_else_genetic(|| not_initialized("top"))?;
        Ok(population.top(n))
    }

    /// Renders the `n` best current members, one per line, followed by mutator
    /// statistics when the mutator keeps any.
    pub fn report_top(&self, n: usize) -> Result<String> {
        let mut report = String::new();
        for (rank, genome) in self.top(n)?.iter().enumerate() {
            report.push_str(&format!("{}: {} -> {}\n", rank, genome, genome.score()));
        }
        if let Some(stats) = self.mutator_stats() {
            report.push_str(&stats);
            report.push('\n');
        }
        Ok(report)
    }

    /// Prints [`report_top`](Self::report_top) to stdout.
    pub fn print_top(&self, n: usize) -> Result<()> {
        print!("{}", self.report_top(n)?);
        Ok(())
    }

    pub fn mutator_stats(&self) -> Option<String> {
        self.parameters.mutator.stats()
    }

    fn ensure_initialized(&self, operation: &str) -> Result<()> {
        if self.state == OptimizerState::Uninitialized {
            return Err(not_initialized(operation));
        }
        Ok(())
    }

    fn outcome(&self) -> Result<OptimizationOutcome<G>> {
        let best = self.best()?;
        Ok(OptimizationOutcome {
            score: best.score(),
            best,
            generations: self.generation,
            state: self.state,
        })
    }

    fn evaluate(&self, population: &Population<G>) -> Result<()> {
        let parallel = self.options.evaluates_in_parallel(population.len());
        let scored = population.evaluate(parallel);
        trace!(scored, parallel, "scored pending members");

        if let Some(genome) = population.iter().find(|g| g.score().is_nan()) {
            return Err(GeneticError::FitnessCalculation(format!(
                "Fitness of {} is NaN",
                genome
            )));
        }
        Ok(())
    }

    fn update_best(&mut self, population: &Population<G>) {
        let objective = population.objective();
        if let Some(candidate) = population.best() {
            let improved = match &self.best {
                Some(best) => objective.is_better(candidate.score(), best.score()),
                None => true,
            };
            if improved {
                self.best = Some(candidate.clone());
            }
        }
    }

    /// Fills a new generation with children of selected parents.
    fn generational(
        params: &OptimizerParameters<G>,
        streams: &mut RngStreams,
        current: &Population<G>,
    ) -> Result<Vec<G>> {
        let size = current.len();
        let mut next = Vec::with_capacity(size);

        while next.len() < size {
            let a = params.selector.select_one(current, &mut streams.selection);
            let b = params.selector.select_one(current, &mut streams.selection);
            let (x, y) = if streams.breeding.chance(params.p_breed) {
                params.breeder.breed(a, b, &mut streams.breeding)?
            } else {
                (a.clone(), b.clone())
            };

            for child in [x, y] {
                if next.len() == size {
                    break;
                }
                if streams.mutation.chance(params.p_mutate) {
                    next.push(params.mutator.mutate(&child, &mut streams.mutation)?);
                } else {
                    next.push(child);
                }
            }
        }
        Ok(next)
    }

    /// Current members plus children and mutants; cut back to size after scoring.
    fn elitist(
        params: &OptimizerParameters<G>,
        streams: &mut RngStreams,
        current: &Population<G>,
    ) -> Result<Vec<G>> {
        let mut pool: Vec<G> = current.members().to_vec();

        for member in current.iter() {
            if streams.breeding.chance(params.p_breed) {
                let a = params.selector.select_one(current, &mut streams.selection);
                let b = params.selector.select_one(current, &mut streams.selection);
                let (x, y) = params.breeder.breed(a, b, &mut streams.breeding)?;
                pool.push(x);
                pool.push(y);
            }
            if streams.mutation.chance(params.p_mutate) {
                pool.push(params.mutator.mutate(member, &mut streams.mutation)?);
            }
        }
        Ok(pool)
    }

    fn log_generation(&self, population: &Population<G>) {
        let level = self.options.get_log_level();
        if level == LogLevel::None {
            return;
        }

        debug!(
            generation = self.generation,
            current_best = ?population.best().map(|g| g.score()),
            best_ever = ?self.best.as_ref().map(|g| g.score()),
            "generation complete"
        );
        if level == LogLevel::Verbose {
            for genome in population {
                trace!(generation = self.generation, genome = %genome, score = genome.score());
            }
        }
    }
}

fn not_initialized(operation: &str) -> GeneticError {
    GeneticError::Evolution(format!("Cannot {} before init", operation))
}
