use crate::breeding::Breeder;
use crate::error::{GeneticError, Result};
use crate::evolution::initializer::{Initializer, RandomInitializer};
use crate::evolution::optimizer::{GeneticOptimizer, OptimizerParameters};
use crate::evolution::options::EvolutionOptions;
use crate::genome::Genome;
use crate::mutation::Mutator;
use crate::selection::Selector;

/// Fluent construction of a [`GeneticOptimizer`].
///
/// The selector, breeder and mutator are required. The initializer defaults to
/// [`RandomInitializer`], `p_mutate` to 0.1, `p_breed` to 0.7, and the options to
/// [`EvolutionOptions::default`].
pub struct OptimizerBuilder<G: Genome> {
    initializer: Option<Box<dyn Initializer<G>>>,
    selector: Option<Box<dyn Selector<G>>>,
    breeder: Option<Box<dyn Breeder<G>>>,
    mutator: Option<Box<dyn Mutator<G>>>,
    p_mutate: f64,
    p_breed: f64,
    options: EvolutionOptions,
}

impl<G: Genome> OptimizerBuilder<G> {
    pub fn new() -> Self {
        Self {
            initializer: None,
            selector: None,
            breeder: None,
            mutator: None,
            p_mutate: 0.1,
            p_breed: 0.7,
            options: EvolutionOptions::default(),
        }
    }

    pub fn with_initializer<I: Initializer<G> + 'static>(mut self, initializer: I) -> Self {
        self.initializer = Some(Box::new(initializer));
        self
    }

    pub fn with_selector<S: Selector<G> + 'static>(mut self, selector: S) -> Self {
        self.selector = Some(Box::new(selector));
        self
    }

    pub fn with_breeder<B: Breeder<G> + 'static>(mut self, breeder: B) -> Self {
        self.breeder = Some(Box::new(breeder));
        self
    }

    pub fn with_mutator<M: Mutator<G> + 'static>(mut self, mutator: M) -> Self {
        self.mutator = Some(Box::new(mutator));
        self
    }

    pub fn with_p_mutate(mut self, p_mutate: f64) -> Self {
        self.p_mutate = p_mutate;
        self
    }

    pub fn with_p_breed(mut self, p_breed: f64) -> Self {
        self.p_breed = p_breed;
        self
    }

    pub fn with_options(mut self, options: EvolutionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> Result<GeneticOptimizer<G>> {
        let selector = self.selector.ok_or_else(|| {
            GeneticError::Configuration("Selector not specified".to_string())
        })?;

        let breeder = self
            .breeder
            .ok_or_else(|| GeneticError::Configuration("Breeder not specified".to_string()))?;

        let mutator = self
            .mutator
            .ok_or_else(|| GeneticError::Configuration("Mutator not specified".to_string()))?;

        let parameters = OptimizerParameters {
            initializer: self
                .initializer
                .unwrap_or_else(|| Box::new(RandomInitializer)),
            selector,
            breeder,
            mutator,
            p_mutate: self.p_mutate,
            p_breed: self.p_breed,
        };
        GeneticOptimizer::new(parameters, self.options)
    }
}

impl<G: Genome> Default for OptimizerBuilder<G> {
    fn default() -> Self {
        Self::new()
    }
}
