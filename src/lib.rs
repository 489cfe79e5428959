pub mod breeding;
pub mod caching;
pub mod challenge;
pub mod error;
pub mod evolution;
pub mod genome;
pub mod mutation;
pub mod objective;
pub mod population;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use challenge::Challenge;
pub use error::{GeneticError, OptionExt, Result};
pub use evolution::{EvolutionOptions, GeneticOptimizer, OptimizationOutcome, OptimizerState};
pub use genome::{AlphabetGenome, Genome};
pub use objective::Objective;
