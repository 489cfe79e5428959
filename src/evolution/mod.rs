pub mod builder;
pub mod initializer;
pub mod optimizer;
pub mod options;

pub use builder::OptimizerBuilder;
pub use initializer::{Initializer, RandomInitializer};
pub use optimizer::{GeneticOptimizer, OptimizationOutcome, OptimizerParameters, OptimizerState};
pub use options::{EvolutionOptions, EvolutionOptionsBuilder, LogLevel, Replacement};
