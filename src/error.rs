//! # Error Types
//!
//! This module defines the error type shared by every part of the library.
//! Construction problems (bad alphabets, bad probabilities, missing operators)
//! surface as [`GeneticError::Configuration`] or [`GeneticError::InvalidGene`];
//! operator misuse (indices out of range, mismatched genomes) surfaces as
//! [`GeneticError::OutOfBounds`] or [`GeneticError::IncompatibleGenomes`].
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use galib::error::{GeneticError, Result};
//!
//! fn check_probability(p: f64) -> Result<f64> {
//!     if !(0.0..=1.0).contains(&p) {
//!         return Err(GeneticError::Configuration(format!(
//!             "Probability must be within [0, 1], got {}",
//!             p
//!         )));
//!     }
//!     Ok(p)
//! }
//!
//! assert!(check_probability(0.5).is_ok());
//! assert!(check_probability(1.5).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use galib::error::{GeneticError, OptionExt};
//!
//! fn find_best_candidate(candidates: &[i32]) -> galib::error::Result<i32> {
//!     candidates.iter().min().cloned().ok_or_else_genetic(||
//!         GeneticError::EmptyPopulation
//!     )
//! }
//! ```

use thiserror::Error;

/// Represents errors that can occur in the genetic algorithm library.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when a gene value is not part of the genome's alphabet.
    #[error("Invalid gene {gene} for alphabet {alphabet}")]
    InvalidGene {
        /// The offending gene, rendered for display.
        gene: String,
        /// The declared alphabet, rendered for display.
        alphabet: String,
    },

    /// Error that occurs when a gene index or range falls outside the genome.
    #[error("Bounds error: {0}")]
    OutOfBounds(String),

    /// Error that occurs when two genomes cannot exchange genetic material.
    #[error("Incompatible genomes: {0}")]
    IncompatibleGenomes(String),

    /// Error that occurs when a breeding operation fails.
    #[error("Breeding error: {0}")]
    Breeding(String),

    /// Error that occurs when a mutation operation fails.
    #[error("Mutation error: {0}")]
    Mutation(String),

    /// Error that occurs when an evolution process fails.
    #[error("Evolution error: {0}")]
    Evolution(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when a fitness calculation yields an unusable value.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),
}

/// A specialized Result type for genetic algorithm operations.
///
/// ## Examples
///
/// ```rust
/// use galib::error::Result;
///
/// fn may_fail() -> Result<i32> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using
    /// a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}
