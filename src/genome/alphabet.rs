//! Reference genome: a fixed-length sequence of letters drawn from a weighted alphabet.
//!
//! Useful wherever genes are limited to a known set of values, e.g. DNA bases encoded
//! as `1..=5`.

use std::collections::HashSet;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;
use std::sync::Arc;

use crate::caching::Scored;
use crate::challenge::Challenge;
use crate::error::{GeneticError, Result};
use crate::genome::Genome;
use crate::rng::RandomNumberGenerator;

/// The set of values a gene may take, with draw weights.
///
/// A letter with weight `w` is `w` times as likely to be drawn by
/// [`Alphabet::draw`] as a letter with weight 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Alphabet<T>
where
    T: Eq + Hash,
{
    letters: Vec<T>,
    weights: Vec<u32>,
    weighted: Vec<T>,
    members: HashSet<T>,
}

impl<T> Alphabet<T>
where
    T: Clone + Eq + Hash + Display,
{
    /// Builds an alphabet.
    ///
    /// `weights`, when given and non-empty, must have one entry per letter. Omitted or
    /// empty weights mean every letter has weight 1.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if the alphabet has fewer than two
    /// distinct letters, the weight count does not match, or all weights are zero.
    pub fn new(letters: Vec<T>, weights: Option<Vec<u32>>) -> Result<Self> {
        let members: HashSet<T> = letters.iter().cloned().collect();
        if members.len() < 2 {
            return Err(GeneticError::Configuration(format!(
                "Alphabet needs at least 2 distinct letters, got {}",
                members.len()
            )));
        }

        let weights = match weights {
            Some(weights) if !weights.is_empty() => {
                if weights.len() != letters.len() {
                    return Err(GeneticError::Configuration(format!(
                        "Number of letters ({}) and weights ({}) do not match",
                        letters.len(),
                        weights.len()
                    )));
                }
                weights
            }
            _ => vec![1; letters.len()],
        };

        let weighted: Vec<T> = letters
            .iter()
            .zip(&weights)
            .flat_map(|(letter, &weight)| std::iter::repeat(letter.clone()).take(weight as usize))
            .collect();
        if weighted.is_empty() {
            return Err(GeneticError::Configuration(
                "Alphabet weights sum to zero".to_string(),
            ));
        }

        Ok(Self {
            letters,
            weights,
            weighted,
            members,
        })
    }

    pub fn letters(&self) -> &[T] {
        &self.letters
    }

    pub fn weights(&self) -> &[u32] {
        &self.weights
    }

    pub fn contains(&self, letter: &T) -> bool {
        self.members.contains(letter)
    }

    /// Draws a letter according to the weights.
    pub fn draw(&self, rng: &mut RandomNumberGenerator) -> T {
        self.weighted[rng.gen_index(self.weighted.len())].clone()
    }

    fn validate(&self, genes: &[T]) -> Result<()> {
        match genes.iter().find(|gene| !self.contains(gene)) {
            Some(gene) => Err(GeneticError::InvalidGene {
                gene: gene.to_string(),
                alphabet: self.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl<T> Display for Alphabet<T>
where
    T: Eq + Hash + Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_spaced(f, &self.letters)
    }
}

/// A genome whose genes are letters of an [`Alphabet`].
///
/// The alphabet and the fitness function are immutable and shared between copies;
/// the genes and the cached score are owned by each copy.
#[derive(Clone)]
pub struct AlphabetGenome<T>
where
    T: Eq + Hash,
{
    alphabet: Arc<Alphabet<T>>,
    genes: Scored<Vec<T>>,
    challenge: Arc<dyn Challenge<T>>,
}

impl<T> AlphabetGenome<T>
where
    T: Clone + Eq + Hash + Debug + Display + Send + Sync + 'static,
{
    /// Creates a genome over `alphabet` with optional draw `weights`.
    ///
    /// # Errors
    ///
    /// - `GeneticError::Configuration` for a malformed alphabet or weight list
    /// - `GeneticError::InvalidGene` if a gene is not in the alphabet
    pub fn new<C>(alphabet: Vec<T>, weights: Option<Vec<u32>>, genes: Vec<T>, challenge: C) -> Result<Self>
    where
        C: Challenge<T> + 'static,
    {
        Self::with_shared_challenge(alphabet, weights, genes, Arc::new(challenge))
    }

    /// Like [`AlphabetGenome::new`], for a fitness function that is already shared,
    /// e.g. one produced by [`CachingChallenge::with_cache`](crate::caching::CachingChallenge::with_cache).
    pub fn with_shared_challenge(
        alphabet: Vec<T>,
        weights: Option<Vec<u32>>,
        genes: Vec<T>,
        challenge: Arc<dyn Challenge<T>>,
    ) -> Result<Self> {
        let alphabet = Arc::new(Alphabet::new(alphabet, weights)?);
        Self::from_alphabet(alphabet, genes, challenge)
    }

    /// Creates a genome over an existing alphabet.
    pub fn from_alphabet(
        alphabet: Arc<Alphabet<T>>,
        genes: Vec<T>,
        challenge: Arc<dyn Challenge<T>>,
    ) -> Result<Self> {
        alphabet.validate(&genes)?;
        Ok(Self {
            alphabet,
            genes: Scored::new(genes),
            challenge,
        })
    }

    pub fn alphabet(&self) -> &Alphabet<T> {
        &self.alphabet
    }

    /// Returns the cached score without evaluating.
    pub fn cached_score(&self) -> Option<f64> {
        self.genes.cached_score()
    }

    fn check_compatible(&self, other: &Self) -> Result<()> {
        if !Arc::ptr_eq(&self.alphabet, &other.alphabet) && self.alphabet.letters != other.alphabet.letters {
            return Err(GeneticError::IncompatibleGenomes(format!(
                "alphabet {} differs from {}",
                self.alphabet, other.alphabet
            )));
        }
        Ok(())
    }
}

impl<T> Genome for AlphabetGenome<T>
where
    T: Clone + Eq + Hash + Debug + Display + Send + Sync + 'static,
{
    type Gene = T;

    fn genes(&self) -> &[T] {
        self.genes.get()
    }

    fn randomize(&mut self, rng: &mut RandomNumberGenerator) {
        let alphabet = &self.alphabet;
        self.genes.modify(|genes| {
            for gene in genes.iter_mut() {
                *gene = alphabet.draw(rng);
            }
        });
    }

    fn crossover(&self, other: &Self, p1: usize, p2: usize) -> Result<(Self, Self)> {
        self.check_compatible(other)?;
        if self.len() != other.len() {
            return Err(GeneticError::IncompatibleGenomes(format!(
                "cannot cross genomes of length {} and {}",
                self.len(),
                other.len()
            )));
        }
        if p1 > p2 || p2 >= self.len() {
            return Err(GeneticError::OutOfBounds(format!(
                "crossover points [{}, {}] outside genome of length {}",
                p1,
                p2,
                self.len()
            )));
        }

        let mut child_a = self.clone();
        let mut child_b = other.clone();
        child_a
            .genes
            .modify(|genes| genes[p1..=p2].clone_from_slice(&other.genes()[p1..=p2]));
        child_b
            .genes
            .modify(|genes| genes[p1..=p2].clone_from_slice(&self.genes()[p1..=p2]));
        Ok((child_a, child_b))
    }

    fn splice(&mut self, other: &Self, from: usize, to: usize, length: usize) -> Result<()> {
        self.check_compatible(other)?;
        let source_end = from.checked_add(length).filter(|&end| end <= other.len());
        let target_end = to.checked_add(length).filter(|&end| end <= self.len());
        let (Some(source_end), Some(target_end)) = (source_end, target_end) else {
            return Err(GeneticError::OutOfBounds(format!(
                "cannot splice {} genes from {} (length {}) to {} (length {})",
                length,
                from,
                other.len(),
                to,
                self.len()
            )));
        };

        self.genes
            .modify(|genes| genes[to..target_end].clone_from_slice(&other.genes()[from..source_end]));
        Ok(())
    }

    fn switch(&mut self, x: usize, y: usize) -> Result<()> {
        let len = self.len();
        if x >= len || y >= len {
            return Err(GeneticError::OutOfBounds(format!(
                "cannot switch genes {} and {} in genome of length {}",
                x, y, len
            )));
        }
        self.genes.modify(|genes| genes.swap(x, y));
        Ok(())
    }

    fn score(&self) -> f64 {
        let challenge = &self.challenge;
        self.genes.score_with(|genes| challenge.score(genes))
    }

    fn is_scored(&self) -> bool {
        self.genes.is_scored()
    }

    fn reset(&mut self) {
        self.genes.invalidate();
    }
}

impl<T> Display for AlphabetGenome<T>
where
    T: Eq + Hash + Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_spaced(f, self.genes.get())
    }
}

impl<T> Debug for AlphabetGenome<T>
where
    T: Eq + Hash + Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlphabetGenome")
            .field("genes", self.genes.get())
            .field("score", &self.genes.cached_score())
            .finish()
    }
}

fn write_spaced<T: Display>(f: &mut fmt::Formatter<'_>, values: &[T]) -> fmt::Result {
    write!(f, "[")?;
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", value)?;
    }
    write!(f, "]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn distance_to_four(genes: &[i32]) -> f64 {
        genes.iter().map(|&g| (4 - g) as f64).sum()
    }

    fn genome(genes: Vec<i32>) -> AlphabetGenome<i32> {
        AlphabetGenome::new(vec![1, 2, 3, 4], Some(vec![1, 2, 2, 4]), genes, distance_to_four).unwrap()
    }

    #[test]
    fn test_alphabet_too_small() {
        let result = Alphabet::new(vec![1, 1, 1], None);
        assert!(matches!(result, Err(GeneticError::Configuration(_))));
    }

    #[test]
    fn test_weight_count_mismatch() {
        let result = Alphabet::new(vec![1, 2, 3], Some(vec![1, 2]));
        assert!(matches!(result, Err(GeneticError::Configuration(_))));
    }

    #[test]
    fn test_empty_weights_mean_uniform() {
        let alphabet = Alphabet::new(vec!['a', 'b'], Some(vec![])).unwrap();
        assert_eq!(alphabet.weights(), &[1, 1]);
    }

    #[test]
    fn test_zero_weights_rejected() {
        let result = Alphabet::new(vec![1, 2], Some(vec![0, 0]));
        assert!(matches!(result, Err(GeneticError::Configuration(_))));
    }

    #[test]
    fn test_invalid_gene() {
        let result = AlphabetGenome::new(vec![1, 2, 3, 4], None, vec![1, 5, 2], distance_to_four);
        match result {
            Err(GeneticError::InvalidGene { gene, alphabet }) => {
                assert_eq!(gene, "5");
                assert_eq!(alphabet, "[1 2 3 4]");
            }
            other => panic!("Expected InvalidGene error, got {:?}", other.map(|g| g.to_string())),
        }
    }

    #[test]
    fn test_weighted_draw_frequency() {
        let alphabet = Alphabet::new(vec![0u8, 1u8], Some(vec![1, 4])).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(11);
        let draws = 20_000;
        let ones = (0..draws).filter(|_| alphabet.draw(&mut rng) == 1).count();
        let share = ones as f64 / draws as f64;
        assert!((share - 0.8).abs() < 0.02, "share of heavy letter was {}", share);
    }

    #[test]
    fn test_display() {
        assert_eq!(genome(vec![1, 2, 3, 4]).to_string(), "[1 2 3 4]");
    }

    #[test]
    fn test_score_is_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let g = AlphabetGenome::new(vec![1, 2], None, vec![1, 2, 2], move |genes: &[i32]| {
            counter.fetch_add(1, Ordering::SeqCst);
            genes.len() as f64
        })
        .unwrap();

        assert_eq!(g.cached_score(), None);
        assert_eq!(g.score(), 3.0);
        assert_eq!(g.score(), 3.0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_copy_is_independent() {
        let original = genome(vec![1, 1, 1, 1]);
        original.score();

        let mut copy = original.clone();
        assert!(copy.is_scored());

        copy.switch(0, 3).unwrap();
        copy.splice(&genome(vec![4, 4, 4, 4]), 0, 0, 2).unwrap();
        assert_eq!(copy.genes(), &[4, 4, 1, 1]);
        assert_eq!(original.genes(), &[1, 1, 1, 1]);
        assert!(original.is_scored());
        assert!(!copy.is_scored());
    }

    #[test]
    fn test_crossover_rejects_bad_points() {
        let a = genome(vec![1, 2, 3, 4]);
        let b = genome(vec![4, 3, 2, 1]);
        assert!(matches!(a.crossover(&b, 2, 1), Err(GeneticError::OutOfBounds(_))));
        assert!(matches!(a.crossover(&b, 0, 4), Err(GeneticError::OutOfBounds(_))));

        let short = genome(vec![1, 2]);
        assert!(matches!(
            a.crossover(&short, 0, 1),
            Err(GeneticError::IncompatibleGenomes(_))
        ));
    }

    #[test]
    fn test_splice_and_switch_bounds() {
        let mut a = genome(vec![1, 2, 3, 4]);
        let b = genome(vec![4, 3, 2, 1]);
        assert!(matches!(a.splice(&b, 3, 0, 2), Err(GeneticError::OutOfBounds(_))));
        assert!(matches!(a.splice(&b, 0, usize::MAX, 2), Err(GeneticError::OutOfBounds(_))));
        assert!(matches!(a.switch(0, 4), Err(GeneticError::OutOfBounds(_))));
        assert_eq!(a.genes(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_incompatible_alphabets() {
        let mut a = genome(vec![1, 2, 3, 4]);
        let b = AlphabetGenome::new(vec![1, 2, 3, 4, 5], None, vec![5, 5, 5, 5], distance_to_four).unwrap();
        assert!(matches!(a.splice(&b, 0, 0, 1), Err(GeneticError::IncompatibleGenomes(_))));
    }
}
