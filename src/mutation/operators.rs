//! Basic mutators, written against the [`Genome`] capabilities only.

use crate::error::Result;
use crate::genome::Genome;
use crate::mutation::Mutator;
use crate::rng::RandomNumberGenerator;

/// Redraws one random gene.
///
/// The new gene comes from a randomized donor copy, so the mutator works for any
/// representation whose `randomize` respects its own constraints.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomMutator;

impl<G: Genome> Mutator<G> for RandomMutator {
    fn mutate(&self, genome: &G, rng: &mut RandomNumberGenerator) -> Result<G> {
        let mut child = genome.clone();
        if genome.is_empty() {
            return Ok(child);
        }

        let mut donor = genome.clone();
        donor.randomize(rng);
        let position = rng.gen_index(genome.len());
        child.splice(&donor, position, position, 1)?;
        Ok(child)
    }

    fn name(&self) -> &str {
        "RandomMutator"
    }
}

/// Swaps two distinct random genes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwitchMutator;

impl<G: Genome> Mutator<G> for SwitchMutator {
    fn mutate(&self, genome: &G, rng: &mut RandomNumberGenerator) -> Result<G> {
        let mut child = genome.clone();
        let len = genome.len();
        if len < 2 {
            return Ok(child);
        }

        let x = rng.gen_index(len);
        let y = (x + 1 + rng.gen_index(len - 1)) % len;
        child.switch(x, y)?;
        Ok(child)
    }

    fn name(&self) -> &str {
        "SwitchMutator"
    }
}

/// Rotates the whole gene sequence one position to the left.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShiftMutator;

impl<G: Genome> Mutator<G> for ShiftMutator {
    fn mutate(&self, genome: &G, _rng: &mut RandomNumberGenerator) -> Result<G> {
        let mut child = genome.clone();
        for i in 1..genome.len() {
            child.switch(i - 1, i)?;
        }
        Ok(child)
    }

    fn name(&self) -> &str {
        "ShiftMutator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::AlphabetGenome;

    fn genome(genes: Vec<u8>) -> AlphabetGenome<u8> {
        AlphabetGenome::new(vec![1, 2, 3, 4], None, genes, |genes: &[u8]| {
            genes.iter().map(|&g| g as f64).sum::<f64>()
        })
        .unwrap()
    }

    #[test]
    fn test_random_mutator_changes_at_most_one_gene() {
        let original = genome(vec![1, 1, 1, 1, 1, 1]);
        original.score();
        let mut rng = RandomNumberGenerator::from_seed(8);

        for _ in 0..200 {
            let child = RandomMutator.mutate(&original, &mut rng).unwrap();
            let changed = child
                .genes()
                .iter()
                .zip(original.genes())
                .filter(|(a, b)| a != b)
                .count();
            assert!(changed <= 1);
            assert!(child.genes().iter().all(|g| (1..=4).contains(g)));
            assert!(!child.is_scored());
        }
        assert_eq!(original.genes(), &[1, 1, 1, 1, 1, 1]);
        assert!(original.is_scored());
    }

    #[test]
    fn test_switch_mutator_keeps_multiset() {
        let original = genome(vec![1, 2, 3, 4]);
        let mut rng = RandomNumberGenerator::from_seed(4);

        for _ in 0..100 {
            let child = SwitchMutator.mutate(&original, &mut rng).unwrap();
            let mut sorted = child.genes().to_vec();
            sorted.sort_unstable();
            assert_eq!(sorted, vec![1, 2, 3, 4]);
            assert_ne!(child.genes(), original.genes());
        }
    }

    #[test]
    fn test_shift_mutator_rotates_left() {
        let original = genome(vec![1, 2, 3, 4]);
        let mut rng = RandomNumberGenerator::from_seed(0);
        let child = ShiftMutator.mutate(&original, &mut rng).unwrap();
        assert_eq!(child.genes(), &[2, 3, 4, 1]);
    }

    #[test]
    fn test_short_genomes_are_copied() {
        let single = genome(vec![3]);
        let mut rng = RandomNumberGenerator::from_seed(0);
        assert_eq!(SwitchMutator.mutate(&single, &mut rng).unwrap().genes(), &[3]);
        assert_eq!(ShiftMutator.mutate(&single, &mut rng).unwrap().genes(), &[3]);
    }
}
