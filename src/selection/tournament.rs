use crate::error::{GeneticError, Result};
use crate::genome::Genome;
use crate::objective::Objective;
use crate::population::Population;
use crate::rng::RandomNumberGenerator;
use crate::selection::selector::Selector;

/// Tournament selection with an elitism bias.
///
/// Each call draws `contestants` members at random (with replacement) and sorts them
/// best first. A single uniform number `r` is drawn; walking from the best contestant
/// to the second-worst, contestant `i` wins if `r < p_i`, where `p_0 = p_elite` and
/// `p_{i+1} = p_i + p_i * (1 - p_elite)`. When nobody wins, the worst contestant does.
///
/// The best contestant therefore wins with probability `p_elite`, and the acceptance
/// threshold grows with every rejection.
///
/// # Examples
///
/// ```
/// use galib::selection::TournamentSelector;
///
/// let selector = TournamentSelector::new(0.7, 5).unwrap();
/// assert_eq!(selector.contestants(), 5);
///
/// // A zero elite probability disables the selector.
/// assert!(TournamentSelector::new(0.0, 5).is_none());
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TournamentSelector {
    p_elite: f64,
    contestants: usize,
}

impl TournamentSelector {
    /// Creates a tournament selector.
    ///
    /// Returns `None` when `p_elite` is zero: such a selector could never prefer
    /// anybody and is treated as absent.
    pub fn new(p_elite: f64, contestants: usize) -> Option<Self> {
        if p_elite == 0.0 {
            return None;
        }
        Some(Self { p_elite, contestants })
    }

    pub fn p_elite(&self) -> f64 {
        self.p_elite
    }

    pub fn contestants(&self) -> usize {
        self.contestants
    }

    /// Picks the winner from an already drawn sample.
    ///
    /// Sorts `sample` best first and runs the elitist walk over it.
    pub(crate) fn pick_from_sample<'a, G: Genome>(
        &self,
        sample: &mut [&'a G],
        objective: Objective,
        rng: &mut RandomNumberGenerator,
    ) -> &'a G {
        sample.sort_by(|a, b| objective.compare(a.score(), b.score()));

        let r = rng.gen_probability();
        let mut p = self.p_elite;
        for contestant in &sample[..sample.len() - 1] {
            if r < p {
                return *contestant;
            }
            p += p * (1.0 - self.p_elite);
        }
        sample[sample.len() - 1]
    }
}

impl<G: Genome> Selector<G> for TournamentSelector {
    fn select_one<'a>(&self, population: &'a Population<G>, rng: &mut RandomNumberGenerator) -> &'a G {
        assert!(
            self.contestants >= 2 && self.p_elite != 0.0,
            "TournamentSelector needs at least 2 contestants and a non-zero elite probability \
             (contestants = {}, p_elite = {})",
            self.contestants,
            self.p_elite
        );
        assert!(!population.is_empty(), "cannot select from an empty population");

        let members = population.members();
        let mut sample: Vec<&G> = (0..self.contestants)
            .map(|_| &members[rng.gen_index(members.len())])
            .collect();
        self.pick_from_sample(&mut sample, population.objective(), rng)
    }

    fn validate(&self) -> Result<()> {
        if self.contestants < 2 {
            return Err(GeneticError::Configuration(format!(
                "Tournament needs at least 2 contestants, got {}",
                self.contestants
            )));
        }
        if !(self.p_elite > 0.0 && self.p_elite <= 1.0) {
            return Err(GeneticError::Configuration(format!(
                "Elite probability must be within (0, 1], got {}",
                self.p_elite
            )));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "TournamentSelector"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::AlphabetGenome;

    fn member(gene: i32) -> AlphabetGenome<i32> {
        AlphabetGenome::new(vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9], None, vec![gene], |genes: &[i32]| {
            genes[0] as f64
        })
        .unwrap()
    }

    fn population(genes: &[i32], objective: Objective) -> Population<AlphabetGenome<i32>> {
        Population::new(genes.iter().map(|&g| member(g)).collect(), objective)
    }

    #[test]
    fn test_elite_frequency_matches_p_elite() {
        let selector = TournamentSelector::new(0.7, 5).unwrap();
        let contestants: Vec<AlphabetGenome<i32>> = [5, 3, 9, 1, 7].iter().map(|&g| member(g)).collect();
        let mut rng = RandomNumberGenerator::from_seed(2024);

        let trials = 10_000;
        let mut elite = 0;
        for _ in 0..trials {
            let mut sample: Vec<&AlphabetGenome<i32>> = contestants.iter().collect();
            let winner = selector.pick_from_sample(&mut sample, Objective::Minimize, &mut rng);
            if winner.genes()[0] == 1 {
                elite += 1;
            }
        }

        let frequency = elite as f64 / trials as f64;
        assert!((frequency - 0.7).abs() < 0.03, "elite frequency was {}", frequency);
    }

    #[test]
    fn test_walk_falls_back_to_worst() {
        // With p_elite = 1 the best always wins; with a tiny p_elite the threshold
        // stays small and the worst contestant collects most wins.
        let contestants: Vec<AlphabetGenome<i32>> = [2, 8].iter().map(|&g| member(g)).collect();
        let mut rng = RandomNumberGenerator::from_seed(1);

        let always = TournamentSelector::new(1.0, 2).unwrap();
        let rarely = TournamentSelector::new(0.01, 2).unwrap();
        let mut worst = 0;
        for _ in 0..1000 {
            let mut sample: Vec<&AlphabetGenome<i32>> = contestants.iter().collect();
            assert_eq!(always.pick_from_sample(&mut sample, Objective::Minimize, &mut rng).genes()[0], 2);

            let mut sample: Vec<&AlphabetGenome<i32>> = contestants.iter().collect();
            if rarely.pick_from_sample(&mut sample, Objective::Minimize, &mut rng).genes()[0] == 8 {
                worst += 1;
            }
        }
        assert!(worst > 950);
    }

    #[test]
    fn test_select_one_returns_population_member() {
        let pop = population(&[4, 0, 6, 2, 9, 3], Objective::Maximize);
        let selector = TournamentSelector::new(0.7, 3).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(99);

        for _ in 0..500 {
            let chosen = selector.select_one(&pop, &mut rng);
            assert!(pop.iter().any(|m| std::ptr::eq(m, chosen)));
        }
    }

    #[test]
    fn test_direction_follows_population() {
        let selector = TournamentSelector::new(1.0, 40).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(3);

        let max = population(&[1, 9, 5], Objective::Maximize);
        let min = population(&[1, 9, 5], Objective::Minimize);
        // 40 draws with replacement out of 3 almost surely include every member
        assert_eq!(selector.select_one(&max, &mut rng).genes()[0], 9);
        assert_eq!(selector.select_one(&min, &mut rng).genes()[0], 1);
    }

    #[test]
    #[should_panic(expected = "at least 2 contestants")]
    fn test_single_contestant_panics() {
        let pop = population(&[1, 2], Objective::Minimize);
        let selector = TournamentSelector::new(0.5, 1).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(0);
        selector.select_one(&pop, &mut rng);
    }

    #[test]
    fn test_validate() {
        assert!(Selector::<AlphabetGenome<i32>>::validate(&TournamentSelector::new(0.7, 5).unwrap()).is_ok());
        assert!(Selector::<AlphabetGenome<i32>>::validate(&TournamentSelector::new(0.7, 1).unwrap()).is_err());
        assert!(Selector::<AlphabetGenome<i32>>::validate(&TournamentSelector::new(-0.2, 3).unwrap()).is_err());
    }
}
