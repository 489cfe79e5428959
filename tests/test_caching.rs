use galib::{
    breeding::TwoPointBreeder,
    caching::{CacheType, CachingChallenge, MemoizedChallenge},
    evolution::{EvolutionOptions, GeneticOptimizer, OptimizerState},
    genome::{AlphabetGenome, Genome},
    mutation::RandomMutator,
    selection::TournamentSelector,
    Challenge,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

// Define a challenge that tracks the number of evaluations
#[derive(Clone)]
struct CostlyChallenge {
    // Use Arc<AtomicUsize> to track evaluations across clones
    evaluations: Arc<AtomicUsize>,
}

impl CostlyChallenge {
    fn new() -> Self {
        Self {
            evaluations: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn get_evaluations(&self) -> usize {
        self.evaluations.load(Ordering::SeqCst)
    }
}

impl Challenge<u8> for CostlyChallenge {
    fn score(&self, genes: &[u8]) -> f64 {
        self.evaluations.fetch_add(1, Ordering::SeqCst);

        // Simulate an expensive computation
        std::thread::sleep(std::time::Duration::from_millis(1));

        genes.iter().filter(|&&g| g == 0).count() as f64
    }
}

fn genome(genes: Vec<u8>, challenge: Arc<dyn Challenge<u8>>) -> AlphabetGenome<u8> {
    AlphabetGenome::with_shared_challenge(vec![0, 1], None, genes, challenge).unwrap()
}

#[test]
fn test_memoized_challenge_shared_between_genomes() {
    let challenge = CostlyChallenge::new();
    let shared = challenge.clone().with_cache(CacheType::Global);

    // Identical content in distinct genomes is scored once
    let a = genome(vec![0, 1, 0, 1], Arc::clone(&shared));
    let b = genome(vec![0, 1, 0, 1], Arc::clone(&shared));
    let c = genome(vec![1, 1, 1, 1], shared);

    assert_eq!(a.score(), 2.0);
    assert_eq!(b.score(), 2.0);
    assert_eq!(c.score(), 0.0);
    assert_eq!(challenge.get_evaluations(), 2);
}

#[test]
fn test_memoized_challenge_clones_share_cache() {
    let challenge = CostlyChallenge::new();
    let memoized: MemoizedChallenge<u8, CostlyChallenge> = challenge.clone().memoized();
    let copy = memoized.clone();

    memoized.score(&[0, 0, 1]);
    copy.score(&[0, 0, 1]);
    assert_eq!(challenge.get_evaluations(), 1);
    assert_eq!(copy.cache_size(), 1);

    memoized.clear_cache();
    copy.score(&[0, 0, 1]);
    assert_eq!(challenge.get_evaluations(), 2);
}

#[test]
fn test_optimizer_with_cached_challenge() {
    for cache_type in [CacheType::Global, CacheType::ThreadLocal] {
        let challenge = CostlyChallenge::new();
        let seed = genome(vec![0; 12], challenge.clone().with_cache(cache_type));

        let options = EvolutionOptions::builder()
            .parallel_evaluation(true)
            .parallel_threshold(8)
            .max_generations(300)
            .seed(11)
            .build();
        let mut optimizer = GeneticOptimizer::builder()
            .with_selector(TournamentSelector::new(0.7, 3).unwrap())
            .with_breeder(TwoPointBreeder)
            .with_mutator(RandomMutator)
            .with_p_mutate(0.3)
            .with_options(options)
            .build()
            .unwrap();
        optimizer.init(16, &seed).unwrap();
        let outcome = optimizer.optimize_until(|best| best.score() <= 2.0).unwrap();

        // 16 initial members plus 16 per generation bound the evaluations;
        // clones and repeated gene sequences hit the caches
        assert_eq!(outcome.state, OptimizerState::Converged);
        assert!(challenge.get_evaluations() <= 16 * (outcome.generations + 1));
    }
}
