use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use galib::{
    breeding::TwoPointBreeder,
    evolution::{EvolutionOptions, GeneticOptimizer, Replacement},
    genome::AlphabetGenome,
    mutation::{MultiMutator, RandomMutator, SwitchMutator},
    selection::TournamentSelector,
};

fn distance_to_four(genes: &[i32]) -> f64 {
    genes.iter().map(|&g| (4 - g) as f64).sum()
}

fn run(replacement: Replacement, size: usize, generations: usize) -> f64 {
    let seed = AlphabetGenome::new(
        vec![1, 2, 3, 4],
        Some(vec![1, 2, 2, 4]),
        vec![1; 32],
        distance_to_four,
    )
    .unwrap();

    let mut mutator: MultiMutator<AlphabetGenome<i32>> = MultiMutator::new();
    mutator.add(RandomMutator);
    mutator.add(SwitchMutator);

    let options = EvolutionOptions::builder()
        .replacement(replacement)
        .seed(17)
        .build();
    let mut optimizer = GeneticOptimizer::builder()
        .with_selector(TournamentSelector::new(0.7, 5).unwrap())
        .with_breeder(TwoPointBreeder)
        .with_mutator(mutator)
        .with_options(options)
        .build()
        .unwrap();

    optimizer.init(size, &seed).unwrap();
    optimizer.optimize(generations).unwrap().score
}

fn bench_generations(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimizer");

    for size in [10, 100, 500].iter() {
        group.bench_with_input(BenchmarkId::new("generational", size), size, |b, &size| {
            b.iter(|| run(black_box(Replacement::Generational), size, 50))
        });
        group.bench_with_input(BenchmarkId::new("elitist", size), size, |b, &size| {
            b.iter(|| run(black_box(Replacement::Elitist), size, 50))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generations);
criterion_main!(benches);
