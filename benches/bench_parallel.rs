use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

use galib::{
    genome::{AlphabetGenome, Genome},
    objective::Objective,
    population::Population,
    rng::RandomNumberGenerator,
};

// Deliberately slow fitness so that scoring dominates
fn rugged(genes: &[u8]) -> f64 {
    let mut acc = 0.0;
    for (i, &g) in genes.iter().enumerate() {
        for k in 1..50 {
            acc += ((g as f64 + i as f64) / k as f64).sin().abs();
        }
    }
    acc
}

fn members(size: usize) -> Vec<AlphabetGenome<u8>> {
    let seed = AlphabetGenome::new((0..8u8).collect(), None, vec![0u8; 64], rugged).unwrap();
    let mut rng = RandomNumberGenerator::from_seed(1);
    (0..size)
        .map(|_| {
            let mut member = seed.clone();
            member.randomize(&mut rng);
            member
        })
        .collect()
}

fn bench_population_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("population_evaluation");

    // Test with different population sizes
    for size in [10, 100, 1000].iter() {
        let unscored = members(*size);

        for (name, parallel) in [("sequential", false), ("parallel", true)] {
            group.bench_with_input(BenchmarkId::new(name, size), &unscored, |b, unscored| {
                b.iter_batched(
                    || Population::new(unscored.clone(), Objective::Minimize),
                    |population| black_box(population.evaluate(parallel)),
                    BatchSize::SmallInput,
                )
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_population_evaluation);
criterion_main!(benches);
