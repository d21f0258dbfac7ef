use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sudoku_swarm::core::config::SimulationParams;
use sudoku_swarm::simulation::{initialize_board, run_tick};
use sudoku_swarm::spatial::ConstraintMode;

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for mode in [ConstraintMode::Free, ConstraintMode::Box] {
        let params = SimulationParams::default().with_mode(mode);
        group.bench_function(format!("mode_{}", mode), |b| {
            b.iter_batched(
                || {
                    let mut rng = ChaCha8Rng::seed_from_u64(0xBEEF);
                    let agents = initialize_board(&[], mode, &mut rng).agents;
                    (agents, rng)
                },
                |(agents, mut rng)| {
                    let mut agents = agents;
                    for _ in 0..16 {
                        agents = run_tick(&agents, &params, &mut rng);
                    }
                    agents
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_init(c: &mut Criterion) {
    c.bench_function("initialize_box", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        b.iter(|| initialize_board(&[], ConstraintMode::Box, &mut rng));
    });
}

criterion_group!(benches, bench_tick, bench_init);
criterion_main!(benches);
