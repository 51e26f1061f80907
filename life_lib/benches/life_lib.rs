use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use life_lib::{
    options::{RunOptions, TrackerType},
    simulation::Simulation,
};

fn tick_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for init_agents in [100usize, 400, 1600] {
        for tracker_type in [TrackerType::Naive, TrackerType::SpatHash] {
            let run_options = RunOptions {
                init_agents,
                tracker_type,
                seed: Some(0),
                ..Default::default()
            };

            group.bench_with_input(
                BenchmarkId::new(format!("{tracker_type:?}"), init_agents),
                &run_options,
                |b, run_options| {
                    let mut sim = Simulation::new(run_options).unwrap();
                    b.iter(|| black_box(sim.step()))
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, tick_benchmark);
criterion_main!(benches);
