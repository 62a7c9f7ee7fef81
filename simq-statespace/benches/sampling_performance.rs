use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use num_complex::Complex32;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use simq_statespace::{
    get_state_space_with_config, SamplingStrategy, StateSpace, StateSpaceConfig,
};

fn create_random_state(
    num_qubits: usize,
    num_threads: usize,
    config: StateSpaceConfig,
) -> Box<dyn StateSpace> {
    let mut rng = StdRng::seed_from_u64(42);
    let amplitudes: Vec<Complex32> = (0..1usize << num_qubits)
        .map(|_| Complex32::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5))
        .collect();

    let mut state = get_state_space_with_config(num_qubits, num_threads, config).unwrap();
    state.create_state().unwrap();
    state.set_amplitudes(&amplitudes).unwrap();
    state.normalize().unwrap();
    state
}

fn bench_sampling_qubits(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling_qubits");
    let shots = 10_000;

    for num_qubits in [5, 10, 15, 20].iter() {
        group.throughput(Throughput::Elements(shots as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_qubits", num_qubits)),
            num_qubits,
            |b, &num_qubits| {
                let mut state =
                    create_random_state(num_qubits, 1, StateSpaceConfig::new().with_seed(123));
                let mut out = Vec::with_capacity(shots);

                b.iter(|| state.sample_state(black_box(shots), &mut out).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_sampling_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling_strategies");
    let num_qubits = 12;

    for &shots in [1_000, 100_000].iter() {
        group.throughput(Throughput::Elements(shots as u64));

        for strategy in [
            SamplingStrategy::Cdf,
            SamplingStrategy::Alias,
            SamplingStrategy::SortedSweep,
        ] {
            let config = StateSpaceConfig::new()
                .with_seed(123)
                .with_strategy(strategy);
            let mut state = create_random_state(num_qubits, 1, config);
            let mut out = Vec::with_capacity(shots);

            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", strategy), shots),
                &shots,
                |b, &shots| {
                    b.iter(|| state.sample_state(black_box(shots), &mut out).unwrap());
                },
            );
        }
    }

    group.finish();
}

fn bench_parallel_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_scaling");
    let num_qubits = 18;
    let shots = 1_000_000;
    group.throughput(Throughput::Elements(shots as u64));
    group.sample_size(20);

    for &threads in [1, 2, 4, 8].iter() {
        let config = StateSpaceConfig::new()
            .with_seed(123)
            .with_parallel_threshold(0);
        let mut state = create_random_state(num_qubits, threads, config);
        let mut out = Vec::with_capacity(shots);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_threads", threads)),
            &threads,
            |b, _| {
                b.iter(|| state.sample_state(black_box(shots), &mut out).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_sampling_qubits,
    bench_sampling_strategies,
    bench_parallel_scaling
);
criterion_main!(benches);
