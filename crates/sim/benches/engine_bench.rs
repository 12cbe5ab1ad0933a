use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::Rng;
use strand_sim::simulation::SimulationBuilder;
use strand_sim::trace::{final_state_json, tick_log_json};
use strand_sim::validation::validate;

fn generate_fasta(segments: usize) -> String {
    const BODIES: [&str; 4] = ["ACC", "GAT", "CCG", "AAA"];
    const STOPS: [&str; 3] = ["TAA", "TAG", "TGA"];

    let mut rng = rand::rng();
    let mut text = String::from(">bench\nGGG");
    for _ in 0..segments {
        text.push_str("ATG");
        for _ in 0..rng.random_range(1..6) {
            text.push_str(BODIES[rng.random_range(0..BODIES.len())]);
        }
        text.push_str(STOPS[rng.random_range(0..STOPS.len())]);
    }
    text.push('\n');
    text
}

fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation");

    for segments in [100, 10_000] {
        let text = generate_fasta(segments);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("validate", segments), &text, |b, text| {
            b.iter(|| black_box(validate(black_box(text)).unwrap()))
        });
    }

    group.finish();
}

fn bench_simulation_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_run");

    for segments in [10, 100, 1_000] {
        let text = generate_fasta(segments);
        group.throughput(Throughput::Elements(segments as u64));
        group.bench_with_input(BenchmarkId::new("run", segments), &text, |b, text| {
            b.iter(|| {
                let trace = SimulationBuilder::new()
                    .fasta(text.as_str())
                    .max_ticks(u64::MAX)
                    .build()
                    .unwrap()
                    .run()
                    .unwrap();
                black_box(trace)
            })
        });
    }

    group.bench_function("run_with_mutation", |b| {
        let text = generate_fasta(100);
        b.iter(|| {
            SimulationBuilder::new()
                .fasta(text.as_str())
                .mutation_rate(0.05)
                .seed(42)
                .build()
                .unwrap()
                .run()
                .unwrap()
        })
    });

    group.finish();
}

fn bench_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialization");
    let trace = SimulationBuilder::new()
        .fasta(generate_fasta(200))
        .build()
        .unwrap()
        .run()
        .unwrap();

    group.bench_function("final_state", |b| {
        b.iter(|| black_box(final_state_json(black_box(&trace), false).unwrap()))
    });
    group.bench_function("tick_log", |b| {
        b.iter(|| black_box(tick_log_json(black_box(&trace), false).unwrap()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_validation,
    bench_simulation_run,
    bench_serialization
);
criterion_main!(benches);
