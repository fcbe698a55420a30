// Throughput benchmarks for cosine scoring and full-corpus ranking
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use triagex_core::{cosine_similarity, Embedding, IssueRecord, TicketFields};
use triagex_engine::CorpusStore;

fn synthetic_embedding(seed: usize, dim: usize) -> Embedding {
    // Cheap deterministic pseudo-random components, never all zero.
    let data: Vec<f32> = (0..dim)
        .map(|i| (((seed * 31 + i * 17) % 101) as f32 / 50.0) - 1.0 + 0.01)
        .collect();
    Embedding::new(data)
}

fn synthetic_record(seed: usize, dim: usize) -> IssueRecord {
    IssueRecord::from_parts(
        TicketFields::new(
            format!("issue {seed}"),
            "category",
            format!("description {seed}"),
        ),
        Some(format!("resolution {seed}")),
        vec![
            synthetic_embedding(seed, dim),
            synthetic_embedding(seed + 1, dim),
            synthetic_embedding(seed + 2, dim),
        ],
    )
}

fn benchmark_cosine(c: &mut Criterion) {
    let mut group = c.benchmark_group("cosine_similarity");

    for dim in [128, 1536].iter() {
        let a = synthetic_embedding(1, *dim);
        let b = synthetic_embedding(2, *dim);
        group.bench_with_input(BenchmarkId::from_parameter(dim), dim, |bench, _| {
            bench.iter(|| {
                let score = cosine_similarity(black_box(&a), black_box(&b)).unwrap();
                black_box(score);
            });
        });
    }

    group.finish();
}

fn benchmark_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");

    for size in [100, 1000].iter() {
        let records = (0..*size).map(|i| synthetic_record(i, 128)).collect();
        let corpus = CorpusStore::from_records(records);
        let query = synthetic_record(999_983, 128);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |bench, _| {
            bench.iter(|| {
                let ranked = corpus.rank(black_box(&query)).unwrap();
                black_box(ranked);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_cosine, benchmark_rank);
criterion_main!(benches);
