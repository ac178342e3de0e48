use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use webvcr::fingerprint::fingerprint;

fn bench_fingerprint_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("fingerprint");

    for size in [100, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let body = "x".repeat(size);
            let url = "https://example.com/api/search?q=rust&page=2";

            b.iter(|| {
                fingerprint(
                    black_box("POST"),
                    black_box(url),
                    black_box(Some(body.as_str())),
                )
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fingerprint_sizes);
criterion_main!(benches);
