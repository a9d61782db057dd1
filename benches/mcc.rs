use burn_benchmarks::metrics::mcc::matthews_corrcoef;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn labels(n: usize, n_classes: usize, offset: usize) -> Vec<usize> {
    (0..n).map(|i| (i * 7 + offset) % n_classes).collect()
}

fn bench_matthews_corrcoef(c: &mut Criterion) {
    let y_true = labels(100_000, 3, 0);
    let y_pred = labels(100_000, 3, 1);

    c.bench_function("matthews_corrcoef 100k x 3 classes", |b| {
        b.iter(|| matthews_corrcoef(black_box(&y_true), black_box(&y_pred)))
    });
}

criterion_group!(benches, bench_matthews_corrcoef);
criterion_main!(benches);
