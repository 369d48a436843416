use arith::{compress_to_vec, decompress_from_slice};
use criterion::{criterion_group, criterion_main, Criterion};

fn skewed_input(len: usize) -> Vec<u8> {
    // quadratic residues mod 251 give a mildly skewed byte distribution
    (0..len).map(|i| ((i * i) % 251) as u8).collect()
}

fn bench_container(c: &mut Criterion) {
    let mut group = c.benchmark_group("container");
    let input = skewed_input(64 * 1024);

    group.bench_function("compress", |b| {
        b.iter(|| compress_to_vec(&input).unwrap())
    });

    let container = compress_to_vec(&input).unwrap();
    group.bench_function("decompress", |b| {
        b.iter(|| decompress_from_slice(&container).unwrap())
    });
}

fn bench_model(c: &mut Criterion) {
    use arith::model::{CumulativeStarts, FrequencyModel};

    let mut group = c.benchmark_group("model");
    let input = skewed_input(256 * 1024);

    group.bench_function("scan", |b| b.iter(|| FrequencyModel::scan(&input)));

    let model = FrequencyModel::scan(&input);
    group.bench_function("derive_starts", |b| {
        b.iter(|| CumulativeStarts::from_model(&model))
    });
}

criterion_group!(benches, bench_container, bench_model);
criterion_main!(benches);
