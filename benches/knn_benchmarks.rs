//! Benchmarking suite for index construction and the query strategies.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use kdnn::{BoundVectorSearch, KdTree, LinearSearch, PointSet, RejectionFlagSearch, SearchStrategy};

const DIM: usize = 28 * 28;

fn random_points(rng: &mut StdRng, n: usize) -> PointSet {
    let mut set = PointSet::with_capacity(DIM, n).unwrap();
    for i in 0..n {
        let attrs: Vec<u8> = (0..DIM).map(|_| rng.gen()).collect();
        set.push(&attrs, u32::try_from(i).unwrap()).unwrap();
    }
    set
}

fn random_queries(rng: &mut StdRng, n: usize) -> Vec<Vec<u8>> {
    (0..n).map(|_| (0..DIM).map(|_| rng.gen()).collect()).collect()
}

/// Benchmark tree construction
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    let size = 2000;
    group.throughput(Throughput::Elements(size as u64));
    group.bench_function("median_partition", |b| {
        b.iter_batched(
            || {
                let mut rng = StdRng::seed_from_u64(1);
                random_points(&mut rng, size)
            },
            |points| black_box(KdTree::build(points)),
            criterion::BatchSize::LargeInput,
        );
    });
    group.finish();
}

/// Benchmark the three query strategies against the same tree
fn bench_search(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(2);
    let tree = KdTree::build(random_points(&mut rng, 2000));
    let queries = random_queries(&mut rng, 50);

    let mut group = c.benchmark_group("search");
    group.throughput(Throughput::Elements(queries.len() as u64));

    let strategies: Vec<Box<dyn SearchStrategy>> =
        vec![Box::new(LinearSearch), Box::new(BoundVectorSearch), Box::new(RejectionFlagSearch)];
    for strategy in strategies {
        group.bench_function(strategy.name(), |b| {
            b.iter(|| {
                for query in &queries {
                    black_box(strategy.search(&tree, query).unwrap());
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_search);
criterion_main!(benches);
