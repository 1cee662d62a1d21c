//! Benchmarks for carton packing.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use u_shipping_binpack::{bundle_with_defaults, pack_all, Config, Package, Packer, Solver};

fn shipment(count: u32) -> Vec<Package> {
    (0..count)
        .map(|i| {
            Package::new(80 + (i * 37) % 300, 60 + (i * 13) % 250, 40 + (i * 7) % 200).unwrap()
        })
        .collect()
}

fn greedy_benchmark(c: &mut Criterion) {
    let packages = shipment(200);
    let container = Package::STANDARD_CONTAINER;

    c.bench_function("greedy_200_cartons", |b| {
        b.iter(|| black_box(pack_all(black_box(&container), packages.iter().copied())))
    });
}

fn packer_benchmark(c: &mut Criterion) {
    let packages = shipment(8);
    let packer = Packer::new(Config::default().with_iteration_budget(5000));

    c.bench_function("rotation_search_8_cartons", |b| {
        b.iter(|| {
            let result = packer.solve(black_box(&packages));
            black_box(result)
        })
    });
}

fn bundle_benchmark(c: &mut Criterion) {
    let packages = vec![Package::new(400, 300, 100).unwrap(); 500];

    c.bench_function("bundle_500_cartons", |b| {
        b.iter(|| black_box(bundle_with_defaults(black_box(&packages))))
    });
}

criterion_group!(benches, greedy_benchmark, packer_benchmark, bundle_benchmark);
criterion_main!(benches);
