use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mycelia_core::systems::connectivity::{components, split_plan};
use mycelia_data::GridPos;
use std::collections::BTreeSet;

fn solid_block(side: i32) -> BTreeSet<GridPos> {
    (0..side * side)
        .map(|i| GridPos::new(i % side, i / side))
        .collect()
}

fn bench_connected_block(c: &mut Criterion) {
    let cells = solid_block(20);

    c.bench_function("components_block_400", |b| {
        b.iter(|| black_box(components(&cells).len()))
    });
}

fn bench_striped_split(c: &mut Criterion) {
    // Vertical stripes two tiles apart never touch, giving ten components.
    let cells: BTreeSet<GridPos> = (0..20)
        .flat_map(|y| (0..10).map(move |s| GridPos::new(s * 2, y)))
        .collect();

    c.bench_function("split_plan_stripes_200", |b| {
        b.iter(|| black_box(split_plan(&cells)))
    });
}

fn bench_single_chain(c: &mut Criterion) {
    let cells: BTreeSet<GridPos> = (0..300).map(|i| GridPos::new(i, i % 2)).collect();

    c.bench_function("components_chain_300", |b| {
        b.iter(|| black_box(components(&cells).len()))
    });
}

criterion_group!(
    benches,
    bench_connected_block,
    bench_striped_split,
    bench_single_chain
);
criterion_main!(benches);
