//! Relaxation and path following on layered hit graphs

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trackca_core::model::{AutomatonCell, ItemArena, ItemId};
use trackca_core::{follow_all, mark_seeds, relax, WeightedNeighborhood};

/// `n_layers` layers of `width` items, each linked to its three nearest
/// items on the next layer
fn layered(n_layers: u32, width: u32) -> (ItemArena<AutomatonCell>, WeightedNeighborhood) {
    let arena: ItemArena<AutomatonCell> =
        vec![AutomatonCell::new(1.0); (n_layers * width) as usize].into();
    let mut hood = WeightedNeighborhood::new(arena.len());
    for layer in 0..n_layers.saturating_sub(1) {
        for slot in 0..width {
            let from = ItemId::new(layer * width + slot);
            for next in slot.saturating_sub(1)..(slot + 2).min(width) {
                let to = ItemId::new((layer + 1) * width + next);
                let weight = if next == slot { 1.0 } else { 0.5 };
                hood.insert(from, weight, to).expect("inside arena");
            }
        }
    }
    (arena, hood)
}

fn bench_relax(c: &mut Criterion) {
    let mut group = c.benchmark_group("relax");

    for width in [10u32, 50, 200] {
        let (arena, hood) = layered(8, width);
        group.bench_with_input(BenchmarkId::from_parameter(width), &hood, |b, hood| {
            b.iter_batched(
                || arena.clone(),
                |mut arena| black_box(relax(&mut arena, hood)),
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_seed_and_follow(c: &mut Criterion) {
    let mut group = c.benchmark_group("seed_and_follow");

    for width in [10u32, 50, 200] {
        let (mut arena, hood) = layered(8, width);
        relax(&mut arena, &hood);
        group.bench_with_input(BenchmarkId::from_parameter(width), &hood, |b, hood| {
            b.iter_batched(
                || arena.clone(),
                |mut arena| {
                    mark_seeds(&mut arena, hood, true, f64::NEG_INFINITY);
                    let mut paths = Vec::new();
                    follow_all(&arena, hood, &mut paths, f64::NEG_INFINITY);
                    black_box(paths)
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_relax, bench_seed_and_follow);
criterion_main!(benches);
