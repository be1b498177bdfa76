//! Graph fabrication benchmarks.
//!
//! Measures merge cost on wide diamond hierarchies: one class implementing
//! `width` interfaces that all extend a shared top, each declaring the same
//! `methods` slots, plus a deep superclass chain.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mgraph::{Fabricator, GraphCache};
use mgraph_ir::{HierarchyBuilder, TypeId, TypeTable};

/// Build `width` sibling interfaces over one top interface, `depth`
/// superclasses, and a leaf class; every type declares `methods` slots.
fn diamond(width: usize, depth: usize, methods: usize) -> (TypeTable, TypeId) {
    let mut h = HierarchyBuilder::new();
    let names: Vec<String> = (0..methods).map(|m| format!("m{m}")).collect();

    let mut top = h.interface("bench.Top");
    for name in &names {
        top = top.default_method(name, &[TypeId::INT]);
    }
    let top = top.build().unwrap_or_else(|e| panic!("{e}"));

    let mut siblings = Vec::with_capacity(width);
    for w in 0..width {
        let mut b = h.interface(&format!("bench.Side{w}")).implements(top);
        for (m, name) in names.iter().enumerate() {
            // Every other sibling re-declares half the slots.
            if w % 2 == 0 && m % 2 == 0 {
                b = b.default_method(name, &[TypeId::INT]);
            }
        }
        siblings.push(b.build().unwrap_or_else(|e| panic!("{e}")));
    }

    let mut parent = None;
    for d in 0..depth {
        let mut b = h.class(&format!("bench.Base{d}"));
        if let Some(p) = parent {
            b = b.extends(p);
        }
        b = b.concrete(&format!("base{d}"), &[]);
        parent = Some(b.build().unwrap_or_else(|e| panic!("{e}")));
    }

    let mut leaf = h.class("bench.Leaf");
    if let Some(p) = parent {
        leaf = leaf.extends(p);
    }
    for &side in &siblings {
        leaf = leaf.implements(side);
    }
    let leaf = leaf.build().unwrap_or_else(|e| panic!("{e}"));

    let (table, _) = h.finish().unwrap_or_else(|e| panic!("{e}"));
    (table, leaf)
}

fn bench_fabricate_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("fabricate/wide_diamond");
    let fabricator = Fabricator::new();

    for width in [4, 16, 64] {
        let (table, leaf) = diamond(width, 4, 32);
        group.throughput(Throughput::Elements(width as u64));
        group.bench_with_input(BenchmarkId::from_parameter(width), &leaf, |b, &leaf| {
            b.iter(|| black_box(fabricator.fabricate(&table, leaf)));
        });
    }
    group.finish();
}

fn bench_fabricate_deep(c: &mut Criterion) {
    let mut group = c.benchmark_group("fabricate/deep_chain");
    let fabricator = Fabricator::new();

    for depth in [8, 64, 256] {
        let (table, leaf) = diamond(2, depth, 8);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &leaf, |b, &leaf| {
            b.iter(|| black_box(fabricator.fabricate(&table, leaf)));
        });
    }
    group.finish();
}

fn bench_cache_hit(c: &mut Criterion) {
    let (table, leaf) = diamond(16, 4, 32);
    let cache = GraphCache::new();
    let _ = cache.get_or_fabricate(&table, leaf);

    c.bench_function("cache/hit", |b| {
        b.iter(|| black_box(cache.get_or_fabricate(&table, leaf)));
    });
}

criterion_group!(
    benches,
    bench_fabricate_wide,
    bench_fabricate_deep,
    bench_cache_hit
);
criterion_main!(benches);
