//! Benchmarks for include resolution and rule compilation over a synthetic
//! universe of lists with layered, attribute-scoped includes.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dl_compiler::{compile, resolve, Quantumult, Surge};
use dl_core::{List, ListUniverse};

/// Builds `width` leaf lists of 200 entries each plus a chain of aggregate
/// lists that include every leaf, half of them scoped by `@ads`.
fn create_universe(width: usize) -> ListUniverse {
    let mut universe = ListUniverse::new();

    for i in 0..width {
        let mut text = String::new();
        for j in 0..200 {
            let attr = if j % 4 == 0 { " @ads" } else { "" };
            text.push_str(&format!("full:host{j}.leaf{i}.com{attr}\n"));
            text.push_str(&format!("leaf{i}-{j}.net\n"));
        }
        text.push_str("regexp:^ad[0-9]+\\.\n");
        universe.insert(List::parse(&format!("leaf{i}"), &text).unwrap());
    }

    let mut all = String::new();
    for i in 0..width {
        if i % 2 == 0 {
            all.push_str(&format!("include:leaf{i} @ads\n"));
        } else {
            all.push_str(&format!("include:leaf{i}\n"));
        }
    }
    universe.insert(List::parse("all", &all).unwrap());
    universe.insert(List::parse("top", "include:all\ninclude:leaf0 @!ads\ninclude:all").unwrap());

    universe
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    let universe = create_universe(50);
    let top = universe.get("top").unwrap();

    group.bench_function("layered_top", |b| {
        b.iter(|| resolve(black_box(top), black_box(&universe)).unwrap())
    });

    group.bench_function("whole_universe", |b| {
        b.iter(|| {
            universe
                .lists()
                .map(|list| resolve(list, &universe).unwrap().entries.len())
                .sum::<usize>()
        })
    });

    group.finish();
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");
    let universe = create_universe(50);
    let resolved = resolve(universe.get("top").unwrap(), &universe).unwrap();

    group.bench_function("surge", |b| {
        b.iter(|| compile(black_box(&resolved), &Surge).unwrap())
    });

    group.bench_function("quantumult", |b| {
        b.iter(|| compile(black_box(&resolved), &Quantumult).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_resolve, bench_compile);
criterion_main!(benches);
