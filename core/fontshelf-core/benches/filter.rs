//! Criterion benchmark for catalog filtering and quick find

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fontshelf_core::catalog::Catalog;
use fontshelf_core::query::FilterState;
use fontshelf_core::search::{filter_fonts, quick_find, QUICK_FIND_LIMIT};

fn bench_filtering(c: &mut Criterion) {
    let catalog = Catalog::builtin();
    let filter = FilterState::new()
        .with_categories(vec!["serif".into()])
        .with_languages(vec!["Cyrillic".into()])
        .with_search("a");

    c.bench_function("filter_fonts serif+cyrillic", |b| {
        b.iter(|| filter_fonts(black_box(catalog.fonts()), black_box(&filter)).len())
    });

    c.bench_function("quick_find mono", |b| {
        b.iter(|| quick_find(black_box(catalog.fonts()), black_box("mono"), QUICK_FIND_LIMIT).len())
    });
}

criterion_group!(benches, bench_filtering);
criterion_main!(benches);
