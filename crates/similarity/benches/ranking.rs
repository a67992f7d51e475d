//! Benchmarks for index fitting and ranking
//!
//! Run with: cargo bench --package similarity
//!
//! Uses a synthetic corpus shaped like the IMDB top-1000 facet view.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use similarity::{SimilarityRanker, TfIdfIndex};

const GENRES: &[&str] = &["Action", "Drama", "Comedy", "Crime", "Adventure", "Romance", "Horror"];
const DIRECTORS: &[&str] = &[
    "Steven Spielberg", "Martin Scorsese", "Alfred Hitchcock", "Akira Kurosawa",
    "Stanley Kubrick", "Billy Wilder", "Christopher Nolan", "Hayao Miyazaki",
];

fn synthetic_documents(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            format!(
                "{}, {} {} {} {} Star{}",
                GENRES[i % GENRES.len()],
                GENRES[(i / 3) % GENRES.len()],
                1920 + (i % 10) * 10,
                60 + (i % 5) * 30,
                DIRECTORS[i % DIRECTORS.len()],
                i % 97
            )
        })
        .collect()
}

fn bench_fit(c: &mut Criterion) {
    let documents = synthetic_documents(1000);

    c.bench_function("tfidf_fit_1000", |b| {
        b.iter(|| {
            let index = TfIdfIndex::fit(black_box(&documents)).unwrap();
            black_box(index)
        })
    });
}

fn bench_rank_by_query(c: &mut Criterion) {
    let index = TfIdfIndex::fit(&synthetic_documents(1000)).unwrap();
    let ranker = SimilarityRanker::new();

    c.bench_function("rank_by_query", |b| {
        b.iter(|| {
            let results = ranker.rank_by_query(black_box("Action 1980 Steven Spielberg"), &index);
            black_box(results)
        })
    });
}

fn bench_rank_by_item(c: &mut Criterion) {
    let index = TfIdfIndex::fit(&synthetic_documents(1000)).unwrap();
    let ranker = SimilarityRanker::new();

    c.bench_function("rank_by_item", |b| {
        b.iter(|| {
            let results = ranker.rank_by_item(black_box(42), &index).unwrap();
            black_box(results)
        })
    });
}

criterion_group!(
    benches,
    bench_fit,
    bench_rank_by_query,
    bench_rank_by_item
);
criterion_main!(benches);
