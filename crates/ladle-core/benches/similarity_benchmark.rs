//! Benchmarks for the item similarity matrix and content recommendation.
//!
//! Measures:
//! - Cosine similarity over recipe-sized binary vectors
//! - All-pairs matrix build for growing catalogs
//! - A single content recommendation against a prebuilt matrix

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ladle_core::{
    cosine_similarity, Catalog, ContentRecommender, Dataset, FeatureVocabulary, Item,
    ItemSimilarityMatrix, Order, RecommendConfig, User,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TAGS: usize = 24;
const INGREDIENTS: usize = 200;

/// Catalog of `n` items with ~4 tags and ~8 ingredients each.
fn catalog(n: usize, rng: &mut StdRng) -> Catalog {
    let vocabulary = FeatureVocabulary::from_labels(
        (0..TAGS).map(|i| format!("tag {i}")),
        (0..INGREDIENTS).map(|i| format!("ingredient {i}")),
    );
    let items = (0..n)
        .map(|id| {
            let mut features = vec![0.0_f32; TAGS + INGREDIENTS];
            for _ in 0..4 {
                features[rng.gen_range(0..TAGS)] = 1.0;
            }
            for _ in 0..8 {
                features[TAGS + rng.gen_range(0..INGREDIENTS)] = 1.0;
            }
            Item {
                id: id as u64,
                title: format!("Recipe {id}"),
                features,
            }
        })
        .collect();
    Catalog::new(vocabulary, items).expect("valid catalog")
}

fn bench_cosine(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let catalog = catalog(2, &mut rng);
    let a = &catalog.items()[0].features;
    let b = &catalog.items()[1].features;

    c.bench_function("cosine_binary_224", |bench| {
        bench.iter(|| black_box(cosine_similarity(black_box(a), black_box(b))));
    });
}

fn bench_matrix_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("similarity_matrix_build");
    group.sample_size(10);

    for n in [100_usize, 500, 1000] {
        let mut rng = StdRng::seed_from_u64(42);
        let catalog = catalog(n, &mut rng);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &catalog, |bench, catalog| {
            bench.iter(|| black_box(ItemSimilarityMatrix::build(catalog)));
        });
    }

    group.finish();
}

fn bench_recommend(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let catalog = catalog(500, &mut rng);
    let users = vec![User::new(1, 52.21, 6.88).expect("valid user")];
    let orders = (0..40)
        .map(|_| Order::new(1, rng.gen_range(0..500), rng.gen_range(1..=5)).expect("valid order"))
        .collect();
    let dataset = Dataset::new(users, orders, catalog).expect("valid dataset");
    let matrix = ItemSimilarityMatrix::build(dataset.catalog());
    let recommender = ContentRecommender::new(&dataset, &matrix, RecommendConfig::default());

    c.bench_function("content_recommend_500_items", |bench| {
        bench.iter(|| black_box(recommender.recommend(black_box(1), 10, 3)));
    });
}

criterion_group!(benches, bench_cosine, bench_matrix_build, bench_recommend);

criterion_main!(benches);
