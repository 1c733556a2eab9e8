use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rankwise::algorithms::{Ranker, RuleBasedScorer, ScoringAlgorithm};
use rankwise::*;

fn profile() -> UserProfile {
    let prefs = UserPreferences::new(["attraction", "food"], ["museum", "family", "street-food"])
        .with_price_range(PriceRange::new(20.0, 200.0).unwrap());
    UserProfile::new("bench-user", prefs)
}

fn catalog(size: usize) -> Vec<CandidateItem> {
    const CATEGORIES: [&str; 3] = ["attraction", "food", "hotel"];
    const TAGS: [&str; 6] = ["museum", "family", "lake", "street-food", "history", "spa"];

    (0..size)
        .map(|i| {
            CandidateItem::new(format!("item-{}", i), CATEGORIES[i % CATEGORIES.len()])
                .with_tags([TAGS[i % TAGS.len()], TAGS[(i / 2) % TAGS.len()]])
                .with_price((i % 400) as f64)
                .with_rating((i % 11) as f64 / 2.0)
        })
        .collect()
}

fn benchmark_scoring(c: &mut Criterion) {
    let scorer = RuleBasedScorer::new();
    let profile = profile();
    let item = catalog(1).remove(0);

    c.bench_function("rule_based_score", |b| {
        b.iter(|| black_box(scorer.score(black_box(&profile), black_box(&item))));
    });
}

fn benchmark_ranking(c: &mut Criterion) {
    let profile = profile();
    let mut group = c.benchmark_group("rank_top_10");

    for size in [100, 1_000, 10_000] {
        let items = catalog(size);

        group.bench_with_input(BenchmarkId::new("sequential", size), &items, |b, items| {
            let ranker = Ranker::new(RuleBasedScorer).with_parallel_threshold(usize::MAX);
            b.iter(|| black_box(ranker.rank(&profile, items, 10)));
        });

        group.bench_with_input(BenchmarkId::new("parallel", size), &items, |b, items| {
            let ranker = Ranker::new(RuleBasedScorer).with_parallel_threshold(1);
            b.iter(|| black_box(ranker.rank(&profile, items, 10)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_scoring, benchmark_ranking);
criterion_main!(benches);
