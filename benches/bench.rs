// Criterion benchmarks for Affinity Engine

use affinity_engine::core::{interests::interest_score, personality::personality_score, Matcher};
use affinity_engine::models::{Diet, EducationTier, LifestyleAttributes, Profile};
use affinity_engine::services::LexiconSentiment;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const TAGS: &[&str] = &[
    "music", "travel", "hiking", "cooking", "chess", "art", "football", "yoga", "movies", "books",
];

const BIOS: &[&str] = &[
    "Love meeting new people and talking about music",
    "Startup founder, ambitious and driven, always learning",
    "Photographer and writer, creative at heart",
    "Not a fan of drama. Coffee, books and quiet weekends",
];

fn create_candidate(id: usize) -> Profile {
    let diet = match id % 3 {
        0 => Diet::Veg,
        1 => Diet::Vegan,
        _ => Diet::NonVeg,
    };
    let education = match id % 4 {
        0 => EducationTier::Diploma,
        1 => EducationTier::Bachelor,
        2 => EducationTier::Master,
        _ => EducationTier::Doctorate,
    };

    Profile::new(id.to_string())
        .with_bio(BIOS[id % BIOS.len()])
        .with_interests((0..4).map(|k| TAGS[(id + k * 3) % TAGS.len()]))
        .with_lifestyle(
            LifestyleAttributes::default()
                .with_diet(diet)
                .with_education(education),
        )
}

fn create_target() -> Profile {
    Profile::new("target")
        .with_bio("I love music, art and my friends")
        .with_interests(["music", "travel", "art", "books"])
        .with_lifestyle(
            LifestyleAttributes::default()
                .with_strict_veg(true)
                .with_diet(Diet::Veg)
                .with_education(EducationTier::Bachelor),
        )
}

fn bench_interest_score(c: &mut Criterion) {
    let a = ["music", "travel", "art", "books"];
    let b = ["music", "chess", "books", "yoga", "hiking"];

    c.bench_function("interest_score", |bench| {
        bench.iter(|| interest_score(black_box(&a), black_box(&b)));
    });
}

fn bench_personality_score(c: &mut Criterion) {
    let sentiment = LexiconSentiment::new();

    c.bench_function("personality_score", |b| {
        b.iter(|| personality_score(black_box(BIOS[0]), black_box(BIOS[1]), &sentiment));
    });
}

fn bench_ranking(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let target = create_target();

    let mut group = c.benchmark_group("ranking");

    for candidate_count in [10, 50, 100, 500, 1000].iter() {
        let candidates: Vec<Profile> = (0..*candidate_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("rank", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| matcher.rank(black_box(&target), black_box(&candidates)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_interest_score, bench_personality_score, bench_ranking);

criterion_main!(benches);
