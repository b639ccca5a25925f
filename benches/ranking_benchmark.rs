use criterion::{black_box, criterion_group, criterion_main, Criterion};
use alumni_search_engine::{
    ranking::{distance::edit_distance, expand_keywords, FuzzyRanker, Ranker},
    Candidate,
};

const FIELDS: &[&str] = &[
    "VLSI Engineer", "Software Engineer", "Structural Engineer", "Data Scientist",
    "Chip Design", "Embedded Firmware", "Product Manager", "Automotive Design",
];
const BRANCHES: &[&str] = &["ECE", "CSE", "CV", "ME", "ISE", "EEE"];
const CITIES: &[&str] = &["Bengaluru", "Mysuru", "Hyderabad", "Pune", "Chennai"];

fn create_test_candidates(count: usize) -> Vec<Candidate> {
    (0..count)
        .map(|i| {
            Candidate::new(i as i64, format!("Alumnus {}", i))
                .with_field(FIELDS[i % FIELDS.len()])
                .with_branch(BRANCHES[i % BRANCHES.len()])
                .with_company(format!("Company {}", i % 10))
                .with_year(2010 + (i % 12) as i32)
                .with_location(CITIES[i % CITIES.len()], "Karnataka", "India")
        })
        .collect()
}

fn bench_fuzzy_ranking(c: &mut Criterion) {
    let ranker = FuzzyRanker::new();

    let candidates_10 = create_test_candidates(10);
    let candidates_100 = create_test_candidates(100);
    let candidates_1000 = create_test_candidates(1000);

    c.bench_function("fuzzy_rank_10", |b| {
        b.iter(|| black_box(ranker.rank("chip design", &candidates_10)));
    });

    c.bench_function("fuzzy_rank_100", |b| {
        b.iter(|| black_box(ranker.rank("chip design", &candidates_100)));
    });

    c.bench_function("fuzzy_rank_1000", |b| {
        b.iter(|| black_box(ranker.rank("chip design", &candidates_1000)));
    });

    c.bench_function("fuzzy_rank_typo_100", |b| {
        b.iter(|| black_box(ranker.rank("softwere", &candidates_100)));
    });
}

fn bench_primitives(c: &mut Criterion) {
    c.bench_function("expand_keywords", |b| {
        b.iter(|| black_box(expand_keywords("machine learning engineer")));
    });

    c.bench_function("edit_distance", |b| {
        b.iter(|| black_box(edit_distance("semiconductor", "semiconductr")));
    });
}

criterion_group!(benches, bench_fuzzy_ranking, bench_primitives);
criterion_main!(benches);
