use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vitrine_search::{validate, Attribute, CandidateFilters, DomainValues, SimilaritySuggester};

fn colour_vocabulary() -> Vec<String> {
    (0..400).map(|i| format!("Colour {i:03}")).chain(
        ["Green", "Sea Green", "Lime Green", "Olive", "Grey"]
            .iter()
            .map(|s| s.to_string()),
    )
    .collect()
}

fn bench_suggest(c: &mut Criterion) {
    let legal = colour_vocabulary();
    let suggester = SimilaritySuggester::seeded(17);

    c.bench_function("suggest_near_match", |b| {
        b.iter(|| suggester.suggest(black_box(&legal), black_box("Green"), 3))
    });

    c.bench_function("suggest_random_fallback", |b| {
        b.iter(|| suggester.suggest(black_box(&legal), black_box("Purple"), 3))
    });
}

fn bench_validate(c: &mut Criterion) {
    let values = DomainValues::builtin().with(Attribute::BaseColour, colour_vocabulary());
    let candidates: CandidateFilters = [
        ("gender", "Men"),
        ("basecolour", "Olive"),
        ("subcategory", "Gloves"),
        ("year", "2012"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    c.bench_function("validate_filters", |b| {
        b.iter(|| validate(black_box(&candidates), black_box(&values)))
    });
}

criterion_group!(benches, bench_suggest, bench_validate);
criterion_main!(benches);
