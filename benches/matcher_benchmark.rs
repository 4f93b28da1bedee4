use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wordchain_engine::{
    matching::{LongestSequenceMatcher, SequenceMatcher},
    submit_move,
};

fn bench_longest_sequence(c: &mut Criterion) {
    let matcher = LongestSequenceMatcher::new();

    c.bench_function("longest_match_short", |b| {
        b.iter(|| black_box(matcher.find(black_box("CORIANDER"), black_box("ARIA"))));
    });

    c.bench_function("longest_match_self", |b| {
        b.iter(|| black_box(matcher.find(black_box("SCUTTLING"), black_box("SCUTTLING"))));
    });

    let long_base = "ANTIDISESTABLISHMENTARIANISM";
    c.bench_function("longest_match_no_overlap_28", |b| {
        b.iter(|| black_box(matcher.find(black_box(long_base), black_box("QUQUQUQUQUQUQU"))));
    });
}

fn bench_submit_move(c: &mut Criterion) {
    let matcher = LongestSequenceMatcher::new();

    c.bench_function("submit_move_accepted", |b| {
        b.iter(|| black_box(submit_move(&matcher, "CHEWINESS", "WINES", 9, 0)))
    });

    c.bench_function("submit_move_rejected", |b| {
        b.iter(|| black_box(submit_move(&matcher, "MASTODON", "W1RD", 8, 0)))
    });
}

criterion_group!(benches, bench_longest_sequence, bench_submit_move);
criterion_main!(benches);
