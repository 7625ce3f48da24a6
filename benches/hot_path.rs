use std::collections::HashMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cricket_scorer::types::{BallSignal, ExtraKind};
use cricket_scorer::{DeliveryRequest, Match};

fn rosters() -> HashMap<String, Vec<String>> {
    let side = |prefix: &str| (1..=6).map(|i| format!("{prefix}{i}")).collect::<Vec<_>>();
    HashMap::from([
        ("Lions".to_string(), side("L")),
        ("Tigers".to_string(), side("T")),
    ])
}

/// One over's worth of mixed balls, cycled until the match ends.
fn ball_pattern() -> Vec<DeliveryRequest> {
    vec![
        DeliveryRequest::run(1),
        DeliveryRequest::run(4),
        DeliveryRequest::extra(ExtraKind::NoBall, 1),
        DeliveryRequest::run(0),
        DeliveryRequest::extra(ExtraKind::Wide, 1),
        DeliveryRequest::extra(ExtraKind::LegBye, 1),
        DeliveryRequest::run(6),
        DeliveryRequest::run(2),
    ]
}

fn score_full_match(rosters: &HashMap<String, Vec<String>>, pattern: &[DeliveryRequest]) -> Match {
    let mut m = Match::start("Lions", "Tigers", 20, rosters).unwrap();
    for req in pattern.iter().cycle() {
        if m.is_complete() {
            break;
        }
        m.submit_delivery(req).unwrap();
    }
    m
}

fn bench_delivery(c: &mut Criterion) {
    let rosters = rosters();
    let pattern = ball_pattern();

    c.bench_function("submit_delivery_single", |b| {
        b.iter_batched(
            || Match::start("Lions", "Tigers", 20, &rosters).unwrap(),
            |mut m| {
                m.submit_delivery(black_box(&pattern[1])).unwrap();
                m
            },
            criterion::BatchSize::SmallInput,
        )
    });

    c.bench_function("score_full_match_20_overs", |b| {
        b.iter(|| score_full_match(black_box(&rosters), black_box(&pattern)))
    });
}

fn bench_signal_parse(c: &mut Criterion) {
    let inputs = ["4", "W", "Wd", "N2", "LB1", "B3", "SW", "IO"];
    c.bench_function("signal_parse", |b| {
        b.iter(|| {
            for raw in &inputs {
                black_box(BallSignal::parse(black_box(raw)));
            }
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let m = score_full_match(&rosters(), &ball_pattern());
    c.bench_function("snapshot_serialize", |b| {
        b.iter(|| serde_json::to_string(black_box(&m)).unwrap())
    });
}

criterion_group!(benches, bench_delivery, bench_signal_parse, bench_snapshot);
criterion_main!(benches);
