//! Hot path benchmarks: rendering island boards and clearing checkpoints.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fuwakuru_core::prelude::*;
use fuwakuru_logic::board::Island;

fn started() -> Tracker {
    let mut tracker = Tracker::in_memory();
    tracker
        .start_adventure("Yuki", Some("chara2"), Some("/images/chara2.png"))
        .unwrap();
    tracker
}

fn bench_boards(c: &mut Criterion) {
    let mut tracker = started();
    for i in 0..3 {
        tracker.clear_checkpoint("front-roll", i).unwrap();
    }
    c.bench_function("mat_island_boards", |b| {
        b.iter(|| black_box(tracker.boards(Island::Mat)))
    });
}

fn bench_clear_technique(c: &mut Criterion) {
    c.bench_function("clear_front_roll", |b| {
        b.iter_with_setup(started, |mut tracker| {
            for i in 0..3 {
                black_box(tracker.clear_checkpoint("front-roll", i).unwrap());
            }
        })
    });
}

fn bench_hud(c: &mut Criterion) {
    let tracker = started();
    c.bench_function("hud_snapshot", |b| b.iter(|| black_box(tracker.hud())));
}

criterion_group!(benches, bench_boards, bench_clear_technique, bench_hud);
criterion_main!(benches);
