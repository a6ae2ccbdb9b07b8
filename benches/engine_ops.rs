use criterion::{black_box, criterion_group, criterion_main, Criterion};
use bowls_scorer::core::{MatchSnapshot, MatchState};
use bowls_scorer::record::MatchSummary;
use bowls_scorer::term::{Dialog, FrameBuffer, ScoreView, Screen, Viewport};
use bowls_scorer::types::{EndRecord, GameVariant, ScoreEvent, Side};

fn long_history(ends: u32) -> Vec<EndRecord> {
    (1..=ends)
        .map(|n| match n % 3 {
            0 => EndRecord::new(n, 0, 0),
            1 => EndRecord::new(n, 1, 0),
            _ => EndRecord::new(n, 0, 1),
        })
        .collect()
}

fn bench_score_end(c: &mut Criterion) {
    c.bench_function("score_and_commit_end", |b| {
        b.iter(|| {
            let mut state = MatchState::new(GameVariant::Doubles);
            for _ in 0..4 {
                state.apply(black_box(ScoreEvent::Tap(Side::Up)));
            }
            state.apply(ScoreEvent::CommitEnd);
            state
        })
    });
}

fn bench_insert_end(c: &mut Criterion) {
    let base = MatchState::from_history(GameVariant::Singles, long_history(30));

    c.bench_function("insert_end_in_30", |b| {
        b.iter(|| {
            let mut state = base.clone();
            state.apply(ScoreEvent::StartAdd(black_box(2)));
            state.apply(ScoreEvent::Tap(Side::Down));
            state.apply(ScoreEvent::SaveAdd);
            state
        })
    });
}

fn bench_snapshot_into(c: &mut Criterion) {
    let state = MatchState::from_history(GameVariant::Singles, long_history(30));
    let mut snap = MatchSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            state.snapshot_into(black_box(&mut snap));
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let snap = MatchState::from_history(GameVariant::Singles, long_history(12)).snapshot();
    let view = ScoreView::new();
    let mut fb = FrameBuffer::new(80, 24);
    let screen = Screen {
        snapshot: Some(&snap),
        dialog: Dialog::History { cursor: 3 },
        status: None,
    };

    c.bench_function("render_history_80x24", |b| {
        b.iter(|| {
            view.render_into(black_box(&screen), Viewport::new(80, 24), &mut fb);
        })
    });
}

fn bench_summary(c: &mut Criterion) {
    let mut state = MatchState::from_history(GameVariant::Singles, long_history(30));
    state.finish();
    let t = chrono::NaiveDate::from_ymd_opt(2026, 10, 15)
        .and_then(|d| d.and_hms_opt(14, 5, 0))
        .expect("valid timestamp");

    c.bench_function("render_summary_30_ends", |b| {
        b.iter(|| MatchSummary::from_match(black_box(&state), t, t).render())
    });
}

criterion_group!(
    benches,
    bench_score_end,
    bench_insert_end,
    bench_snapshot_into,
    bench_render,
    bench_summary
);
criterion_main!(benches);
