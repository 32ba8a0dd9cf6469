//! Stopwatch frame benchmarks: formatting and diffing one refresh.
//!
//! A running stopwatch changes a handful of digit cells per tick, so the
//! diff should stay far below the 16ms frame budget.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;
use stopwatch::buffer::diff::{render_diff, render_full, DiffState};
use stopwatch::{format_duration, format_elapsed, AppConfig, Buffer, ManualClock, StopwatchApp};

fn format_times(c: &mut Criterion) {
    let mut group = c.benchmark_group("format");
    for seconds in [0.0, 3725.5, 3_600_000.0] {
        group.bench_with_input(BenchmarkId::new("format_elapsed", seconds), &seconds, |b, &s| {
            b.iter(|| format_elapsed(black_box(s)));
        });
    }
    group.bench_function("format_duration", |b| {
        b.iter(|| format_duration(black_box(Duration::from_millis(3_725_500))));
    });
    group.finish();
}

/// Render two consecutive frames of a running stopwatch, 10ms apart.
fn running_frames(width: u16, height: u16) -> (Buffer, Buffer) {
    let clock = ManualClock::new();
    let mut app = StopwatchApp::with_clock(AppConfig::default(), clock.clone(), width, height);
    app.handle_event(&stopwatch::InputEvent::key(stopwatch::KeyCode::Char('s')));

    clock.advance_secs(12.34);
    app.tick();
    let mut current = Buffer::new(width, height);
    app.render(&mut current);

    clock.advance_secs(0.01);
    app.tick();
    let mut next = Buffer::new(width, height);
    app.render(&mut next);
    (current, next)
}

fn diff_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff_tick");
    for (w, h) in [(80, 24), (200, 50)] {
        let (current, next) = running_frames(w, h);
        group.bench_with_input(BenchmarkId::from_parameter(format!("{w}x{h}")), &(current, next), |b, (cur, nxt)| {
            b.iter(|| {
                let mut output = Vec::with_capacity(1024);
                let mut state = DiffState::new();
                render_diff(black_box(cur), black_box(nxt), &mut output, &mut state)
            });
        });
    }
    group.finish();
}

fn full_repaint(c: &mut Criterion) {
    let (frame, _) = running_frames(200, 50);
    c.bench_function("render_full_200x50", |b| {
        b.iter(|| {
            let mut output = Vec::with_capacity(64 * 1024);
            let mut state = DiffState::new();
            render_full(black_box(&frame), &mut output, &mut state);
            output
        });
    });
}

criterion_group!(benches, format_times, diff_tick, full_repaint);
criterion_main!(benches);
