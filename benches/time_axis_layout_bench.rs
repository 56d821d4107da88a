use chrono::{TimeZone, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use timeaxis_rs::api::{TimeAxis, TimeAxisConfig, TimeAxisProps, generate_ticks};
use timeaxis_rs::core::{Grain, Point, TimeScale};
use timeaxis_rs::render::RecordingSurface;
use timeaxis_rs::text::EstimatedTextMeasurer;

fn ms(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> i64 {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
        .single()
        .expect("valid date")
        .timestamp_millis()
}

fn axis(start: i64, end: i64, dy: f64) -> TimeAxis {
    let scale = TimeScale::new((start, end), (0.0, dy)).expect("valid scale");
    TimeAxis::new(
        TimeAxisProps::new(Point::default(), scale),
        TimeAxisConfig::default(),
    )
    .expect("valid axis")
}

fn bench_second_ticks_at_cap(c: &mut Criterion) {
    let start = ms(2021, 1, 1, 0, 0, 0);
    let end = start + 499_000;

    c.bench_function("second_ticks_at_cap", |b| {
        b.iter(|| {
            let _ = generate_ticks(black_box(Grain::Second), black_box((start, end)));
        })
    });
}

fn bench_layout_three_rows(c: &mut Criterion) {
    let axis = axis(ms(2020, 12, 31, 23, 58, 30), ms(2021, 1, 1, 0, 1, 30), 1_200.0);

    c.bench_function("layout_three_rows", |b| {
        b.iter(|| {
            let _ = black_box(&axis).layout(&EstimatedTextMeasurer);
        })
    });
}

fn bench_render_two_years(c: &mut Criterion) {
    let axis = axis(ms(2020, 3, 15, 0, 0, 0), ms(2022, 3, 15, 0, 0, 0), 1_600.0);

    c.bench_function("render_two_years", |b| {
        b.iter(|| {
            let mut surface = RecordingSurface::new();
            axis.render(&mut surface, &EstimatedTextMeasurer)
                .expect("render should succeed");
            black_box(surface.commands.len());
        })
    });
}

criterion_group!(
    benches,
    bench_second_ticks_at_cap,
    bench_layout_three_rows,
    bench_render_two_years
);
criterion_main!(benches);
