use chrono::{TimeZone, Utc};
use timeaxis_rs::api::{TickGenerator, TimeAxisTimeZone, generate_ticks};
use timeaxis_rs::core::Grain;

fn ms(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> i64 {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
        .single()
        .expect("valid date")
        .timestamp_millis()
}

fn epochs(grain: Grain, domain: (i64, i64)) -> Vec<i64> {
    generate_ticks(grain, domain)
        .expect("within tick cap")
        .iter()
        .map(|tick| tick.epoch_ms)
        .collect()
}

#[test]
fn aligned_start_is_not_duplicated_at_boundary() {
    let start = ms(2021, 1, 1, 0, 0, 0);
    let end = ms(2021, 1, 1, 0, 0, 5);

    let ticks = epochs(Grain::Second, (start, end));

    assert_eq!(
        ticks,
        (0..=5).map(|s| start + s * 1_000).collect::<Vec<i64>>()
    );
}

#[test]
fn six_hundred_second_ticks_exceed_cap() {
    let start = ms(2021, 1, 1, 0, 0, 0);
    // Start tick plus 600 one-second steps.
    let end = ms(2021, 1, 1, 0, 10, 0);
    assert!(generate_ticks(Grain::Second, (start, end)).is_none());
}

#[test]
fn cap_boundary_is_exactly_five_hundred() {
    let start = ms(2021, 1, 1, 0, 0, 0);
    let at_cap = generate_ticks(Grain::Second, (start, start + 499_000)).expect("500 ticks");
    assert_eq!(at_cap.len(), 500);
    assert!(generate_ticks(Grain::Second, (start, start + 500_000)).is_none());
}

#[test]
fn unaligned_start_is_first_tick_for_every_grain() {
    let start = ms(2021, 5, 17, 13, 47, 21) + 333;
    let end = ms(2021, 8, 2, 0, 0, 0);

    for grain in [Grain::Day, Grain::Month, Grain::Year] {
        let ticks = epochs(grain, (start, end));
        assert_eq!(ticks[0], start, "{grain} must start at the domain start");
        assert!(ticks.windows(2).all(|pair| pair[0] < pair[1]));
    }
}

#[test]
fn month_walk_crosses_year_end() {
    let start = ms(2021, 11, 15, 8, 0, 0);
    let end = ms(2022, 2, 10, 0, 0, 0);

    assert_eq!(
        epochs(Grain::Month, (start, end)),
        vec![
            start,
            ms(2021, 12, 1, 0, 0, 0),
            ms(2022, 1, 1, 0, 0, 0),
            ms(2022, 2, 1, 0, 0, 0),
        ]
    );
}

#[test]
fn end_of_domain_is_inclusive() {
    let start = ms(2021, 3, 1, 10, 15, 0);
    let end = ms(2021, 3, 1, 12, 0, 0);
    assert_eq!(
        epochs(Grain::Hour, (start, end)),
        vec![start, ms(2021, 3, 1, 11, 0, 0), end]
    );
}

#[test]
fn fixed_offset_moves_hour_boundaries() {
    let generator = TickGenerator::new(TimeAxisTimeZone::FixedOffsetMinutes { minutes: 330 }, 500);
    // 00:10 UTC is 05:40 local; the next local hour starts at 00:30 UTC.
    let start = ms(2021, 3, 1, 0, 10, 0);
    let end = ms(2021, 3, 1, 1, 10, 0);

    let ticks = generator
        .generate(Grain::Hour, (start, end))
        .expect("within cap");

    let epochs: Vec<i64> = ticks.iter().map(|tick| tick.epoch_ms).collect();
    assert_eq!(epochs, vec![start, ms(2021, 3, 1, 0, 30, 0)]);
    assert_eq!(ticks[1].components.hour, 6);
}

#[test]
fn coarse_grains_stay_cheap_over_long_domains() {
    let start = ms(1900, 1, 1, 0, 0, 0);
    let end = ms(2100, 1, 1, 0, 0, 0);

    assert_eq!(epochs(Grain::Year, (start, end)).len(), 201);
    assert!(generate_ticks(Grain::Month, (start, end)).is_none());
    assert!(generate_ticks(Grain::Second, (start, end)).is_none());
}
