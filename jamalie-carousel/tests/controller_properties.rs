//! Controller invariants under a simulated clock
//!
//! These tests drive `CarouselController` directly with hand-advanced
//! instants: index bounds under arbitrary navigation, round trips, cooldown
//! timing, progress monotonicity and the four-slide reference scenario.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use jamalie_carousel::{
    CarouselConfig, CarouselController, Cause, Direction, Swipe,
    SwipeRecognizer,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn controller(
    len: usize,
    config: &CarouselConfig,
) -> (CarouselController, Instant) {
    let t0 = Instant::now();
    let len = NonZeroUsize::new(len).expect("non-empty deck");
    (CarouselController::new(len, config, t0), t0)
}

#[test]
fn index_stays_in_bounds_for_random_navigation() {
    let mut rng = StdRng::seed_from_u64(0x5eed_ca70);
    let config = CarouselConfig::image_slider_defaults();

    for len in 1..=12 {
        let (mut c, t0) = controller(len, &config);
        let mut now = t0;
        for _ in 0..500 {
            now += ms(rng.random_range(0..1_500));
            match rng.random_range(0..5) {
                0 => {
                    c.advance(now);
                }
                1 => {
                    c.retreat(now);
                }
                2 => {
                    c.go_to(rng.random_range(0..len * 2), now);
                }
                3 => {
                    c.tick(now);
                }
                _ => {
                    c.toggle_autoplay(now);
                }
            }
            assert!(c.current_index() < len, "index escaped for len={len}");
            assert!((0.0..=1.0).contains(&c.progress()));
        }
    }
}

#[test]
fn advance_then_retreat_round_trips_from_every_index() {
    let config = CarouselConfig::default();
    for len in 1..=8 {
        for start in 0..len {
            let (mut c, t0) = controller(len, &config);
            c.go_to(start, t0);
            c.advance(t0);
            let back = c.retreat(t0);
            assert_eq!(back.to, start, "len={len} start={start}");
            assert_eq!(back.direction, Direction::Backward);
        }
    }
}

#[test]
fn manual_navigation_suspends_for_exactly_the_cooldown() {
    let (mut c, t0) = controller(4, &CarouselConfig::default());
    c.advance(t0);
    assert!(!c.is_autoplaying());

    c.tick(t0 + ms(2_999));
    assert!(!c.is_autoplaying());

    c.tick(t0 + ms(3_001));
    assert!(c.is_autoplaying());
    assert_eq!(c.current_index(), 1);
}

#[test]
fn repeated_interaction_extends_the_cooldown() {
    let (mut c, t0) = controller(4, &CarouselConfig::default());
    c.advance(t0);
    c.advance(t0 + ms(2_000));
    c.tick(t0 + ms(3_500));
    assert!(!c.is_autoplaying());
    c.tick(t0 + ms(5_000));
    assert!(c.is_autoplaying());
}

#[test]
fn progress_increases_then_resets_at_each_advance() {
    let config = CarouselConfig::progress_slider_defaults();
    let (mut c, t0) = controller(3, &config);
    let mut last = c.progress();
    let mut advances = 0;

    for step in 1..=400u64 {
        let now = t0 + ms(step * 50);
        match c.tick(now) {
            Some(change) => {
                assert_eq!(change.cause, Cause::Autoplay);
                assert_eq!(c.progress(), 0.0);
                advances += 1;
                last = 0.0;
            }
            None => {
                let p = c.progress();
                assert!(p > last, "progress stalled at step {step}");
                assert!(p < 1.0, "progress reached 1.0 without advancing");
                last = p;
            }
        }
    }
    // 20 seconds of 5 second intervals.
    assert_eq!(advances, 4);
    assert_eq!(c.current_index(), 4 % 3);
}

#[test]
fn four_slide_reference_scenario() {
    let config = CarouselConfig::progress_slider_defaults();

    // Untouched: first advance lands exactly at the interval.
    let (mut c, t0) = controller(4, &config);
    assert_eq!(c.tick(t0 + ms(4_950)), None);
    let change = c.tick(t0 + ms(5_000)).expect("autoplay advance");
    assert_eq!(change.to, 1);
    assert_eq!(c.progress(), 0.0);

    // Manual jump at 500ms.
    let (mut c, t0) = controller(4, &config);
    c.tick(t0 + ms(500));
    let change = c.go_to(3, t0 + ms(500));
    assert_eq!(change.to, 3);
    assert_eq!(change.direction, Direction::Forward);
    assert_eq!(c.progress(), 0.0);
    assert_eq!(c.resume_at(), Some(t0 + ms(3_500)));

    c.tick(t0 + ms(3_499));
    assert!(!c.is_autoplaying());
    c.tick(t0 + ms(3_500));
    assert!(c.is_autoplaying());

    // Next autoplay advance is a full interval after the resume.
    assert_eq!(c.tick(t0 + ms(8_450)), None);
    assert_eq!(c.tick(t0 + ms(8_500)).map(|ch| ch.to), Some(0));
}

#[test]
fn recognized_drags_drive_exactly_one_navigation() {
    let (mut c, t0) = controller(4, &CarouselConfig::default());
    let mut recognizer = SwipeRecognizer::new(50.0);
    let mut changes = Vec::new();

    for (from, to) in [(300.0, 240.0), (300.0, 270.0), (240.0, 300.0)] {
        recognizer.touch_start(from);
        recognizer.touch_move(to);
        if let Some(swipe) = recognizer.touch_end() {
            changes.push((swipe, c.swipe(swipe, t0)));
        }
    }

    assert_eq!(changes.len(), 2);
    assert_eq!(changes[0].0, Swipe::Advance);
    assert_eq!(changes[0].1.to, 1);
    assert_eq!(changes[1].0, Swipe::Retreat);
    assert_eq!(changes[1].1.to, 0);
}
