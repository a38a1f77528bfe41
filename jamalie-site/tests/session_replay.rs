//! Full home page sessions on tokio's paused clock.

use std::time::Duration;

use jamalie_carousel::ViewEvent;
use jamalie_config::CarouselSettings;
use jamalie_site::Session;
use jamalie_site::session::{ScriptStep, Target};

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

#[tokio::test(start_paused = true)]
async fn default_visit_replays_to_a_known_state() {
    let report = Session::new(CarouselSettings::default(), 1280.0)
        .run(secs(12))
        .await
        .unwrap();

    // Swipe to slide 1, indicator to slide 2; the cooldowns and the
    // autoplay toggle keep autoplay from advancing any further.
    assert_eq!(report.hero.current_index, 2);
    assert_eq!(report.hero_changes, 2);
    assert!(report.hero.is_autoplaying);

    // Next, next, prev, then the last indicator clamps to the end of the
    // strip, which lands on item 2 at this width.
    assert_eq!(report.gallery_scrolls, 4);
    assert_eq!(report.gallery_strip.scroll_offset, 832.0);
    assert_eq!(report.gallery_strip.active_index, 2);
    assert!(report.gallery_strip.can_scroll_left);
    assert!(!report.gallery_strip.can_scroll_right);
    assert_eq!(report.gallery.current_index, 2);
    assert!(!report.gallery.is_autoplaying);

    assert!(report.unmounted);
}

#[tokio::test(start_paused = true)]
async fn idle_visit_autoplays_the_hero_only() {
    let report = Session::new(CarouselSettings::default(), 1280.0)
        .with_script(Vec::new())
        .run(secs(9))
        .await
        .unwrap();

    assert_eq!(report.hero.current_index, 2);
    assert_eq!(report.hero_changes, 2);
    assert_eq!(report.gallery_changes, 0);
    assert_eq!(report.gallery_scrolls, 0);
}

#[tokio::test(start_paused = true)]
async fn autoplay_switch_keeps_the_hero_still() {
    let settings = CarouselSettings::default().without_autoplay();
    let report = Session::new(settings, 1280.0)
        .with_script(Vec::new())
        .run(secs(9))
        .await
        .unwrap();

    assert_eq!(report.hero.current_index, 0);
    assert_eq!(report.hero_changes, 0);
    assert!(!report.hero.is_autoplaying);
}

#[tokio::test(start_paused = true)]
async fn compact_viewport_uses_the_narrow_stride() {
    let script = vec![
        ScriptStep::new(100, Target::Gallery, ViewEvent::NextClicked),
        ScriptStep::new(1_000, Target::Gallery, ViewEvent::NextClicked),
    ];
    let report = Session::new(CarouselSettings::default(), 375.0)
        .with_script(script)
        .run(secs(2))
        .await
        .unwrap();

    assert_eq!(report.gallery_strip.scroll_offset, 608.0);
    assert_eq!(report.gallery_strip.active_index, 2);
    assert_eq!(report.gallery_changes, 2);
    assert_eq!(report.hero_changes, 0);
}

#[tokio::test(start_paused = true)]
async fn steps_past_the_deadline_are_dropped() {
    let script =
        vec![ScriptStep::new(5_000, Target::Gallery, ViewEvent::NextClicked)];
    let report = Session::new(CarouselSettings::default(), 1280.0)
        .with_script(script)
        .run(secs(1))
        .await
        .unwrap();

    assert_eq!(report.gallery_scrolls, 0);
    assert_eq!(report.gallery_strip.scroll_offset, 0.0);
    assert!(report.unmounted);
}

#[tokio::test(start_paused = true)]
async fn resize_reaches_the_gallery_whichever_target_it_names() {
    let script = vec![
        ScriptStep::new(
            100,
            Target::Hero,
            ViewEvent::Resized { width: 375.0 },
        ),
        ScriptStep::new(500, Target::Gallery, ViewEvent::NextClicked),
    ];
    let report = Session::new(CarouselSettings::default(), 1280.0)
        .with_script(script)
        .run(secs(2))
        .await
        .unwrap();

    // One narrow stride, not the 344px one of the starting width.
    assert_eq!(report.gallery_strip.scroll_offset, 304.0);
    assert_eq!(report.gallery_strip.active_index, 1);
    assert_eq!(report.gallery_changes, 1);
    assert_eq!(report.hero_changes, 0);
}
