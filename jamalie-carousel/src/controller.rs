//! Carousel controller: single source of truth for which slide is showing
//! and why it changed.
//!
//! The controller never reads a clock. Every operation takes the host's
//! `now`, which keeps it deterministic under a simulated clock and lets the
//! mounted component drive it from tokio's time source.
//!
//! Autoplay is on only when all three hold: the user has not switched it
//! off, no hover/touch is in progress, and no cooldown is pending. Manual
//! and gesture navigation start a cooldown; the next [`tick`] past the
//! deadline resumes autoplay.
//!
//! [`tick`]: CarouselController::tick

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use crate::config::CarouselConfig;
use crate::deck::SlideDeck;
use crate::gesture::Swipe;
use crate::timer::{AutoplaySchedule, TimerDemand};
use crate::types::{Cause, Direction, SlideChange};

/// Observable carousel state, published to views after every change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselState {
    pub current_index: usize,
    pub direction: Direction,
    pub is_autoplaying: bool,
    /// Elapsed fraction of the current autoplay interval, in `[0, 1]`.
    pub progress: f32,
}

#[derive(Debug, Clone)]
pub struct CarouselController {
    len: NonZeroUsize,
    cooldown: Duration,
    current_index: usize,
    direction: Direction,
    /// User-level switch; cleared by `toggle_autoplay` or a preset with
    /// autoplay disabled.
    enabled: bool,
    /// Hover or touch in progress.
    held: bool,
    resume_at: Option<Instant>,
    is_autoplaying: bool,
    progress: f32,
    schedule: AutoplaySchedule,
}

impl CarouselController {
    pub fn new(
        len: NonZeroUsize,
        config: &CarouselConfig,
        now: Instant,
    ) -> Self {
        Self {
            len,
            cooldown: config.cooldown,
            current_index: 0,
            direction: Direction::Forward,
            enabled: config.autoplay,
            held: false,
            resume_at: None,
            is_autoplaying: config.autoplay,
            progress: 0.0,
            schedule: AutoplaySchedule::new(config.interval, now),
        }
    }

    pub fn for_deck(
        deck: &SlideDeck,
        config: &CarouselConfig,
        now: Instant,
    ) -> Self {
        let len = NonZeroUsize::new(deck.len()).unwrap_or(NonZeroUsize::MIN);
        Self::new(len, config, now)
    }

    pub fn len(&self) -> usize {
        self.len.get()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_autoplaying(&self) -> bool {
        self.is_autoplaying
    }

    /// Whether the user-level autoplay switch is on.
    pub fn autoplay_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Deadline of the pending cooldown, if any.
    pub fn resume_at(&self) -> Option<Instant> {
        self.resume_at
    }

    pub fn snapshot(&self) -> CarouselState {
        CarouselState {
            current_index: self.current_index,
            direction: self.direction,
            is_autoplaying: self.is_autoplaying,
            progress: self.progress,
        }
    }

    /// Next slide, wrapping after the last.
    pub fn advance(&mut self, now: Instant) -> SlideChange {
        self.step(Direction::Forward, Cause::Manual, now)
    }

    /// Previous slide, wrapping before the first.
    pub fn retreat(&mut self, now: Instant) -> SlideChange {
        self.step(Direction::Backward, Cause::Manual, now)
    }

    pub fn swipe(&mut self, swipe: Swipe, now: Instant) -> SlideChange {
        let direction = match swipe {
            Swipe::Advance => Direction::Forward,
            Swipe::Retreat => Direction::Backward,
        };
        self.step(direction, Cause::Gesture, now)
    }

    /// Move one slide in `direction`. Interactive causes reset progress and
    /// start the cooldown.
    pub fn step(
        &mut self,
        direction: Direction,
        cause: Cause,
        now: Instant,
    ) -> SlideChange {
        let len = self.len.get();
        let to = match direction {
            Direction::Forward => (self.current_index + 1) % len,
            Direction::Backward => (self.current_index + len - 1) % len,
        };
        let change = self.move_to(to, direction, cause);
        if cause.is_interactive() {
            self.interact(now);
        }
        change
    }

    /// Jump to `index`. Out-of-range requests are clamped to the last slide
    /// with a warning.
    pub fn go_to(&mut self, index: usize, now: Instant) -> SlideChange {
        let last = self.len.get() - 1;
        let target = if index > last {
            log::warn!(
                "go_to({index}) out of range for {} slides; clamping to {last}",
                self.len
            );
            last
        } else {
            index
        };
        let direction = if target >= self.current_index {
            Direction::Forward
        } else {
            Direction::Backward
        };
        let change = self.move_to(target, direction, Cause::Manual);
        self.interact(now);
        change
    }

    /// Follow an index derived from the strip's scroll position. No cooldown:
    /// the scroll container, not the user, reported it.
    pub fn observe_index(&mut self, index: usize) -> Option<SlideChange> {
        let target = index.min(self.len.get() - 1);
        if target == self.current_index {
            return None;
        }
        let direction = if target > self.current_index {
            Direction::Forward
        } else {
            Direction::Backward
        };
        Some(self.move_to(target, direction, Cause::Scroll))
    }

    /// Flip the user-level autoplay switch. Turning it off clears progress
    /// and any pending cooldown; turning it on restarts from zero.
    pub fn toggle_autoplay(&mut self, now: Instant) -> bool {
        self.enabled = !self.enabled;
        self.resume_at = None;
        self.progress = 0.0;
        self.schedule.restart(now);
        self.refresh(now);
        log::debug!(
            "autoplay switched {}",
            if self.enabled { "on" } else { "off" }
        );
        self.enabled
    }

    /// Hover or touch started.
    pub fn hold(&mut self, now: Instant) {
        self.held = true;
        self.refresh(now);
    }

    /// Hover or touch ended; autoplay resumes after the cooldown.
    pub fn release(&mut self, now: Instant) {
        if !self.held {
            return;
        }
        self.held = false;
        if self.enabled {
            self.resume_at = Some(now + self.cooldown);
        }
        self.refresh(now);
    }

    /// Drive cooldown expiry and autoplay. Returns the autoplay advance when
    /// the interval completes.
    pub fn tick(&mut self, now: Instant) -> Option<SlideChange> {
        if let Some(at) = self.resume_at
            && now >= at
        {
            self.resume_at = None;
            self.refresh(now);
        }
        if !self.is_autoplaying {
            return None;
        }

        if self.schedule.is_due(now) {
            let to = (self.current_index + 1) % self.len.get();
            let change = self.move_to(to, Direction::Forward, Cause::Autoplay);
            self.schedule.restart(now);
            return Some(change);
        }
        self.progress = self.schedule.progress_at(now);
        None
    }

    /// What the tick source must do to serve the current state.
    pub fn timer_demand(&self) -> TimerDemand {
        if self.is_autoplaying {
            TimerDemand::Ticking
        } else if let Some(at) = self.resume_at {
            TimerDemand::WakeAt(at)
        } else {
            TimerDemand::Idle
        }
    }

    fn move_to(
        &mut self,
        to: usize,
        direction: Direction,
        cause: Cause,
    ) -> SlideChange {
        let from = self.current_index;
        self.current_index = to;
        self.direction = direction;
        self.progress = 0.0;
        log::debug!("slide {from} -> {to} ({direction:?}, {cause:?})");
        SlideChange {
            from,
            to,
            direction,
            cause,
        }
    }

    /// Record a user interaction that moves the carousel without changing
    /// the current slide yet, such as a strip scroll the user asked for.
    /// Resets progress and starts the cooldown.
    pub fn interact(&mut self, now: Instant) {
        self.progress = 0.0;
        self.schedule.restart(now);
        if self.enabled {
            self.resume_at = Some(now + self.cooldown);
        }
        self.refresh(now);
    }

    fn refresh(&mut self, now: Instant) {
        let was = self.is_autoplaying;
        self.is_autoplaying =
            self.enabled && !self.held && self.resume_at.is_none();
        if self.is_autoplaying && !was {
            self.schedule.resume_from(now, self.progress);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn controller(
        len: usize,
        config: CarouselConfig,
    ) -> (CarouselController, Instant) {
        let t0 = Instant::now();
        let len = NonZeroUsize::new(len).unwrap();
        (CarouselController::new(len, &config, t0), t0)
    }

    #[test]
    fn starts_at_first_slide_autoplaying() {
        let (c, _) = controller(4, CarouselConfig::image_slider_defaults());
        let s = c.snapshot();
        assert_eq!(s.current_index, 0);
        assert!(s.is_autoplaying);
        assert_eq!(s.progress, 0.0);
    }

    #[test]
    fn gallery_preset_starts_without_autoplay() {
        let (mut c, t0) = controller(6, CarouselConfig::gallery_defaults());
        assert!(!c.is_autoplaying());
        assert_eq!(c.timer_demand(), TimerDemand::Idle);
        assert_eq!(c.tick(t0 + ms(60_000)), None);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let (mut c, t0) = controller(3, CarouselConfig::default());
        assert_eq!(c.retreat(t0).to, 2);
        assert_eq!(c.direction(), Direction::Backward);
        assert_eq!(c.advance(t0).to, 0);
        assert_eq!(c.direction(), Direction::Forward);
    }

    #[test]
    fn single_slide_deck_stays_put() {
        let (mut c, t0) = controller(1, CarouselConfig::default());
        assert_eq!(c.advance(t0).to, 0);
        assert_eq!(c.retreat(t0).to, 0);
        assert_eq!(c.go_to(5, t0).to, 0);
    }

    #[test]
    fn go_to_clamps_out_of_range() {
        let (mut c, t0) = controller(4, CarouselConfig::default());
        let change = c.go_to(42, t0);
        assert_eq!(change.to, 3);
        assert_eq!(change.direction, Direction::Forward);
        assert_eq!(c.go_to(1, t0).direction, Direction::Backward);
    }

    #[test]
    fn go_to_current_index_still_counts_as_interaction() {
        let (mut c, t0) = controller(4, CarouselConfig::default());
        c.tick(t0 + ms(1_000));
        assert!(c.progress() > 0.0);
        let change = c.go_to(0, t0 + ms(1_000));
        assert_eq!(change.direction, Direction::Forward);
        assert_eq!(c.progress(), 0.0);
        assert!(!c.is_autoplaying());
    }

    #[test]
    fn toggle_off_stops_timer_and_resets_progress() {
        let (mut c, t0) = controller(4, CarouselConfig::default());
        c.tick(t0 + ms(2_000));
        assert!(!c.toggle_autoplay(t0 + ms(2_000)));
        assert_eq!(c.progress(), 0.0);
        assert_eq!(c.timer_demand(), TimerDemand::Idle);
        assert_eq!(c.tick(t0 + ms(20_000)), None);
    }

    #[test]
    fn navigation_after_toggle_off_does_not_resume() {
        let (mut c, t0) = controller(4, CarouselConfig::default());
        c.toggle_autoplay(t0);
        c.advance(t0);
        assert_eq!(c.resume_at(), None);
        c.tick(t0 + ms(10_000));
        assert!(!c.is_autoplaying());
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn toggle_on_restarts_interval() {
        let (mut c, t0) = controller(4, CarouselConfig::default());
        c.toggle_autoplay(t0);
        assert!(c.toggle_autoplay(t0 + ms(10_000)));
        assert!(c.is_autoplaying());
        assert_eq!(c.tick(t0 + ms(13_999)), None);
        assert_eq!(c.tick(t0 + ms(14_000)).map(|ch| ch.to), Some(1));
    }

    #[test]
    fn hold_pauses_and_release_resumes_after_cooldown() {
        let (mut c, t0) = controller(4, CarouselConfig::default());
        c.tick(t0 + ms(2_000));
        c.hold(t0 + ms(2_000));
        assert!(!c.is_autoplaying());
        // Hovering for a long time never advances.
        assert_eq!(c.tick(t0 + ms(30_000)), None);

        c.release(t0 + ms(30_000));
        assert_eq!(c.timer_demand(), TimerDemand::WakeAt(t0 + ms(33_000)));
        c.tick(t0 + ms(32_999));
        assert!(!c.is_autoplaying());
        c.tick(t0 + ms(33_000));
        assert!(c.is_autoplaying());
        // Half the interval was already shown before the hover.
        assert!((c.progress() - 0.5).abs() < 1e-3);
        assert_eq!(c.tick(t0 + ms(35_000)).map(|ch| ch.to), Some(1));
    }

    #[test]
    fn release_without_hold_is_ignored() {
        let (mut c, t0) = controller(4, CarouselConfig::default());
        c.release(t0);
        assert!(c.is_autoplaying());
        assert_eq!(c.resume_at(), None);
    }

    #[test]
    fn observe_index_follows_scroll_without_cooldown() {
        let (mut c, _) = controller(6, CarouselConfig::gallery_defaults());
        let change = c.observe_index(3).unwrap();
        assert_eq!(change.cause, Cause::Scroll);
        assert_eq!(change.direction, Direction::Forward);
        assert_eq!(c.observe_index(3), None);
        assert_eq!(c.observe_index(99).map(|ch| ch.to), Some(5));
        assert_eq!(c.resume_at(), None);
    }

    #[test]
    fn interact_starts_cooldown_without_moving() {
        let (mut c, t0) = controller(6, CarouselConfig::default());
        c.tick(t0 + ms(1_000));
        c.interact(t0 + ms(1_000));
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.progress(), 0.0);
        assert!(!c.is_autoplaying());
        assert_eq!(c.timer_demand(), TimerDemand::WakeAt(t0 + ms(4_000)));
        c.tick(t0 + ms(4_000));
        assert!(c.is_autoplaying());
        assert_eq!(c.tick(t0 + ms(8_000)).map(|ch| ch.to), Some(1));
    }

    #[test]
    fn swipe_maps_to_step() {
        let (mut c, t0) = controller(4, CarouselConfig::default());
        let change = c.swipe(Swipe::Retreat, t0);
        assert_eq!(change.to, 3);
        assert_eq!(change.cause, Cause::Gesture);
        assert!(!c.is_autoplaying());
    }
}
