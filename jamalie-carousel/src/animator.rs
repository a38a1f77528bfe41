//! Time-based tween for hosts without native smooth scrolling

use std::time::{Duration, Instant};

pub const DEFAULT_SCROLL_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl Easing {
    /// Quadratic curves over `t` in `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    active: bool,
    from: f32,
    to: f32,
    started_at: Option<Instant>,
    duration: Duration,
    easing: Easing,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_DURATION, Easing::default())
    }
}

impl ScrollAnimator {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self {
            active: false,
            from: 0.0,
            to: 0.0,
            started_at: None,
            duration,
            easing,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    /// Begin tweening. A new start replaces any animation in flight.
    pub fn start(&mut self, from: f32, to: f32, now: Instant) {
        self.active = true;
        self.from = from;
        self.to = to;
        self.started_at = Some(now);
    }

    /// Offset at `now`, or `None` once finished. The final sample is exactly
    /// the target.
    pub fn sample(&mut self, now: Instant) -> Option<f32> {
        if !self.active {
            return None;
        }
        let started = self.started_at.unwrap_or(now);
        let elapsed = now.saturating_duration_since(started);
        if elapsed >= self.duration || self.duration.is_zero() {
            self.active = false;
            return Some(self.to);
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        Some(self.from + (self.to - self.from) * self.easing.apply(t))
    }

    pub fn cancel(&mut self) {
        self.active = false;
    }
}
