//! Autoplay scheduling
//!
//! [`AutoplaySchedule`] is the pure arithmetic (elapsed time to progress);
//! [`AutoplayTimer`] is the tokio tick source a mounted carousel selects on.
//! The timer only holds a live `Interval` while the controller is actually
//! autoplaying; while suspended it waits for the cooldown deadline and
//! otherwise stays fully stopped.

use std::future;
use std::time::{Duration, Instant};

use tokio::time::{self, Interval, MissedTickBehavior};

/// Maps time spent on the current slide to a progress fraction.
#[derive(Debug, Clone, Copy)]
pub struct AutoplaySchedule {
    interval: Duration,
    started_at: Instant,
}

impl AutoplaySchedule {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            started_at: now,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }

    /// Fraction of the interval elapsed at `now`, clamped to `[0, 1]`.
    pub fn progress_at(&self, now: Instant) -> f32 {
        let total = self.interval.as_secs_f32();
        if total <= 0.0 {
            return 1.0;
        }
        (self.elapsed(now).as_secs_f32() / total).clamp(0.0, 1.0)
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.elapsed(now) >= self.interval
    }

    pub fn restart(&mut self, now: Instant) {
        self.started_at = now;
    }

    /// Re-anchor so that `progress_at(now) == progress`; used when autoplay
    /// resumes after a hover without discarding the time already shown.
    pub fn resume_from(&mut self, now: Instant, progress: f32) {
        let already = self.interval.mul_f32(progress.clamp(0.0, 1.0));
        self.started_at = now.checked_sub(already).unwrap_or(now);
    }
}

/// What the controller needs from the tick source right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerDemand {
    /// Autoplay is off and nothing is pending.
    Idle,
    /// Autoplaying: tick at the configured cadence.
    Ticking,
    /// Suspended: wake once when the cooldown ends.
    WakeAt(Instant),
}

/// Cancellable repeating tick source.
#[derive(Debug)]
pub struct AutoplayTimer {
    period: Duration,
    interval: Option<Interval>,
    wake_at: Option<Instant>,
}

impl AutoplayTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
            wake_at: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// No interval and no pending wake-up.
    pub fn is_stopped(&self) -> bool {
        self.interval.is_none() && self.wake_at.is_none()
    }

    pub fn is_ticking(&self) -> bool {
        self.interval.is_some()
    }

    /// Reconcile with the controller's demand. Keeps a running interval when
    /// the demand is unchanged so tick phase does not drift on every event.
    pub fn apply(&mut self, demand: TimerDemand) {
        match demand {
            TimerDemand::Idle => self.stop(),
            TimerDemand::Ticking => {
                self.wake_at = None;
                if self.interval.is_none() {
                    let start = time::Instant::now() + self.period;
                    let mut interval = time::interval_at(start, self.period);
                    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
                    self.interval = Some(interval);
                }
            }
            TimerDemand::WakeAt(at) => {
                self.interval = None;
                self.wake_at = Some(at);
            }
        }
    }

    pub fn stop(&mut self) {
        self.interval = None;
        self.wake_at = None;
    }

    /// Resolves with the firing instant. Never resolves while stopped, so it
    /// can sit in a `select!` next to the command queue.
    pub async fn fired(&mut self) -> Instant {
        if let Some(interval) = self.interval.as_mut() {
            return interval.tick().await.into_std();
        }
        if let Some(at) = self.wake_at {
            time::sleep_until(time::Instant::from_std(at)).await;
            self.wake_at = None;
            return time::Instant::now().into_std();
        }
        future::pending().await
    }
}
