//! Splash screen shown before the page content.
//!
//! Page scrolling stays locked for as long as the splash is on screen. The
//! lock is a guard: completing the gate releases it, and so does dropping
//! the gate's future half way through.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

/// The document the splash sits on top of.
pub trait DocumentHost: Send + Sync {
    fn set_scroll_locked(&self, locked: bool);
}

/// Holds the page scroll lock until released or dropped.
pub struct ScrollLock {
    host: Arc<dyn DocumentHost>,
    held: bool,
}

impl std::fmt::Debug for ScrollLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollLock")
            .field("held", &self.held)
            .finish_non_exhaustive()
    }
}

impl ScrollLock {
    pub fn acquire(host: Arc<dyn DocumentHost>) -> Self {
        host.set_scroll_locked(true);
        Self { host, held: true }
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Unlock scrolling. Calling this more than once is harmless.
    pub fn release(&mut self) {
        if self.held {
            self.held = false;
            self.host.set_scroll_locked(false);
        }
    }
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.release();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingTiming {
    /// How long the splash stays fully visible.
    pub visible: Duration,
    /// Fade-out length once the splash starts hiding.
    pub fade: Duration,
}

impl Default for LoadingTiming {
    fn default() -> Self {
        Self {
            visible: Duration::from_millis(2_000),
            fade: Duration::from_millis(800),
        }
    }
}

impl LoadingTiming {
    pub fn total(&self) -> Duration {
        self.visible + self.fade
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingPhase {
    #[default]
    Visible,
    Fading,
    Done,
}

pub struct LoadingGate {
    host: Arc<dyn DocumentHost>,
    timing: LoadingTiming,
    phase: watch::Sender<LoadingPhase>,
}

impl std::fmt::Debug for LoadingGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadingGate")
            .field("timing", &self.timing)
            .field("phase", &*self.phase.borrow())
            .finish_non_exhaustive()
    }
}

impl LoadingGate {
    pub fn new(host: Arc<dyn DocumentHost>, timing: LoadingTiming) -> Self {
        Self {
            host,
            timing,
            phase: watch::Sender::new(LoadingPhase::Visible),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadingPhase> {
        self.phase.subscribe()
    }

    /// Show the splash, fade it out, then unlock scrolling.
    pub async fn run(self) {
        let mut lock = ScrollLock::acquire(Arc::clone(&self.host));
        log::debug!("loading screen visible for {:?}", self.timing.visible);

        time::sleep(self.timing.visible).await;
        self.phase.send_replace(LoadingPhase::Fading);

        time::sleep(self.timing.fade).await;
        lock.release();
        self.phase.send_replace(LoadingPhase::Done);
        log::info!("loading complete after {:?}", self.timing.total());
    }
}
