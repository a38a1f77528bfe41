//! Headless rendering: every view callback becomes a log record.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use jamalie_carousel::{
    CarouselKey, CarouselView, ScrollRequest, ScrollViewState, SlideChange,
    SlideItem,
};
use tokio::sync::mpsc;

/// Shared tallies of what a [`LoggingView`] has drawn.
#[derive(Debug, Default)]
pub struct ViewCounters {
    slide_changes: AtomicUsize,
    scroll_requests: AtomicUsize,
    autoplay_flips: AtomicUsize,
    unmounted: AtomicUsize,
}

impl ViewCounters {
    pub fn slide_changes(&self) -> usize {
        self.slide_changes.load(Ordering::Relaxed)
    }

    pub fn scroll_requests(&self) -> usize {
        self.scroll_requests.load(Ordering::Relaxed)
    }

    pub fn autoplay_flips(&self) -> usize {
        self.autoplay_flips.load(Ordering::Relaxed)
    }

    pub fn unmounted(&self) -> bool {
        self.unmounted.load(Ordering::Relaxed) > 0
    }
}

/// Page viewport width, shared by every view on the page so a resize
/// reaches all of them at once.
#[derive(Debug, Clone)]
pub struct Viewport(Arc<AtomicU32>);

impl Viewport {
    pub fn new(width: f32) -> Self {
        Self(Arc::new(AtomicU32::new(width.to_bits())))
    }

    pub fn width(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    pub fn set_width(&self, width: f32) {
        self.0.store(width.to_bits(), Ordering::Relaxed);
    }
}

#[derive(Debug)]
pub struct LoggingView {
    key: CarouselKey,
    viewport: Viewport,
    counters: Arc<ViewCounters>,
    scroll_feed: Option<mpsc::UnboundedSender<ScrollRequest>>,
    last_progress_step: Option<u8>,
}

impl LoggingView {
    pub fn new(key: CarouselKey, viewport: Viewport) -> Self {
        Self {
            key,
            viewport,
            counters: Arc::default(),
            scroll_feed: None,
            last_progress_step: None,
        }
    }

    /// Forward scroll requests to whoever plays the scroll container.
    pub fn with_scroll_feed(
        mut self,
        feed: mpsc::UnboundedSender<ScrollRequest>,
    ) -> Self {
        self.scroll_feed = Some(feed);
        self
    }

    pub fn counters(&self) -> Arc<ViewCounters> {
        Arc::clone(&self.counters)
    }
}

impl CarouselView for LoggingView {
    fn slide_changed(&mut self, change: &SlideChange, slide: &SlideItem) {
        self.counters.slide_changes.fetch_add(1, Ordering::Relaxed);
        self.last_progress_step = None;
        log::info!(
            "[{}] {} -> {} ({:?}, {:?}): {} [{}]",
            self.key,
            change.from,
            change.to,
            change.direction,
            change.cause,
            slide.title,
            slide.image.for_viewport(self.viewport.width()),
        );
    }

    fn progress(&mut self, progress: f32) {
        // Quarter steps keep the trace readable at a 50 ms tick.
        let step = (progress * 4.0).floor().clamp(0.0, 4.0) as u8;
        if self.last_progress_step != Some(step) {
            self.last_progress_step = Some(step);
            log::trace!("[{}] progress {:.0}%", self.key, progress * 100.0);
        }
    }

    fn autoplay_changed(&mut self, autoplaying: bool) {
        self.counters.autoplay_flips.fetch_add(1, Ordering::Relaxed);
        log::debug!(
            "[{}] autoplay {}",
            self.key,
            if autoplaying { "running" } else { "paused" }
        );
    }

    fn scroll_requested(&mut self, request: ScrollRequest) {
        self.counters.scroll_requests.fetch_add(1, Ordering::Relaxed);
        log::debug!(
            "[{}] scroll to {:.0}px ({:?})",
            self.key,
            request.left,
            request.behavior
        );
        if let Some(feed) = &self.scroll_feed
            && feed.send(request).is_err()
        {
            log::warn!("[{}] scroll container is gone", self.key);
            self.scroll_feed = None;
        }
    }

    fn navigation_changed(&mut self, state: &ScrollViewState) {
        log::debug!(
            "[{}] at item {} (prev {}, next {})",
            self.key,
            state.active_index,
            if state.can_scroll_left { "on" } else { "off" },
            if state.can_scroll_right { "on" } else { "off" },
        );
    }

    fn unmounted(&mut self) {
        self.counters.unmounted.fetch_add(1, Ordering::Relaxed);
        log::debug!("[{}] view released", self.key);
    }
}
