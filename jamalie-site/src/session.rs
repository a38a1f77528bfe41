//! Scripted visit to the home page.
//!
//! Mounts the hero slider and the story gallery, replays a timeline of
//! visitor input against them, and plays the part of the browser's scroll
//! container for the gallery: smooth scroll requests are tweened frame by
//! frame and fed back as scroll notifications.

use std::time::Duration;

use jamalie_carousel::{
    CarouselComponent, CarouselKey, CarouselState, ComponentError, DeckError,
    MountedCarousel, ScrollAnimator, ScrollBehavior, ScrollMetrics,
    ScrollViewState, StripLayout, ViewEvent,
};
use jamalie_config::CarouselSettings;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::content::{self, GALLERY_ITEMS, GALLERY_PADDING};
use crate::view::{LoggingView, Viewport};

/// Roughly one display refresh.
pub const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Component(#[from] ComponentError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Hero,
    Gallery,
}

/// One input in a visit. [`ViewEvent::Resized`] is a page event: it
/// resizes both carousels whichever target it names.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptStep {
    /// Offset from the moment the carousels mount.
    pub at: Duration,
    pub target: Target,
    pub event: ViewEvent,
}

impl ScriptStep {
    pub fn new(at_ms: u64, target: Target, event: ViewEvent) -> Self {
        Self {
            at: Duration::from_millis(at_ms),
            target,
            event,
        }
    }
}

/// A visitor hovering, swiping and clicking through both carousels.
pub fn default_script() -> Vec<ScriptStep> {
    use Target::{Gallery, Hero};
    vec![
        ScriptStep::new(1_200, Hero, ViewEvent::PointerEnter),
        ScriptStep::new(2_400, Hero, ViewEvent::PointerLeave),
        ScriptStep::new(3_000, Gallery, ViewEvent::NextClicked),
        ScriptStep::new(4_000, Hero, ViewEvent::TouchStart { x: 320.0 }),
        ScriptStep::new(4_120, Hero, ViewEvent::TouchMove { x: 250.0 }),
        ScriptStep::new(4_200, Hero, ViewEvent::TouchEnd),
        ScriptStep::new(5_500, Gallery, ViewEvent::NextClicked),
        ScriptStep::new(6_500, Gallery, ViewEvent::PrevClicked),
        ScriptStep::new(7_500, Hero, ViewEvent::IndicatorClicked(2)),
        ScriptStep::new(9_000, Gallery, ViewEvent::IndicatorClicked(5)),
        ScriptStep::new(10_500, Hero, ViewEvent::AutoplayToggled),
        ScriptStep::new(11_000, Hero, ViewEvent::AutoplayToggled),
    ]
}

/// Final state of both carousels once the session has unmounted them.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub hero: CarouselState,
    pub gallery: CarouselState,
    pub gallery_strip: ScrollViewState,
    pub hero_changes: usize,
    pub gallery_changes: usize,
    pub gallery_scrolls: usize,
    pub unmounted: bool,
}

#[derive(Debug)]
pub struct Session {
    settings: CarouselSettings,
    viewport_width: f32,
    script: Vec<ScriptStep>,
}

impl Session {
    pub fn new(settings: CarouselSettings, viewport_width: f32) -> Self {
        Self {
            settings,
            viewport_width,
            script: default_script(),
        }
    }

    pub fn with_script(mut self, script: Vec<ScriptStep>) -> Self {
        self.script = script;
        self
    }

    /// Play the script for `run_for`, then unmount both carousels.
    pub async fn run(
        self,
        run_for: Duration,
    ) -> Result<SessionReport, SessionError> {
        let Self {
            settings,
            mut viewport_width,
            mut script,
        } = self;
        script.sort_by_key(|step| step.at);
        let layout = settings
            .gallery
            .strip
            .unwrap_or_else(StripLayout::gallery_defaults);

        let viewport = Viewport::new(viewport_width);
        let hero_view =
            LoggingView::new(CarouselKey::HeroSlider, viewport.clone());
        let hero_counters = hero_view.counters();
        let hero = CarouselComponent::mount(
            CarouselKey::HeroSlider,
            content::hero_deck()?,
            settings.hero_slider,
            hero_view,
            viewport_width,
        )?;

        let (scroll_tx, mut scroll_rx) = mpsc::unbounded_channel();
        let gallery_view =
            LoggingView::new(CarouselKey::Gallery, viewport.clone())
                .with_scroll_feed(scroll_tx);
        let gallery_counters = gallery_view.counters();
        let gallery = CarouselComponent::mount(
            CarouselKey::Gallery,
            content::gallery_deck()?,
            settings.gallery,
            gallery_view,
            viewport_width,
        )?;

        let start = Instant::now();
        let deadline = start + run_for;
        let mut offset = 0.0;
        gallery.send(ViewEvent::Scrolled(gallery_metrics(
            &layout,
            viewport_width,
            offset,
        )))?;

        let mut animator = ScrollAnimator::default();
        let mut frames = time::interval(FRAME);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut steps = script
            .into_iter()
            .filter(|step| step.at < run_for)
            .peekable();

        loop {
            let next_step = steps.peek().map(|step| start + step.at);
            tokio::select! {
                biased;
                _ = time::sleep_until(deadline) => break,
                Some(request) = scroll_rx.recv() => match request.behavior {
                    ScrollBehavior::Smooth => {
                        let now = Instant::now().into_std();
                        animator.start(offset, request.left, now);
                    }
                    ScrollBehavior::Instant => {
                        animator.cancel();
                        offset = request.left;
                        gallery.send(ViewEvent::Scrolled(gallery_metrics(
                            &layout,
                            viewport_width,
                            offset,
                        )))?;
                    }
                },
                _ = frames.tick(), if animator.is_active() => {
                    let now = Instant::now().into_std();
                    if let Some(next) = animator.sample(now) {
                        offset = next;
                        gallery.send(ViewEvent::Scrolled(gallery_metrics(
                            &layout,
                            viewport_width,
                            offset,
                        )))?;
                    }
                }
                _ = sleep_until_opt(next_step) => {
                    let Some(step) = steps.next() else { continue };
                    log::debug!(
                        "script +{:?}: {:?} <- {:?}",
                        step.at,
                        step.target,
                        step.event
                    );
                    match (step.target, step.event) {
                        (_, ViewEvent::Resized { width }) => {
                            viewport_width = width;
                            viewport.set_width(width);
                            hero.send(step.event)?;
                            gallery.send(step.event)?;
                            let metrics =
                                gallery_metrics(&layout, width, offset);
                            offset = offset.min(metrics.max_scroll());
                            gallery.send(ViewEvent::Scrolled(ScrollMetrics {
                                scroll_left: offset,
                                ..metrics
                            }))?;
                        }
                        (Target::Hero, event) => hero.send(event)?,
                        (Target::Gallery, event) => gallery.send(event)?,
                    }
                }
            }
        }

        let hero_state = hero.state();
        let gallery_state = gallery.state();
        let gallery_strip = gallery.scroll_state();
        unmount_all([hero, gallery]).await?;

        let report = SessionReport {
            hero: hero_state,
            gallery: gallery_state,
            gallery_strip,
            hero_changes: hero_counters.slide_changes(),
            gallery_changes: gallery_counters.slide_changes(),
            gallery_scrolls: gallery_counters.scroll_requests(),
            unmounted: hero_counters.unmounted()
                && gallery_counters.unmounted(),
        };
        log::info!(
            "session over: hero on slide {} after {} changes, \
             gallery on item {} after {} scrolls",
            report.hero.current_index,
            report.hero_changes,
            report.gallery_strip.active_index,
            report.gallery_scrolls
        );
        Ok(report)
    }
}

/// Scroll container geometry of the gallery at a given viewport width.
pub fn gallery_metrics(
    layout: &StripLayout,
    viewport_width: f32,
    scroll_left: f32,
) -> ScrollMetrics {
    let stride = layout.stride_for(viewport_width);
    ScrollMetrics {
        scroll_left,
        scroll_width: stride * GALLERY_ITEMS as f32 + GALLERY_PADDING * 2.0,
        client_width: viewport_width,
    }
}

async fn unmount_all(
    carousels: [MountedCarousel; 2],
) -> Result<(), ComponentError> {
    for carousel in carousels {
        carousel.unmount().await?;
    }
    Ok(())
}

async fn sleep_until_opt(at: Option<Instant>) {
    match at {
        Some(at) => time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}
