//! Mounted carousel instance
//!
//! Mounting spawns one task that owns the controller, the scroll tracker, the
//! dispatcher and the autoplay timer. View events and timer ticks are
//! serialised through a single `select!`, with queued events always handled
//! before a pending tick, so a manual navigation takes effect before the
//! next scheduled advance.
//!
//! On the strip variant a requested scroll is tracked until the container
//! reports the target offset. Notifications in between are the smooth
//! scroll passing over other items and do not move the current slide.
//!
//! The task, and with it the timer and every listener routed to the view,
//! lives exactly as long as the [`MountedCarousel`] handle. `unmount` shuts
//! it down gracefully; dropping the handle aborts it. Either way nothing can
//! reach the view afterwards.

use std::time::Instant;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time;

use crate::config::{CarouselConfig, ConfigError};
use crate::controller::{CarouselController, CarouselState};
use crate::deck::{SlideDeck, SlideItem};
use crate::dispatch::{CarouselCommand, Dispatcher, ViewEvent};
use crate::scroll::{ScrollRequest, ScrollTracker, ScrollViewState};
use crate::timer::AutoplayTimer;
use crate::types::{CarouselKey, Cause, Direction, SlideChange};

#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    #[error("invalid carousel configuration")]
    InvalidConfig(#[from] ConfigError),
    #[error("carousel {0} must be mounted from within a tokio runtime")]
    NoRuntime(CarouselKey),
    #[error("carousel {0} is no longer mounted")]
    Unmounted(CarouselKey),
    #[error("carousel {key} task ended abnormally")]
    Task {
        key: CarouselKey,
        #[source]
        source: tokio::task::JoinError,
    },
}

/// Outbound side: the rendering layer. Every method defaults to a no-op so
/// skins implement only what they draw.
pub trait CarouselView: Send + 'static {
    fn slide_changed(&mut self, _change: &SlideChange, _slide: &SlideItem) {}

    /// Autoplay progress of the current slide, reported on every tick.
    fn progress(&mut self, _progress: f32) {}

    fn autoplay_changed(&mut self, _autoplaying: bool) {}

    /// The strip variant wants its container scrolled.
    fn scroll_requested(&mut self, _request: ScrollRequest) {}

    /// Boundary flags or active item of the strip changed.
    fn navigation_changed(&mut self, _state: &ScrollViewState) {}

    /// Called once on graceful unmount, after the timer has stopped.
    fn unmounted(&mut self) {}
}

#[derive(Debug)]
enum Inbound {
    Event(ViewEvent),
    Shutdown,
}

/// Task-side state of a mounted carousel.
pub struct CarouselComponent {
    key: CarouselKey,
    deck: SlideDeck,
    config: CarouselConfig,
    viewport_width: f32,
    controller: CarouselController,
    tracker: Option<ScrollTracker>,
    dispatcher: Dispatcher,
    timer: AutoplayTimer,
    view: Box<dyn CarouselView>,
    state_tx: watch::Sender<CarouselState>,
    scroll_tx: watch::Sender<ScrollViewState>,
    last_published: CarouselState,
    pending_scroll: Option<PendingScroll>,
}

/// Offsets closer than this count as the same scroll position.
const ARRIVAL_TOLERANCE: f32 = 1.0;

/// A scroll the component asked for that the container has not finished.
#[derive(Debug, Clone, Copy)]
struct PendingScroll {
    target: f32,
    remaining: f32,
}

impl std::fmt::Debug for CarouselComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarouselComponent")
            .field("key", &self.key)
            .field("viewport_width", &self.viewport_width)
            .field("controller", &self.controller)
            .field("tracker", &self.tracker)
            .field("pending_scroll", &self.pending_scroll)
            .finish_non_exhaustive()
    }
}

impl CarouselComponent {
    /// Mount a carousel and start its task on the current tokio runtime.
    pub fn mount<V: CarouselView>(
        key: CarouselKey,
        deck: SlideDeck,
        config: CarouselConfig,
        view: V,
        viewport_width: f32,
    ) -> Result<MountedCarousel, ComponentError> {
        config.validate()?;
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|_| ComponentError::NoRuntime(key.clone()))?;

        let now = time::Instant::now().into_std();
        let controller = CarouselController::for_deck(&deck, &config, now);
        let tracker = config
            .strip
            .map(|layout| ScrollTracker::new(layout, deck.len()));
        let initial = controller.snapshot();
        let (state_tx, state_rx) = watch::channel(initial);
        let (scroll_tx, scroll_rx) = watch::channel(
            tracker.as_ref().map(ScrollTracker::state).unwrap_or_default(),
        );
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        let component = Self {
            key: key.clone(),
            dispatcher: Dispatcher::new(config.swipe_threshold),
            timer: AutoplayTimer::new(config.tick),
            deck,
            config,
            viewport_width,
            controller,
            tracker,
            view: Box::new(view),
            state_tx,
            scroll_tx,
            last_published: initial,
            pending_scroll: None,
        };

        log::debug!(
            "mounting carousel {key} ({} slides, autoplay={}, strip={})",
            component.deck.len(),
            component.config.autoplay,
            component.config.is_strip()
        );
        let task = runtime.spawn(component.run(inbox_rx));

        Ok(MountedCarousel {
            key,
            inbox: inbox_tx,
            state_rx,
            scroll_rx,
            task: Some(task),
        })
    }

    async fn run(mut self, mut inbox: mpsc::UnboundedReceiver<Inbound>) {
        self.timer.apply(self.controller.timer_demand());
        loop {
            tokio::select! {
                biased;
                message = inbox.recv() => match message {
                    Some(Inbound::Event(event)) => self.handle_event(event),
                    Some(Inbound::Shutdown) | None => break,
                },
                fired = self.timer.fired() => {
                    self.apply(CarouselCommand::Tick(fired));
                }
            }
            self.timer.apply(self.controller.timer_demand());
            self.publish();
        }

        self.timer.stop();
        self.view.unmounted();
        log::debug!("carousel {} unmounted", self.key);
    }

    fn handle_event(&mut self, event: ViewEvent) {
        for command in self.dispatcher.dispatch(event) {
            self.apply(command);
        }
    }

    fn apply(&mut self, command: CarouselCommand) {
        let now = time::Instant::now().into_std();
        match command {
            CarouselCommand::Advance(cause) => {
                self.navigate(Direction::Forward, cause, now)
            }
            CarouselCommand::Retreat(cause) => {
                self.navigate(Direction::Backward, cause, now)
            }
            CarouselCommand::GoTo(index) => {
                let request = self.tracker.as_ref().map(|tracker| {
                    tracker.scroll_to_index(index, self.viewport_width)
                });
                match request {
                    Some(request) => self.request_scroll(request, Some(now)),
                    None => {
                        let change = self.controller.go_to(index, now);
                        self.emit(change);
                    }
                }
            }
            CarouselCommand::ToggleAutoplay => {
                self.controller.toggle_autoplay(now);
            }
            CarouselCommand::Hold => self.controller.hold(now),
            CarouselCommand::Release => self.controller.release(now),
            CarouselCommand::Tick(at) => {
                if let Some(change) = self.controller.tick(at) {
                    let request = self.tracker.as_ref().map(|tracker| {
                        tracker.scroll_to_index(change.to, self.viewport_width)
                    });
                    if let Some(request) = request {
                        self.request_scroll(request, None);
                    }
                    self.emit(change);
                }
                if self.controller.is_autoplaying() {
                    self.view.progress(self.controller.progress());
                }
            }
            CarouselCommand::Scroll(metrics) => {
                let Some(tracker) = self.tracker.as_mut() else {
                    return;
                };
                let state = tracker.on_scroll(metrics, self.viewport_width);
                self.observe(state);
            }
            CarouselCommand::Resize(width) => {
                self.viewport_width = width;
                let Some(tracker) = self.tracker.as_mut() else {
                    return;
                };
                if let Some(metrics) = tracker.last_metrics() {
                    let state = tracker.on_scroll(metrics, width);
                    self.observe(state);
                }
            }
        }
    }

    fn navigate(&mut self, direction: Direction, cause: Cause, now: Instant) {
        if self.tracker.is_none() {
            let change = self.controller.step(direction, cause, now);
            self.emit(change);
            return;
        }

        // The strip scrolls natively under touch; only buttons drive it.
        if cause == Cause::Gesture {
            return;
        }
        let request = self.tracker.as_ref().and_then(|tracker| {
            tracker.scroll_by(direction, self.viewport_width)
        });
        match request {
            Some(request) => self.request_scroll(request, Some(now)),
            None => log::debug!(
                "carousel {}: {direction:?} disabled at strip boundary",
                self.key
            ),
        }
    }

    /// Ask the view to scroll the strip. `interaction` is set when the user
    /// asked for it, which starts the autoplay cooldown.
    fn request_scroll(
        &mut self,
        request: ScrollRequest,
        interaction: Option<Instant>,
    ) {
        if let Some(now) = interaction {
            self.controller.interact(now);
        }
        let offset = self
            .tracker
            .as_ref()
            .map_or(0.0, |tracker| tracker.state().scroll_offset);
        let remaining = (request.left - offset).abs();
        self.pending_scroll = if remaining > ARRIVAL_TOLERANCE {
            Some(PendingScroll {
                target: request.left,
                remaining,
            })
        } else {
            None
        };
        self.view.scroll_requested(request);
    }

    /// Whether `offset` is a waypoint of the scroll in flight. The scroll
    /// ends once it reaches its target or moves away from it.
    fn scrolling_towards_target(&mut self, offset: f32) -> bool {
        let Some(pending) = self.pending_scroll.as_mut() else {
            return false;
        };
        let remaining = (pending.target - offset).abs();
        if remaining > ARRIVAL_TOLERANCE && remaining <= pending.remaining {
            pending.remaining = remaining;
            return true;
        }
        self.pending_scroll = None;
        false
    }

    fn observe(&mut self, state: ScrollViewState) {
        let changed = self.scroll_tx.send_if_modified(|current| {
            if *current == state {
                false
            } else {
                *current = state;
                true
            }
        });
        if changed {
            self.view.navigation_changed(&state);
        }
        if self.scrolling_towards_target(state.scroll_offset) {
            return;
        }
        if let Some(change) = self.controller.observe_index(state.active_index)
        {
            self.emit(change);
        }
    }

    fn emit(&mut self, change: SlideChange) {
        if let Some(slide) = self.deck.get(change.to) {
            self.view.slide_changed(&change, slide);
        }
    }

    fn publish(&mut self) {
        let snapshot = self.controller.snapshot();
        if snapshot == self.last_published {
            return;
        }
        if snapshot.is_autoplaying != self.last_published.is_autoplaying {
            self.view.autoplay_changed(snapshot.is_autoplaying);
        }
        self.last_published = snapshot;
        self.state_tx.send_replace(snapshot);
    }
}

/// Handle to a mounted carousel. Dropping it tears the instance down.
#[derive(Debug)]
pub struct MountedCarousel {
    key: CarouselKey,
    inbox: mpsc::UnboundedSender<Inbound>,
    state_rx: watch::Receiver<CarouselState>,
    scroll_rx: watch::Receiver<ScrollViewState>,
    task: Option<JoinHandle<()>>,
}

impl MountedCarousel {
    pub fn key(&self) -> &CarouselKey {
        &self.key
    }

    /// Queue a view event. Events are applied in order.
    pub fn send(&self, event: ViewEvent) -> Result<(), ComponentError> {
        self.inbox
            .send(Inbound::Event(event))
            .map_err(|_| ComponentError::Unmounted(self.key.clone()))
    }

    /// Latest published controller state.
    pub fn state(&self) -> CarouselState {
        *self.state_rx.borrow()
    }

    /// Latest scroll projection; the default state for slide decks.
    pub fn scroll_state(&self) -> ScrollViewState {
        *self.scroll_rx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<CarouselState> {
        self.state_rx.clone()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop the timer, detach the view and wait for the task to finish.
    pub async fn unmount(mut self) -> Result<(), ComponentError> {
        let Some(task) = self.task.take() else {
            return Ok(());
        };
        // A closed inbox means the task is already gone; joining reports why.
        let _ = self.inbox.send(Inbound::Shutdown);
        task.await.map_err(|source| ComponentError::Task {
            key: self.key.clone(),
            source,
        })
    }
}

impl Drop for MountedCarousel {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            log::debug!(
                "carousel {} dropped while mounted; aborting",
                self.key
            );
            task.abort();
        }
    }
}
