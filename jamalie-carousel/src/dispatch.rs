//! Event-to-command table
//!
//! Presentation layers report raw input as [`ViewEvent`]s. The dispatcher
//! maps each one to zero or more [`CarouselCommand`]s, running touch input
//! through the swipe recognizer on the way, so the controller never sees a
//! framework callback.

use std::time::Instant;

use crate::gesture::{Swipe, SwipeRecognizer};
use crate::scroll::ScrollMetrics;
use crate::types::Cause;

/// Raw input from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewEvent {
    PointerEnter,
    PointerLeave,
    TouchStart { x: f32 },
    TouchMove { x: f32 },
    TouchEnd,
    TouchCancel,
    PrevClicked,
    NextClicked,
    IndicatorClicked(usize),
    AutoplayToggled,
    Scrolled(ScrollMetrics),
    Resized { width: f32 },
}

/// Instruction the mounted component applies to its controller and tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselCommand {
    Advance(Cause),
    Retreat(Cause),
    GoTo(usize),
    ToggleAutoplay,
    Hold,
    Release,
    Tick(Instant),
    Scroll(ScrollMetrics),
    Resize(f32),
}

#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    swipe: SwipeRecognizer,
}

impl Dispatcher {
    pub fn new(swipe_threshold: f32) -> Self {
        Self {
            swipe: SwipeRecognizer::new(swipe_threshold),
        }
    }

    pub fn recognizer(&self) -> &SwipeRecognizer {
        &self.swipe
    }

    pub fn dispatch(&mut self, event: ViewEvent) -> Vec<CarouselCommand> {
        use CarouselCommand as C;

        match event {
            ViewEvent::PointerEnter => vec![C::Hold],
            ViewEvent::PointerLeave => vec![C::Release],
            ViewEvent::TouchStart { x } => {
                self.swipe.touch_start(x);
                vec![C::Hold]
            }
            ViewEvent::TouchMove { x } => {
                self.swipe.touch_move(x);
                Vec::new()
            }
            ViewEvent::TouchEnd => match self.swipe.touch_end() {
                Some(Swipe::Advance) => {
                    vec![C::Advance(Cause::Gesture), C::Release]
                }
                Some(Swipe::Retreat) => {
                    vec![C::Retreat(Cause::Gesture), C::Release]
                }
                None => vec![C::Release],
            },
            ViewEvent::TouchCancel => {
                self.swipe.cancel();
                vec![C::Release]
            }
            ViewEvent::PrevClicked => vec![C::Retreat(Cause::Manual)],
            ViewEvent::NextClicked => vec![C::Advance(Cause::Manual)],
            ViewEvent::IndicatorClicked(index) => vec![C::GoTo(index)],
            ViewEvent::AutoplayToggled => vec![C::ToggleAutoplay],
            ViewEvent::Scrolled(metrics) => vec![C::Scroll(metrics)],
            ViewEvent::Resized { width } => vec![C::Resize(width)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CarouselCommand as C;

    #[test]
    fn touch_sequence_becomes_swipe_then_release() {
        let mut d = Dispatcher::new(50.0);
        assert_eq!(
            d.dispatch(ViewEvent::TouchStart { x: 300.0 }),
            vec![C::Hold]
        );
        assert!(d.dispatch(ViewEvent::TouchMove { x: 240.0 }).is_empty());
        assert_eq!(
            d.dispatch(ViewEvent::TouchEnd),
            vec![C::Advance(Cause::Gesture), C::Release]
        );
    }

    #[test]
    fn short_touch_only_releases() {
        let mut d = Dispatcher::new(50.0);
        d.dispatch(ViewEvent::TouchStart { x: 300.0 });
        d.dispatch(ViewEvent::TouchMove { x: 330.0 });
        assert_eq!(d.dispatch(ViewEvent::TouchEnd), vec![C::Release]);
    }

    #[test]
    fn cancelled_touch_never_swipes() {
        let mut d = Dispatcher::new(50.0);
        d.dispatch(ViewEvent::TouchStart { x: 0.0 });
        d.dispatch(ViewEvent::TouchMove { x: 400.0 });
        assert_eq!(d.dispatch(ViewEvent::TouchCancel), vec![C::Release]);
        assert_eq!(d.dispatch(ViewEvent::TouchEnd), vec![C::Release]);
        assert!(!d.recognizer().is_tracking());
    }

    #[test]
    fn buttons_map_to_manual_navigation() {
        let mut d = Dispatcher::default();
        assert_eq!(
            d.dispatch(ViewEvent::NextClicked),
            vec![C::Advance(Cause::Manual)]
        );
        assert_eq!(
            d.dispatch(ViewEvent::PrevClicked),
            vec![C::Retreat(Cause::Manual)]
        );
        assert_eq!(
            d.dispatch(ViewEvent::IndicatorClicked(2)),
            vec![C::GoTo(2)]
        );
        assert_eq!(d.dispatch(ViewEvent::PointerEnter), vec![C::Hold]);
        assert_eq!(d.dispatch(ViewEvent::PointerLeave), vec![C::Release]);
    }
}
