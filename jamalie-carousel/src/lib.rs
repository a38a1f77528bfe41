//! Jamaliè carousel core
//!
//! A reusable, framework-independent carousel. One parameterized controller
//! backs every slider on the site (the hero image slider, the progress-bar
//! slider and the horizontally scrolling gallery strip); presentation skins
//! differ only in the [`CarouselConfig`] they mount with.
//!
//! The pieces are kept apart so each can be driven and tested on its own:
//! the deck (leaf data), the controller (index, direction, autoplay and
//! progress), the autoplay schedule and timer, the swipe recognizer, the
//! scroll-position tracker, and the dispatch table that turns raw view
//! events into controller commands. [`component`] wires them into a mounted
//! instance whose teardown cancels every timer and listener it acquired.

pub mod animator;
pub mod component;
pub mod config;
pub mod controller;
pub mod deck;
pub mod dispatch;
pub mod gesture;
pub mod scroll;
pub mod timer;
pub mod types;

pub use animator::{Easing, ScrollAnimator};
pub use component::{
    CarouselComponent, CarouselView, ComponentError, MountedCarousel,
};
pub use config::{
    CarouselConfig, CarouselConfigBuilder, ConfigError, StripLayout,
};
pub use controller::{CarouselController, CarouselState};
pub use deck::{DeckError, ImageSources, SlideDeck, SlideId, SlideItem};
pub use dispatch::{CarouselCommand, Dispatcher, ViewEvent};
pub use gesture::{Swipe, SwipeRecognizer};
pub use scroll::{
    ScrollBehavior, ScrollMetrics, ScrollRequest, ScrollTracker,
    ScrollViewState,
};
pub use timer::{AutoplaySchedule, AutoplayTimer};
pub use types::*;
