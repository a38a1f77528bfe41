//! Headless driver for the Jamaliè home page.
//!
//! Wires the shared carousel core to the site's content: the hero slider
//! and the story gallery, the splash screen that precedes them, and a
//! logging view standing in for the rendered page.

pub mod content;
pub mod loading;
pub mod session;
pub mod view;

pub use loading::{
    DocumentHost, LoadingGate, LoadingPhase, LoadingTiming, ScrollLock,
};
pub use session::{Session, SessionError, SessionReport};
pub use view::{LoggingView, ViewCounters, Viewport};
