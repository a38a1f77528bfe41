//! Shared types for the carousel crate

use std::fmt;

/// Identifies a mounted carousel instance throughout the site.
/// Strongly typed so log lines and view hosts never match on strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CarouselKey {
    /// Full-width image slider on the home page.
    HeroSlider,
    /// Slider variant with a visible autoplay progress bar.
    ProgressSlider,
    /// Horizontally scrolling gallery strip.
    Gallery,
    /// Ad-hoc instances.
    Custom(&'static str),
}

impl fmt::Display for CarouselKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarouselKey::HeroSlider => f.write_str("hero-slider"),
            CarouselKey::ProgressSlider => f.write_str("progress-slider"),
            CarouselKey::Gallery => f.write_str("gallery"),
            CarouselKey::Custom(name) => f.write_str(name),
        }
    }
}

/// Direction of the last slide transition. Skins use it to pick the
/// enter/exit animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// What triggered a slide change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cause {
    /// Arrow buttons, indicator dots or a programmatic `go_to`.
    Manual,
    /// A recognized swipe.
    Gesture,
    /// The autoplay timer reached the end of the interval.
    Autoplay,
    /// The strip's scroll container settled on a new item.
    Scroll,
}

impl Cause {
    /// Manual and gesture navigation suspend autoplay for the cooldown.
    pub fn is_interactive(self) -> bool {
        matches!(self, Cause::Manual | Cause::Gesture)
    }
}

/// A completed transition between two slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideChange {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
    pub cause: Cause,
}
