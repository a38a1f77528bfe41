//! Slide deck model: the fixed, ordered content a carousel cycles through

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Viewport width (px) at and above which the desktop image is served.
pub const DESKTOP_MIN_WIDTH: f32 = 1200.0;
/// Viewport width (px) at and above which the tablet image is served.
pub const TABLET_MIN_WIDTH: f32 = 768.0;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("slide deck must contain at least one slide")]
    Empty,
    #[error("duplicate slide id {0}")]
    DuplicateId(SlideId),
}

/// Slide identifier. Decks declared in code use numbers; decks loaded from
/// content files may use string keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlideId {
    Number(u32),
    Key(String),
}

impl fmt::Display for SlideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlideId::Number(n) => write!(f, "{n}"),
            SlideId::Key(k) => write!(f, "{k:?}"),
        }
    }
}

impl From<u32> for SlideId {
    fn from(value: u32) -> Self {
        SlideId::Number(value)
    }
}

impl From<&str> for SlideId {
    fn from(value: &str) -> Self {
        SlideId::Key(value.to_string())
    }
}

/// Resolution variants of one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSources {
    pub mobile: String,
    pub tablet: String,
    pub desktop: String,
}

impl ImageSources {
    /// Same locator for every breakpoint.
    pub fn single(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            mobile: path.clone(),
            tablet: path.clone(),
            desktop: path,
        }
    }

    /// Pick the variant a `<picture>` element would serve at this width.
    pub fn for_viewport(&self, viewport_width: f32) -> &str {
        if viewport_width >= DESKTOP_MIN_WIDTH {
            &self.desktop
        } else if viewport_width >= TABLET_MIN_WIDTH {
            &self.tablet
        } else {
            &self.mobile
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideItem {
    pub id: SlideId,
    pub image: ImageSources,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
}

impl SlideItem {
    pub fn new(
        id: impl Into<SlideId>,
        image: ImageSources,
        title: impl Into<String>,
        subtitle: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            image,
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }
}

/// Immutable, cheaply clonable slide sequence. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideDeck {
    slides: Arc<[SlideItem]>,
}

impl SlideDeck {
    pub fn new(slides: Vec<SlideItem>) -> Result<Self, DeckError> {
        if slides.is_empty() {
            return Err(DeckError::Empty);
        }
        let mut seen = HashSet::with_capacity(slides.len());
        for slide in &slides {
            if !seen.insert(&slide.id) {
                return Err(DeckError::DuplicateId(slide.id.clone()));
            }
        }
        Ok(Self {
            slides: slides.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SlideItem> {
        self.slides.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SlideItem> {
        self.slides.iter()
    }

    /// Number of pager dots when each dot covers `per_indicator` items.
    pub fn indicator_count(&self, per_indicator: usize) -> usize {
        self.len().div_ceil(per_indicator.max(1))
    }
}
