//! Configuration library for the Jamaliè carousels.
//!
//! Resolves the per-instance carousel settings from a TOML or JSON file,
//! inline JSON, or the built-in presets, validates them, and hands back
//! ready-to-mount [`jamalie_carousel::CarouselConfig`] values together with
//! where they came from.

pub mod error;
pub mod loader;
pub mod models;
pub mod util;

pub use error::ConfigLoadError;
pub use loader::{
    CONFIG_JSON_ENV, CONFIG_PATH_ENV, AUTOPLAY_ENV, SettingsLoader,
};
pub use models::{
    CarouselSettings, CarouselSettingsSource, FileCarouselSettings,
    FileGalleryConfig, FileSliderConfig,
};
