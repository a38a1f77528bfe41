use std::path::PathBuf;
use std::time::Duration;

use jamalie_carousel::{CarouselConfig, ConfigError, StripLayout};
use serde::{Deserialize, Serialize};

use crate::error::ConfigLoadError;
use crate::util::opt_duration;

/// Source that produced the carousel settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CarouselSettingsSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

/// Raw settings as written in a config file. Every field is optional and
/// overrides the matching preset value.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct FileCarouselSettings {
    #[serde(default)]
    pub hero_slider: FileSliderConfig,
    #[serde(default)]
    pub progress_slider: FileSliderConfig,
    #[serde(default)]
    pub gallery: FileGalleryConfig,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct FileSliderConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<bool>,
    #[serde(
        default,
        with = "opt_duration",
        skip_serializing_if = "Option::is_none"
    )]
    pub interval: Option<Duration>,
    #[serde(
        default,
        with = "opt_duration",
        skip_serializing_if = "Option::is_none"
    )]
    pub tick: Option<Duration>,
    #[serde(
        default,
        with = "opt_duration",
        skip_serializing_if = "Option::is_none"
    )]
    pub cooldown: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swipe_threshold: Option<f32>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct FileGalleryConfig {
    #[serde(flatten)]
    pub slider: FileSliderConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compact_stride: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wide_stride: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakpoint: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_threshold: Option<f32>,
}

impl FileSliderConfig {
    fn overlay(&self, preset: CarouselConfig) -> CarouselConfig {
        CarouselConfig {
            autoplay: self.autoplay.unwrap_or(preset.autoplay),
            interval: self.interval.unwrap_or(preset.interval),
            tick: self.tick.unwrap_or(preset.tick),
            cooldown: self.cooldown.unwrap_or(preset.cooldown),
            swipe_threshold: self
                .swipe_threshold
                .unwrap_or(preset.swipe_threshold),
            strip: preset.strip,
        }
    }
}

impl FileGalleryConfig {
    fn overlay(&self, preset: CarouselConfig) -> CarouselConfig {
        let mut config = self.slider.overlay(preset);
        let base = preset.strip.unwrap_or(StripLayout::gallery_defaults());
        config.strip = Some(StripLayout {
            compact_stride: self.compact_stride.unwrap_or(base.compact_stride),
            wide_stride: self.wide_stride.unwrap_or(base.wide_stride),
            breakpoint: self.breakpoint.unwrap_or(base.breakpoint),
            edge_threshold: self.edge_threshold.unwrap_or(base.edge_threshold),
        });
        config
    }
}

/// Validated, ready-to-mount configuration for every carousel on the site.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselSettings {
    pub hero_slider: CarouselConfig,
    pub progress_slider: CarouselConfig,
    pub gallery: CarouselConfig,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            hero_slider: CarouselConfig::image_slider_defaults(),
            progress_slider: CarouselConfig::progress_slider_defaults(),
            gallery: CarouselConfig::gallery_defaults(),
        }
    }
}

impl CarouselSettings {
    /// Layer file overrides onto the presets and validate each section.
    pub fn from_file(
        file: &FileCarouselSettings,
    ) -> Result<Self, ConfigLoadError> {
        let defaults = Self::default();
        Ok(Self {
            hero_slider: checked(
                "hero_slider",
                file.hero_slider.overlay(defaults.hero_slider),
            )?,
            progress_slider: checked(
                "progress_slider",
                file.progress_slider.overlay(defaults.progress_slider),
            )?,
            gallery: checked(
                "gallery",
                file.gallery.overlay(defaults.gallery),
            )?,
        })
    }

    /// Switch autoplay off everywhere (reduced-motion kill switch).
    pub fn without_autoplay(mut self) -> Self {
        self.hero_slider.autoplay = false;
        self.progress_slider.autoplay = false;
        self.gallery.autoplay = false;
        self
    }
}

fn checked(
    section: &'static str,
    config: CarouselConfig,
) -> Result<CarouselConfig, ConfigLoadError> {
    config
        .validate()
        .map_err(|source: ConfigError| ConfigLoadError::Invalid {
            section,
            source,
        })?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_presets() {
        let settings =
            CarouselSettings::from_file(&FileCarouselSettings::default())
                .unwrap();
        assert_eq!(settings, CarouselSettings::default());
    }

    #[test]
    fn overrides_apply_per_section() {
        let file: FileCarouselSettings = toml::from_str(
            r#"
            [hero_slider]
            interval = "6s"
            cooldown = "1500ms"

            [gallery]
            wide_stride = 360.0
            "#,
        )
        .unwrap();
        let settings = CarouselSettings::from_file(&file).unwrap();
        assert_eq!(settings.hero_slider.interval, Duration::from_secs(6));
        assert_eq!(settings.hero_slider.cooldown, Duration::from_millis(1_500));
        assert_eq!(
            settings.progress_slider,
            CarouselConfig::progress_slider_defaults()
        );
        let strip = settings.gallery.strip.unwrap();
        assert_eq!(strip.wide_stride, 360.0);
        assert_eq!(strip.compact_stride, 304.0);
    }

    #[test]
    fn invalid_section_is_named() {
        let file: FileCarouselSettings = toml::from_str(
            r#"
            [progress_slider]
            interval = "20ms"
            "#,
        )
        .unwrap();
        let err = CarouselSettings::from_file(&file).unwrap_err();
        assert!(matches!(
            err,
            ConfigLoadError::Invalid {
                section: "progress_slider",
                source: ConfigError::TickExceedsInterval { .. }
            }
        ));
    }

    #[test]
    fn bad_duration_is_rejected() {
        let parsed: Result<FileCarouselSettings, _> = toml::from_str(
            r#"
            [hero_slider]
            interval = "soon"
            "#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn without_autoplay_clears_every_section() {
        let settings = CarouselSettings::default().without_autoplay();
        assert!(!settings.hero_slider.autoplay);
        assert!(!settings.progress_slider.autoplay);
    }
}
