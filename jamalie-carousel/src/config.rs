//! Configuration for a carousel instance
//!
//! One configuration object replaces the per-skin copies of the slider and
//! gallery logic. Presets cover the three skins used on the site; anything
//! else goes through [`CarouselConfig::builder`], which validates.

use std::time::Duration;

/// Default autoplay tick cadence.
pub const DEFAULT_TICK: Duration = Duration::from_millis(50);
/// Default suspension after a manual navigation.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(3_000);
/// Minimum horizontal drag (px) recognized as a swipe.
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 50.0;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("autoplay interval must be greater than zero")]
    ZeroInterval,
    #[error("autoplay tick must be greater than zero")]
    ZeroTick,
    #[error("autoplay tick {tick:?} is longer than the interval {interval:?}")]
    TickExceedsInterval { tick: Duration, interval: Duration },
    #[error("swipe threshold must be a positive number of pixels, got {0}")]
    InvalidSwipeThreshold(f32),
    #[error("{field} must be a positive number of pixels, got {value}")]
    InvalidStride { field: &'static str, value: f32 },
    #[error("edge threshold must be zero or more pixels, got {0}")]
    InvalidEdgeThreshold(f32),
}

/// Geometry of the horizontally scrolling strip variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripLayout {
    /// Item width plus gap below `breakpoint`.
    pub compact_stride: f32,
    /// Item width plus gap at and above `breakpoint`.
    pub wide_stride: f32,
    /// Viewport width (px) separating the two strides.
    pub breakpoint: f32,
    /// Slack (px) absorbing sub-pixel rounding at either edge.
    pub edge_threshold: f32,
}

impl StripLayout {
    /// Gallery cards: 288px + 16px gap on small screens, 320px + 24px gap
    /// from the `md` breakpoint up.
    pub const fn gallery_defaults() -> Self {
        Self {
            compact_stride: 304.0,
            wide_stride: 344.0,
            breakpoint: 768.0,
            edge_threshold: 10.0,
        }
    }

    pub fn stride_for(&self, viewport_width: f32) -> f32 {
        if viewport_width < self.breakpoint {
            self.compact_stride
        } else {
            self.wide_stride
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselConfig {
    /// Whether autoplay is on when the carousel mounts.
    pub autoplay: bool,
    /// Time a slide stays up before autoplay advances.
    pub interval: Duration,
    /// Cadence of the autoplay timer.
    pub tick: Duration,
    /// Suspension window after manual navigation or hover/touch end.
    pub cooldown: Duration,
    /// Minimum drag distance for a swipe, in px.
    pub swipe_threshold: f32,
    /// Present for the scroll-strip variant, absent for slide decks.
    pub strip: Option<StripLayout>,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self::image_slider_defaults()
    }
}

impl CarouselConfig {
    /// Full-width hero slider: crossfade every four seconds.
    pub const fn image_slider_defaults() -> Self {
        Self {
            autoplay: true,
            interval: Duration::from_millis(4_000),
            tick: DEFAULT_TICK,
            cooldown: DEFAULT_COOLDOWN,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            strip: None,
        }
    }

    /// Slider with a visible progress bar; slower so the bar reads.
    pub const fn progress_slider_defaults() -> Self {
        Self {
            interval: Duration::from_millis(5_000),
            ..Self::image_slider_defaults()
        }
    }

    /// Scroll-strip gallery, user driven only.
    pub const fn gallery_defaults() -> Self {
        Self {
            autoplay: false,
            interval: Duration::from_millis(5_000),
            tick: DEFAULT_TICK,
            cooldown: DEFAULT_COOLDOWN,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            strip: Some(StripLayout::gallery_defaults()),
        }
    }

    pub fn builder() -> CarouselConfigBuilder {
        CarouselConfigBuilder::new(Self::image_slider_defaults())
    }

    /// Start a builder from this configuration, e.g. to override one preset
    /// field.
    pub fn to_builder(self) -> CarouselConfigBuilder {
        CarouselConfigBuilder::new(self)
    }

    pub fn is_strip(&self) -> bool {
        self.strip.is_some()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        if self.tick.is_zero() {
            return Err(ConfigError::ZeroTick);
        }
        if self.tick > self.interval {
            return Err(ConfigError::TickExceedsInterval {
                tick: self.tick,
                interval: self.interval,
            });
        }
        if !self.swipe_threshold.is_finite() || self.swipe_threshold <= 0.0 {
            return Err(ConfigError::InvalidSwipeThreshold(
                self.swipe_threshold,
            ));
        }
        if let Some(strip) = self.strip {
            for (field, value) in [
                ("compact_stride", strip.compact_stride),
                ("wide_stride", strip.wide_stride),
                ("breakpoint", strip.breakpoint),
            ] {
                if !value.is_finite() || value <= 0.0 {
                    return Err(ConfigError::InvalidStride { field, value });
                }
            }
            if !strip.edge_threshold.is_finite() || strip.edge_threshold < 0.0
            {
                return Err(ConfigError::InvalidEdgeThreshold(
                    strip.edge_threshold,
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CarouselConfigBuilder {
    config: CarouselConfig,
}

impl CarouselConfigBuilder {
    fn new(config: CarouselConfig) -> Self {
        Self { config }
    }

    pub fn autoplay(mut self, enabled: bool) -> Self {
        self.config.autoplay = enabled;
        self
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.config.interval = interval;
        self
    }

    pub fn tick(mut self, tick: Duration) -> Self {
        self.config.tick = tick;
        self
    }

    pub fn cooldown(mut self, cooldown: Duration) -> Self {
        self.config.cooldown = cooldown;
        self
    }

    pub fn swipe_threshold(mut self, px: f32) -> Self {
        self.config.swipe_threshold = px;
        self
    }

    pub fn strip(mut self, layout: StripLayout) -> Self {
        self.config.strip = Some(layout);
        self
    }

    pub fn no_strip(mut self) -> Self {
        self.config.strip = None;
        self
    }

    pub fn build(self) -> Result<CarouselConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
