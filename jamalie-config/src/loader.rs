//! Settings resolution from the environment and config files

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigLoadError;
use crate::models::{
    CarouselSettings, CarouselSettingsSource, FileCarouselSettings,
};
use crate::util::parse_bool;

/// Path to a TOML or JSON settings file.
pub const CONFIG_PATH_ENV: &str = "JAMALIE_CAROUSEL_CONFIG_PATH";
/// Inline JSON settings.
pub const CONFIG_JSON_ENV: &str = "JAMALIE_CAROUSEL_CONFIG_JSON";
/// Global autoplay switch; `off` disables autoplay for every carousel.
pub const AUTOPLAY_ENV: &str = "JAMALIE_AUTOPLAY";

const DEFAULT_CANDIDATES: &[&str] = &[
    "carousel.toml",
    "carousel.json",
    "config/carousel.toml",
    "config/carousel.json",
];

/// Resolves carousel settings.
///
/// Evaluation order:
/// 1) `$JAMALIE_CAROUSEL_CONFIG_PATH` (TOML or JSON file),
/// 2) `$JAMALIE_CAROUSEL_CONFIG_JSON` (inline JSON),
/// 3) the first default file found under the root directory,
/// 4) built-in presets.
///
/// `$JAMALIE_AUTOPLAY` is applied last, whatever the source.
pub struct SettingsLoader<'a> {
    root: PathBuf,
    env: Box<dyn Fn(&str) -> Option<String> + 'a>,
}

impl std::fmt::Debug for SettingsLoader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsLoader")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl SettingsLoader<'static> {
    /// Loader reading the process environment, rooted at the working
    /// directory.
    pub fn from_env() -> Self {
        Self {
            root: PathBuf::from("."),
            env: Box::new(|name| std::env::var(name).ok()),
        }
    }
}

impl<'a> SettingsLoader<'a> {
    /// Loader with an explicit environment lookup, for embedding and tests.
    pub fn with_env<F>(root: impl Into<PathBuf>, env: F) -> Self
    where
        F: Fn(&str) -> Option<String> + 'a,
    {
        Self {
            root: root.into(),
            env: Box::new(env),
        }
    }

    /// Directory that relative paths and default candidates resolve against.
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Resolve, validate and apply the autoplay switch.
    pub fn load(
        &self,
    ) -> Result<(CarouselSettings, CarouselSettingsSource), ConfigLoadError> {
        let (file, source) = self.resolve_file()?;
        let mut settings = CarouselSettings::from_file(&file)?;

        if let Some(raw) = self.var(AUTOPLAY_ENV) {
            match parse_bool(&raw) {
                Some(true) => {}
                Some(false) => {
                    tracing::info!("autoplay disabled via {AUTOPLAY_ENV}");
                    settings = settings.without_autoplay();
                }
                None => {
                    return Err(ConfigLoadError::InvalidFlag {
                        name: AUTOPLAY_ENV,
                        value: raw,
                    });
                }
            }
        }

        tracing::debug!(?source, "carousel settings resolved");
        Ok((settings, source))
    }

    /// Load an explicit file, bypassing the environment lookup order.
    pub fn load_path(
        &self,
        path: &Path,
    ) -> Result<(CarouselSettings, CarouselSettingsSource), ConfigLoadError> {
        let file = load_from_file(path)?;
        let settings = CarouselSettings::from_file(&file)?;
        Ok((settings, CarouselSettingsSource::File(path.to_path_buf())))
    }

    fn resolve_file(
        &self,
    ) -> Result<(FileCarouselSettings, CarouselSettingsSource), ConfigLoadError>
    {
        if let Some(path_str) = self.var(CONFIG_PATH_ENV) {
            let path = self.absolute(Path::new(&path_str));
            let file = load_from_file(&path)?;
            return Ok((file, CarouselSettingsSource::EnvPath(path)));
        }

        if let Some(raw) = self.var(CONFIG_JSON_ENV) {
            let file = serde_json::from_str(&raw).map_err(|source| {
                ConfigLoadError::Json {
                    origin: CONFIG_JSON_ENV.to_string(),
                    source,
                }
            })?;
            return Ok((file, CarouselSettingsSource::EnvInline));
        }

        if let Some(path) = self.find_default_file() {
            let file = load_from_file(&path)?;
            return Ok((file, CarouselSettingsSource::File(path)));
        }

        Ok((FileCarouselSettings::default(), CarouselSettingsSource::Default))
    }

    fn var(&self, name: &str) -> Option<String> {
        (self.env)(name).filter(|value| !value.trim().is_empty())
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn find_default_file(&self) -> Option<PathBuf> {
        DEFAULT_CANDIDATES
            .iter()
            .map(|candidate| self.root.join(candidate))
            .find(|path| path.exists())
    }
}

/// Parse a settings file, picking the format from its extension.
pub fn load_from_file(
    path: &Path,
) -> Result<FileCarouselSettings, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|source| ConfigLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let origin = path.display().to_string();

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&contents)
            .map_err(|source| ConfigLoadError::Json { origin, source }),
        Some("toml") | Some("tml") => toml::from_str(&contents)
            .map_err(|source| ConfigLoadError::Toml { origin, source }),
        _ => parse_from_str(&contents, &origin),
    }
}

/// Try TOML first, then JSON.
pub fn parse_from_str(
    contents: &str,
    origin: &str,
) -> Result<FileCarouselSettings, ConfigLoadError> {
    toml::from_str(contents).or_else(|toml_err| {
        serde_json::from_str(contents).map_err(|json_err| {
            ConfigLoadError::Unrecognized {
                origin: origin.to_string(),
                toml: toml_err.to_string(),
                json: json_err.to_string(),
            }
        })
    })
}
