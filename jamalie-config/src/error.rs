use std::path::PathBuf;

use jamalie_carousel::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("failed to read carousel config {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML in carousel config {origin}")]
    Toml {
        origin: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid JSON in carousel config {origin}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(
        "failed to parse carousel config {origin}: \
         toml error: {toml}; json error: {json}"
    )]
    Unrecognized {
        origin: String,
        toml: String,
        json: String,
    },
    #[error("invalid [{section}] carousel settings")]
    Invalid {
        section: &'static str,
        #[source]
        source: ConfigError,
    },
    #[error(
        "{name} must be a boolean (1/0, true/false, yes/no, on/off), \
         got {value:?}"
    )]
    InvalidFlag { name: &'static str, value: String },
}
