use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading and validating a parameter file. Everything
/// here is a configuration-authoring problem; the sampling pipeline itself
/// never produces these.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read parameter file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse parameter file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("parameter `{name}`: {reason}")]
    BadSpec { name: String, reason: String },

    #[error("missing required parameter `{0}`")]
    MissingParam(String),

    #[error("missing `consts` table")]
    MissingConsts,
}

impl ConfigError {
    pub(crate) fn bad_spec(name: &str, reason: impl Into<String>) -> Self {
        ConfigError::BadSpec {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
