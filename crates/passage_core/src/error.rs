//! Error types for passage_core

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the navigation API
#[derive(Error, Debug)]
pub enum RouterError {
    /// The navigation API was used where no router has been provided
    #[error(
        "no router provided for screen type `{screen_type}`; wrap the caller in RouterContext::provide"
    )]
    NotProvided { screen_type: &'static str },

    /// Navigation was attempted while the router was already borrowed by a
    /// layout pass or an observer callback
    #[error("router is busy: navigation cannot run from layout or stack observers")]
    Reentrant,

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors loading or validating a [`RouterConfig`](crate::RouterConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Result type for passage_core operations
pub type Result<T> = std::result::Result<T, RouterError>;
