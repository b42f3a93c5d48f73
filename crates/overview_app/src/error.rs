use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading or writing a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Failures while turning a configuration into a live scene.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("entity name `{0}` is used more than once")]
    DuplicateName(String),
    #[error("{behavior} on `{entity}` targets unknown entity `{target}`")]
    UnknownEntity {
        behavior: &'static str,
        entity: String,
        target: String,
    },
    #[error("{behavior} on `{entity}`: {reason}")]
    InvalidConfig {
        behavior: &'static str,
        entity: String,
        reason: String,
    },
}

/// Top-level error of the application layer.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error("logger already initialised: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}
