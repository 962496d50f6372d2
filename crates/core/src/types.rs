use thiserror::Error;

/// The main error type for Porter operations
#[derive(Debug, Error)]
pub enum PorterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown platform '{0}'")]
    UnknownPlatform(String),

    #[error("Platform '{0}' is already registered")]
    DuplicatePlatform(String),

    #[error("{platform} cannot be built on this host: {reason}")]
    Unavailable { platform: String, reason: String },

    #[error("Unknown option '{key}' for platform '{platform}'")]
    UnknownOption { platform: String, key: String },

    #[error("Option '{key}' is declared more than once by platform '{platform}'")]
    DuplicateOption { platform: String, key: String },

    #[error("Invalid value for option '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Invalid build target: {0}")]
    InvalidTarget(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for Porter operations
pub type PorterResult<T> = Result<T, PorterError>;
