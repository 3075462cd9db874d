//! Configuration errors.

/// Errors from loading or validating generator configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A value is present but unusable.
    #[error("validation error: {0}")]
    ValidationError(String),
}
