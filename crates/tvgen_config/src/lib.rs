//! Parsing of `tvgen.toml` and resolution of generator settings.
//!
//! Settings come from three layers with fixed precedence: command-line
//! overrides, then the optional configuration file, then built-in defaults.
//! [`resolve_settings`] merges them into a validated [`Settings`].

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use resolve::{resolve_settings, Overrides, Settings, DEFAULT_OUTPUT_PATH, DEFAULT_VECTOR_COUNT};
pub use types::*;
