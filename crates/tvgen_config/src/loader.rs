//! Configuration file loading.

use crate::error::ConfigError;
use crate::types::GeneratorConfig;
use std::path::Path;

/// Conventional configuration file name.
pub const CONFIG_FILE_NAME: &str = "tvgen.toml";

/// Loads a configuration file.
///
/// A directory path is resolved to `<dir>/tvgen.toml`.
pub fn load_config(path: &Path) -> Result<GeneratorConfig, ConfigError> {
    let file = if path.is_dir() {
        path.join(CONFIG_FILE_NAME)
    } else {
        path.to_path_buf()
    };
    let content = std::fs::read_to_string(&file)?;
    load_config_from_str(&content)
}

/// Parses configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<GeneratorConfig, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
}
