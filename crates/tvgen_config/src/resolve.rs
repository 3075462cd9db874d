//! Merging of command-line overrides, file configuration and defaults.

use crate::error::ConfigError;
use crate::types::{GeneratorConfig, OutputPolicy};
use std::path::PathBuf;

/// Vector file written when no path is configured.
pub const DEFAULT_OUTPUT_PATH: &str = "test_vecs.tv";

/// Random vectors generated when no count is configured.
pub const DEFAULT_VECTOR_COUNT: u32 = 1;

/// Values given on the command line. `None`/empty means "not given".
#[derive(Debug, Default)]
pub struct Overrides {
    /// `-top`
    pub top: Option<String>,
    /// `-testvec`
    pub output_path: Option<PathBuf>,
    /// `-vecNumber`
    pub vectors: Option<u32>,
    /// `--outputs`
    pub outputs: Option<OutputPolicy>,
    /// `--seed`
    pub seed: Option<u64>,
    /// `--clock`, added to the configured clock list.
    pub clocks: Vec<String>,
}

/// Fully resolved generator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Explicitly selected top module.
    pub top: Option<String>,
    /// Vector file path.
    pub output_path: PathBuf,
    /// Number of random vectors after the baseline.
    pub vectors: u32,
    /// Output column policy for random vectors.
    pub outputs: OutputPolicy,
    /// Fixed seed. `None` seeds from the wall clock.
    pub seed: Option<u64>,
    /// Clock port names.
    pub clocks: Vec<String>,
}

/// Resolves settings with precedence: `overrides` > `config` > defaults.
pub fn resolve_settings(
    config: &GeneratorConfig,
    overrides: &Overrides,
) -> Result<Settings, ConfigError> {
    let output_path = overrides
        .output_path
        .clone()
        .or_else(|| config.output.path.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH));
    if output_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "output path is empty".to_string(),
        ));
    }

    let top = overrides.top.clone().or_else(|| config.top.clone());
    if top.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(ConfigError::ValidationError(
            "top module name is empty".to_string(),
        ));
    }

    let mut clocks = config.ports.clocks.clone();
    for clock in &overrides.clocks {
        if !clocks.contains(clock) {
            clocks.push(clock.clone());
        }
    }
    if let Some(bad) = clocks.iter().find(|c| c.trim().is_empty()) {
        return Err(ConfigError::ValidationError(format!(
            "invalid clock port name '{bad}'"
        )));
    }

    Ok(Settings {
        top,
        output_path,
        vectors: overrides
            .vectors
            .or(config.output.vectors)
            .unwrap_or(DEFAULT_VECTOR_COUNT),
        outputs: overrides
            .outputs
            .or(config.output.outputs)
            .unwrap_or_default(),
        seed: overrides.seed.or(config.random.seed),
        clocks,
    })
}
