//! Configuration types deserialized from `tvgen.toml`.
//!
//! ```toml
//! top = "adder"
//!
//! [output]
//! path = "vectors/adder.tv"
//! vectors = 16
//! outputs = "dont-care"
//!
//! [random]
//! seed = 42
//!
//! [ports]
//! clocks = ["clk"]
//! ```

use serde::Deserialize;

/// Top-level contents of a `tvgen.toml` file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Module to generate vectors for instead of the first top module.
    #[serde(default)]
    pub top: Option<String>,
    /// Vector file settings.
    #[serde(default)]
    pub output: OutputConfig,
    /// Random source settings.
    #[serde(default)]
    pub random: RandomConfig,
    /// Port classification settings.
    #[serde(default)]
    pub ports: PortsConfig,
}

/// `[output]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Path of the vector file.
    #[serde(default)]
    pub path: Option<String>,
    /// Number of random vectors after the baseline.
    #[serde(default)]
    pub vectors: Option<u32>,
    /// What random vectors put in output columns.
    #[serde(default)]
    pub outputs: Option<OutputPolicy>,
}

/// Content of output columns in random vectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputPolicy {
    /// Random bits, like input columns.
    #[default]
    Random,
    /// `X` in every output column.
    DontCare,
}

/// `[random]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RandomConfig {
    /// Fixed seed for reproducible vectors.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// `[ports]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortsConfig {
    /// Port names to flag as clocks.
    #[serde(default)]
    pub clocks: Vec<String>,
}
