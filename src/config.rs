//! Simulation configuration
//!
//! All run parameters (sample count, seed, transform constants, output paths
//! and profiles) live in one [`SimulationConfig`] that can be loaded from TOML.

use crate::error::{PtlxError, Result};
use crate::profile::{ProfileDefinition, ProfileSpec};
use crate::sampler::DEFAULT_SEED;
use crate::transform::TransformParams;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Embedded reference configuration (three synthetic profiles, 1000 samples)
pub const REFERENCE_TOML: &str = include_str!("../profiles-default.toml");

/// Where and how large the run's artifacts are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Tabular export path
    pub csv_path: PathBuf,

    /// PNG figure path
    pub plot_path: PathBuf,

    /// Figure width in pixels
    pub plot_width: u32,

    /// Figure height in pixels
    pub plot_height: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("PTLX_OpenCore_Simulation.csv"),
            plot_path: PathBuf::from("PTLX_OpenCore_Analysis.png"),
            plot_width: 2400,
            plot_height: 2000,
        }
    }
}

/// Complete configuration for one simulation run
///
/// # Example
/// ```
/// use ptlx::config::SimulationConfig;
///
/// let config = SimulationConfig::default();
/// assert_eq!(config.samples, 1000);
/// assert_eq!(config.seed, 42);
/// assert_eq!(config.profiles.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Requested number of samples (profiles may truncate it)
    pub samples: usize,

    /// Seed for the profile sampler
    pub seed: u64,

    /// Transform constants
    pub transform: TransformParams,

    /// Output artifact settings
    pub output: OutputConfig,

    /// Ordered profile definitions; empty means uniform sampling
    #[serde(rename = "profile")]
    pub profiles: ProfileSpec,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let profiles = vec![
            ProfileDefinition::new("Acute Flashback", (0.7, 0.9), (0.8, 1.0), (0.1, 0.3)),
            ProfileDefinition::new("Chronic Avoidance", (0.4, 0.6), (0.5, 0.7), (0.6, 0.8)),
            ProfileDefinition::new("High-Functioning", (0.2, 0.4), (0.3, 0.5), (0.7, 0.9)),
        ];

        Self {
            samples: 1000,
            seed: DEFAULT_SEED,
            transform: TransformParams::default(),
            output: OutputConfig::default(),
            profiles: ProfileSpec::new(profiles).unwrap_or_default(),
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a TOML file
    ///
    /// Missing keys fall back to their defaults; a file without `[[profile]]`
    /// tables selects uniform sampling.
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        #[derive(Deserialize, Default)]
        #[serde(default)]
        struct ConfigFile {
            samples: Option<usize>,
            seed: Option<u64>,
            transform: Option<TransformParams>,
            output: Option<OutputConfig>,
            profile: Vec<ProfileDefinition>,
        }

        let file: ConfigFile = toml::from_str(content)?;
        let defaults = Self::default();

        let config = Self {
            samples: file.samples.unwrap_or(defaults.samples),
            seed: file.seed.unwrap_or(defaults.seed),
            transform: file.transform.unwrap_or(defaults.transform),
            output: file.output.unwrap_or(defaults.output),
            profiles: ProfileSpec::new(file.profile)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse the embedded reference configuration
    pub fn reference() -> Result<Self> {
        Self::from_toml_str(REFERENCE_TOML)
    }

    /// Serialize to TOML text
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| PtlxError::InvalidConfig(e.to_string()))
    }

    /// True when no profiles are defined and sampling is uniform
    pub fn is_uniform(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Number of samples the sampler will actually emit
    pub fn effective_samples(&self) -> usize {
        if self.profiles.is_empty() {
            self.samples
        } else {
            self.profiles.samples_per_profile(self.samples) * self.profiles.len()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.samples == 0 {
            return Err(PtlxError::InvalidConfig(
                "samples must be > 0".to_string(),
            ));
        }

        if self.output.plot_width == 0 || self.output.plot_height == 0 {
            return Err(PtlxError::InvalidConfig(format!(
                "plot dimensions must be non-zero, got {}x{}",
                self.output.plot_width, self.output.plot_height
            )));
        }

        self.transform.validate()?;
        self.profiles.validate()?;

        if !self.profiles.is_empty() && self.samples < self.profiles.len() {
            tracing::warn!(
                samples = self.samples,
                profiles = self.profiles.len(),
                "fewer samples than profiles; the batch will be empty"
            );
        }

        Ok(())
    }
}
