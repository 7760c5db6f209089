//! CLI argument parsing for the PTL-X simulator

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::profile::ProfileSpec;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the run summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text summary (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "ptlx")]
#[command(version)]
#[command(about = "PTL-X open-core time distortion simulator", long_about = None)]
pub struct Cli {
    /// Path to a TOML simulation config (defaults to the built-in reference run)
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Requested number of samples
    #[arg(short = 'n', long = "samples", value_name = "N")]
    pub samples: Option<usize>,

    /// Seed for the sampler
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,

    /// Output scale alpha
    #[arg(long = "alpha", value_name = "ALPHA", allow_negative_numbers = true)]
    pub alpha: Option<f64>,

    /// Sensitivity beta
    #[arg(long = "beta", value_name = "BETA", allow_negative_numbers = true)]
    pub beta: Option<f64>,

    /// Stabilization constant gamma (must be > 0)
    #[arg(long = "gamma", value_name = "GAMMA", allow_negative_numbers = true)]
    pub gamma: Option<f64>,

    /// Ignore configured profiles and sample uniformly over [0, 1)
    #[arg(long = "uniform")]
    pub uniform: bool,

    /// CSV output path
    #[arg(long = "csv", value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// PNG output path
    #[arg(long = "plot", value_name = "PATH")]
    pub plot: Option<PathBuf>,

    /// Skip rendering the PNG figure
    #[arg(long = "no-plot")]
    pub no_plot: bool,

    /// Summary format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Apply CLI overrides on top of a base configuration and validate
    pub fn apply_overrides(&self, mut config: SimulationConfig) -> Result<SimulationConfig> {
        if let Some(samples) = self.samples {
            config.samples = samples;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(alpha) = self.alpha {
            config.transform.alpha = alpha;
        }
        if let Some(beta) = self.beta {
            config.transform.beta = beta;
        }
        if let Some(gamma) = self.gamma {
            config.transform.gamma = gamma;
        }
        if self.uniform {
            config.profiles = ProfileSpec::default();
        }
        if let Some(csv) = &self.csv {
            config.output.csv_path = csv.clone();
        }
        if let Some(plot) = &self.plot {
            config.output.plot_path = plot.clone();
        }

        config.validate()?;
        Ok(config)
    }
}
