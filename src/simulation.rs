//! End-to-end simulation run
//!
//! validate → sample → transform → CSV → plot → statistics

use crate::batch::ResultBatch;
use crate::config::SimulationConfig;
use crate::csv_output::CsvOutput;
use crate::error::Result;
use crate::plot;
use crate::report::RunReport;
use crate::sampler::ProfileSampler;
use crate::stats::StatsSummary;

/// A configured simulation run
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    render_plot: bool,
}

impl Simulation {
    /// Create a run from a validated configuration
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            render_plot: true,
        })
    }

    /// Enable or disable PNG rendering (CSV is always written)
    pub fn with_plot(mut self, render_plot: bool) -> Self {
        self.render_plot = render_plot;
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Sample and transform without touching the filesystem
    pub fn compute(&self) -> Result<ResultBatch> {
        let sampler = ProfileSampler::new(self.config.seed);
        let profiles = (!self.config.is_uniform()).then_some(&self.config.profiles);

        let samples = sampler.generate(self.config.samples, profiles)?;
        tracing::info!(
            requested = self.config.samples,
            generated = samples.len(),
            profiles = self.config.profiles.len(),
            seed = self.config.seed,
            "generated synthetic samples"
        );

        self.config.transform.apply_batch(samples)
    }

    /// Run the full pipeline and write all artifacts
    pub fn run(&self) -> Result<RunReport> {
        let batch = self.compute()?;
        let output = &self.config.output;

        CsvOutput::new(&batch).write_to_path(&output.csv_path)?;

        let plot_path = if self.render_plot {
            plot::render_analysis(
                &output.plot_path,
                &batch,
                (output.plot_width, output.plot_height),
            )?;
            Some(output.plot_path.clone())
        } else {
            tracing::debug!("plot rendering disabled");
            None
        };

        let stats = StatsSummary::from_batch(&batch);

        Ok(RunReport {
            requested_samples: self.config.samples,
            generated_samples: batch.len(),
            seed: self.config.seed,
            transform: self.config.transform,
            profiles: self
                .config
                .profiles
                .names()
                .into_iter()
                .map(String::from)
                .collect(),
            csv_path: output.csv_path.clone(),
            plot_path,
            stats,
        })
    }
}
