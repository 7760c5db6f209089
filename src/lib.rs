//! PTL-X - open-core time distortion simulator
//!
//! This library evaluates the open-core PTL-X transform
//! `T' = alpha * tanh(beta * M * E / (R + gamma))` over seeded synthetic
//! samples, and exports the results as CSV, a four-panel PNG figure and a
//! per-profile statistics summary.

pub mod batch;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod error;
pub mod histogram;
pub mod plot;
pub mod profile;
pub mod report;
pub mod sampler;
pub mod simulation;
pub mod stats;
pub mod transform;

pub use batch::{ResultBatch, Sample, SampleBatch, UNIFORM_LABEL};
pub use config::SimulationConfig;
pub use error::{PtlxError, Result};
pub use profile::{ProfileDefinition, ProfileRange, ProfileSpec};
pub use sampler::ProfileSampler;
pub use simulation::Simulation;
pub use transform::TransformParams;
