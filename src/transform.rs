//! Open-core time distortion transform
//!
//! T′ = α · tanh( β · (M · E) / (R + γ) )
//!
//! The denominator is never clamped: `R = -γ` yields an infinite or NaN
//! argument, which tanh saturates to ±1 or propagates as NaN.

use crate::batch::{ResultBatch, SampleBatch};
use crate::error::{PtlxError, Result};
use serde::{Deserialize, Serialize};

/// Constants of the transform, fixed for the duration of a run
///
/// # Example
/// ```
/// use ptlx::transform::TransformParams;
///
/// let params = TransformParams::default();
/// let t = params.time_distortion(0.8, 0.9, 0.2);
/// assert!((t - 1.2f64.tanh()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformParams {
    /// Output scale; T′ lies in (-α, α)
    pub alpha: f64,

    /// Sensitivity applied to the M·E product
    pub beta: f64,

    /// Stabilization constant added to R (must be > 0)
    pub gamma: f64,
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 0.5,
            gamma: 0.1,
        }
    }
}

impl TransformParams {
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self { alpha, beta, gamma }
    }

    /// Validate constants: all finite, γ strictly positive
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("gamma", self.gamma),
        ] {
            if !value.is_finite() {
                return Err(PtlxError::InvalidConfig(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }

        if self.gamma <= 0.0 {
            return Err(PtlxError::InvalidConfig(format!(
                "gamma must be > 0, got {}",
                self.gamma
            )));
        }

        Ok(())
    }

    /// Evaluate the transform for a single (M, E, R) triple
    #[inline]
    pub fn time_distortion(&self, m: f64, e: f64, r: f64) -> f64 {
        self.alpha * ((self.beta * (m * e)) / (r + self.gamma)).tanh()
    }

    /// Evaluate the transform elementwise over three equal-length slices
    ///
    /// # Errors
    /// `ShapeMismatch` if the slices differ in length. Nothing is computed in
    /// that case.
    pub fn apply(&self, m: &[f64], e: &[f64], r: &[f64]) -> Result<Vec<f64>> {
        if m.len() != e.len() || m.len() != r.len() {
            return Err(PtlxError::ShapeMismatch {
                m: m.len(),
                e: e.len(),
                r: r.len(),
            });
        }

        Ok(m.iter()
            .zip(e)
            .zip(r)
            .map(|((&m, &e), &r)| self.time_distortion(m, e, r))
            .collect())
    }

    /// Transform a sample batch into a result batch
    pub fn apply_batch(&self, samples: SampleBatch) -> Result<ResultBatch> {
        let t_prime = self.apply(samples.m(), samples.e(), samples.r())?;
        tracing::debug!(
            samples = samples.len(),
            alpha = self.alpha,
            beta = self.beta,
            gamma = self.gamma,
            "applied time distortion transform"
        );
        ResultBatch::new(samples, t_prime)
    }
}
