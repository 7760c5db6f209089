//! Sample and result batches
//!
//! A batch is stored as parallel arrays (structure of arrays). Position `i`
//! in every array refers to the same logical sample, and the constructors
//! reject arrays of unequal length.

use crate::error::{PtlxError, Result};

/// Label attached to every sample generated without profiles
pub const UNIFORM_LABEL: &str = "Uniform";

/// A single sample viewed across the parallel arrays of a batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample<'a> {
    /// Memory density
    pub m: f64,
    /// Emotional charge
    pub e: f64,
    /// Recursive intensity
    pub r: f64,
    /// Provenance tag (profile name or [`UNIFORM_LABEL`])
    pub label: &'a str,
}

/// Ordered set of samples stored as four parallel arrays
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleBatch {
    m: Vec<f64>,
    e: Vec<f64>,
    r: Vec<f64>,
    labels: Vec<String>,
}

impl SampleBatch {
    /// Build a batch from parallel arrays
    ///
    /// # Errors
    /// `ShapeMismatch` if M, E and R differ in length, `LabelMismatch` if the
    /// label array does not match them.
    pub fn new(m: Vec<f64>, e: Vec<f64>, r: Vec<f64>, labels: Vec<String>) -> Result<Self> {
        if m.len() != e.len() || m.len() != r.len() {
            return Err(PtlxError::ShapeMismatch {
                m: m.len(),
                e: e.len(),
                r: r.len(),
            });
        }
        if labels.len() != m.len() {
            return Err(PtlxError::LabelMismatch {
                expected: m.len(),
                actual: labels.len(),
            });
        }
        Ok(Self { m, e, r, labels })
    }

    pub fn len(&self) -> usize {
        self.m.len()
    }

    pub fn is_empty(&self) -> bool {
        self.m.is_empty()
    }

    pub fn m(&self) -> &[f64] {
        &self.m
    }

    pub fn e(&self) -> &[f64] {
        &self.e
    }

    pub fn r(&self) -> &[f64] {
        &self.r
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Sample at position `idx`, if in bounds
    pub fn get(&self, idx: usize) -> Option<Sample<'_>> {
        Some(Sample {
            m: *self.m.get(idx)?,
            e: self.e[idx],
            r: self.r[idx],
            label: &self.labels[idx],
        })
    }

    /// Iterate samples in batch order
    pub fn iter(&self) -> impl Iterator<Item = Sample<'_>> + '_ {
        (0..self.len()).map(move |i| Sample {
            m: self.m[i],
            e: self.e[i],
            r: self.r[i],
            label: &self.labels[i],
        })
    }

    /// Distinct labels in order of first appearance
    pub fn distinct_labels(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for label in &self.labels {
            if !seen.contains(&label.as_str()) {
                seen.push(label);
            }
        }
        seen
    }

    /// Append another batch after this one
    pub fn extend(&mut self, other: SampleBatch) {
        self.m.extend(other.m);
        self.e.extend(other.e);
        self.r.extend(other.r);
        self.labels.extend(other.labels);
    }
}

/// A sample batch together with its time distortion values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultBatch {
    samples: SampleBatch,
    time_distortion: Vec<f64>,
}

impl ResultBatch {
    /// Attach T′ values to a sample batch
    ///
    /// # Errors
    /// `ShapeMismatch` if the T′ array length differs from the batch length.
    pub fn new(samples: SampleBatch, time_distortion: Vec<f64>) -> Result<Self> {
        if time_distortion.len() != samples.len() {
            return Err(PtlxError::ShapeMismatch {
                m: samples.len(),
                e: samples.len(),
                r: time_distortion.len(),
            });
        }
        Ok(Self {
            samples,
            time_distortion,
        })
    }

    pub fn samples(&self) -> &SampleBatch {
        &self.samples
    }

    pub fn time_distortion(&self) -> &[f64] {
        &self.time_distortion
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterate (sample, T′) pairs in batch order
    pub fn rows(&self) -> impl Iterator<Item = (Sample<'_>, f64)> + '_ {
        self.samples
            .iter()
            .zip(self.time_distortion.iter().copied())
    }

    /// T′ values whose sample carries `label`
    pub fn time_distortion_for(&self, label: &str) -> Vec<f64> {
        self.rows()
            .filter(|(sample, _)| sample.label == label)
            .map(|(_, t)| t)
            .collect()
    }
}
