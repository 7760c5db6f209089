//! Per-profile summary statistics of time distortion
//!
//! Mean, standard deviation, min and max are SIMD-accelerated via Trueno;
//! percentiles use linear interpolation over the sorted values.

use crate::batch::ResultBatch;
use serde::{Deserialize, Serialize};

/// Summary of T′ values for one label (or for the whole batch)
///
/// T′ is narrowed from `f64` to `f32` before the Trueno reductions, so these
/// figures carry single precision even though the CSV export keeps full
/// `f64` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistortionStats {
    pub label: String,
    pub count: usize,
    /// Samples whose T′ was NaN or infinite (excluded from the moments below)
    pub non_finite: usize,
    pub mean: f32,
    pub stddev: f32,
    pub min: f32,
    pub max: f32,
    pub median: f32,
    pub p90: f32,
    pub p99: f32,
}

/// Statistics per label in first-appearance order, plus an overall row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub per_label: Vec<DistortionStats>,
    pub overall: DistortionStats,
}

/// Label used for the whole-batch row
pub const OVERALL_LABEL: &str = "All";

impl StatsSummary {
    pub fn from_batch(batch: &ResultBatch) -> Self {
        let per_label = batch
            .samples()
            .distinct_labels()
            .into_iter()
            .map(|label| DistortionStats::compute(label, &batch.time_distortion_for(label)))
            .collect();

        Self {
            per_label,
            overall: DistortionStats::compute(OVERALL_LABEL, batch.time_distortion()),
        }
    }

    pub fn get(&self, label: &str) -> Option<&DistortionStats> {
        self.per_label.iter().find(|s| s.label == label)
    }

    /// Render as an aligned text table
    pub fn to_table(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{:<24} {:>7} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9}\n",
            "profile", "count", "mean", "stddev", "min", "median", "p90", "p99", "max"
        ));
        out.push_str(&format!("{}\n", "-".repeat(24 + 8 * 10)));
        for stats in self.per_label.iter().chain(std::iter::once(&self.overall)) {
            out.push_str(&stats.table_row());
            out.push('\n');
        }
        out
    }
}

impl DistortionStats {
    /// Compute statistics for one group of T′ values
    pub fn compute(label: &str, values: &[f64]) -> Self {
        let finite: Vec<f32> = values
            .iter()
            .filter(|v| v.is_finite())
            .map(|&v| v as f32)
            .collect();
        let non_finite = values.len() - finite.len();

        if finite.is_empty() {
            return Self {
                label: label.to_string(),
                count: values.len(),
                non_finite,
                mean: 0.0,
                stddev: 0.0,
                min: 0.0,
                max: 0.0,
                median: 0.0,
                p90: 0.0,
                p99: 0.0,
            };
        }

        let v = trueno::Vector::from_slice(&finite);
        let mean = v.mean().unwrap_or(0.0);
        let stddev = v.stddev().unwrap_or(0.0);
        let min = v.min().unwrap_or(0.0);
        let max = v.max().unwrap_or(0.0);

        let mut sorted = finite;
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        Self {
            label: label.to_string(),
            count: values.len(),
            non_finite,
            mean,
            stddev,
            min,
            max,
            median: percentile(&sorted, 50.0),
            p90: percentile(&sorted, 90.0),
            p99: percentile(&sorted, 99.0),
        }
    }

    fn table_row(&self) -> String {
        format!(
            "{:<24} {:>7} {:>9.4} {:>9.4} {:>9.4} {:>9.4} {:>9.4} {:>9.4} {:>9.4}",
            self.label,
            self.count,
            self.mean,
            self.stddev,
            self.min,
            self.median,
            self.p90,
            self.p99,
            self.max
        )
    }
}

/// Calculate percentile from sorted data
fn percentile(sorted_data: &[f32], percentile: f32) -> f32 {
    if sorted_data.is_empty() {
        return 0.0;
    }
    if sorted_data.len() == 1 {
        return sorted_data[0];
    }

    let index = (percentile / 100.0) * (sorted_data.len() - 1) as f32;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted_data[lower]
    } else {
        let weight = index - lower as f32;
        sorted_data[lower] * (1.0 - weight) + sorted_data[upper] * weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::SampleBatch;

    fn result_batch(labels: &[&str], t: &[f64]) -> ResultBatch {
        let n = labels.len();
        let samples = SampleBatch::new(
            vec![0.5; n],
            vec![0.5; n],
            vec![0.5; n],
            labels.iter().map(|s| s.to_string()).collect(),
        )
        .unwrap();
        ResultBatch::new(samples, t.to_vec()).unwrap()
    }

    #[test]
    fn test_percentile_interpolates() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&data, 0.0), 1.0);
        assert_eq!(percentile(&data, 100.0), 4.0);
        assert!((percentile(&data, 50.0) - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_percentile_edge_cases() {
        assert_eq!(percentile(&[], 50.0), 0.0);
        assert_eq!(percentile(&[7.0], 99.0), 7.0);
    }

    #[test]
    fn test_compute_basic_moments() {
        let stats = DistortionStats::compute("x", &[0.2, 0.4, 0.6]);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.non_finite, 0);
        assert!((stats.mean - 0.4).abs() < 1e-6);
        assert!((stats.min - 0.2).abs() < 1e-6);
        assert!((stats.max - 0.6).abs() < 1e-6);
        assert!((stats.median - 0.4).abs() < 1e-6);
        assert!(stats.stddev > 0.0);
    }

    #[test]
    fn test_compute_skips_non_finite() {
        let stats = DistortionStats::compute("x", &[0.5, f64::NAN, f64::INFINITY]);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.non_finite, 2);
        assert!((stats.mean - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_compute_all_non_finite() {
        let stats = DistortionStats::compute("x", &[f64::NAN]);
        assert_eq!(stats.non_finite, 1);
        assert_eq!(stats.mean, 0.0);
    }

    #[test]
    fn test_summary_groups_by_label_in_order() {
        let batch = result_batch(&["b", "b", "a", "a"], &[0.1, 0.3, 0.5, 0.7]);
        let summary = StatsSummary::from_batch(&batch);

        let labels: Vec<&str> = summary.per_label.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "a"]);
        assert!((summary.get("b").unwrap().mean - 0.2).abs() < 1e-6);
        assert!((summary.get("a").unwrap().mean - 0.6).abs() < 1e-6);
        assert_eq!(summary.overall.count, 4);
        assert_eq!(summary.overall.label, OVERALL_LABEL);
    }

    #[test]
    fn test_table_contains_rows() {
        let batch = result_batch(&["Uniform", "Uniform"], &[0.1, 0.2]);
        let table = StatsSummary::from_batch(&batch).to_table();
        assert!(table.contains("profile"));
        assert!(table.contains("Uniform"));
        assert!(table.contains(OVERALL_LABEL));
    }
}
