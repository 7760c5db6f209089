//! Equal-width histogram binning grouped by label
//!
//! All groups share one bin layout spanning the finite min..max of the whole
//! input so their bars line up when overlaid.

/// Default bin count for the distribution panel
pub const DEFAULT_BINS: usize = 30;

/// Bin counts for one label
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramGroup {
    pub label: String,
    pub counts: Vec<usize>,
}

/// Grouped histogram over a shared `[min, max]` range
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub min: f64,
    pub max: f64,
    pub bin_width: f64,
    pub groups: Vec<HistogramGroup>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width bins per distinct label
    ///
    /// Non-finite values are skipped. The last bin is closed so the maximum
    /// lands in it. When every value is equal the range is widened by 0.5 on
    /// each side.
    pub fn grouped(values: &[f64], labels: &[String], bins: usize) -> Self {
        let bins = bins.max(1);

        let (mut min, mut max) = values
            .iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if !min.is_finite() || !max.is_finite() {
            min = 0.0;
            max = 1.0;
        } else if max - min <= f64::EPSILON {
            min -= 0.5;
            max += 0.5;
        }
        let bin_width = (max - min) / bins as f64;

        let mut groups: Vec<HistogramGroup> = Vec::new();
        for (&value, label) in values.iter().zip(labels) {
            let idx = match groups.iter().position(|g| &g.label == label) {
                Some(idx) => idx,
                None => {
                    groups.push(HistogramGroup {
                        label: label.clone(),
                        counts: vec![0; bins],
                    });
                    groups.len() - 1
                }
            };

            if !value.is_finite() {
                continue;
            }
            let bin = (((value - min) / bin_width).floor() as usize).min(bins - 1);
            groups[idx].counts[bin] += 1;
        }

        Self {
            min,
            max,
            bin_width,
            groups,
        }
    }

    pub fn bins(&self) -> usize {
        self.groups.first().map_or(0, |g| g.counts.len())
    }

    /// Left edge of bin `idx`
    pub fn bin_start(&self, idx: usize) -> f64 {
        self.min + idx as f64 * self.bin_width
    }

    /// Largest count across all groups and bins
    pub fn max_count(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|g| g.counts.iter().copied())
            .max()
            .unwrap_or(0)
    }
}
