//! Run summary printed at the end of a simulation
//!
//! Text output is for humans and not meant to be parsed; use the JSON form for
//! machine consumption.

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::stats::StatsSummary;
use crate::transform::TransformParams;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const RULE_WIDTH: usize = 70;

/// Static open-core notice appended to the text summary
pub const NOTICE_LINES: [&str; 3] = [
    "NOTICE: This simulation uses ONLY the open-core PTL-X equation",
    "Dynamic coefficient adaptation and calibration tables are not included",
    "Licensed for academic, educational, and non-commercial use only",
];

/// Outcome of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub requested_samples: usize,
    pub generated_samples: usize,
    pub seed: u64,
    pub transform: TransformParams,
    /// Profile names in generation order (empty for uniform sampling)
    pub profiles: Vec<String>,
    pub csv_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_path: Option<PathBuf>,
    pub stats: StatsSummary,
}

impl RunReport {
    /// Samples lost to the profile partition remainder
    pub fn dropped_samples(&self) -> usize {
        self.requested_samples.saturating_sub(self.generated_samples)
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json => self.to_json(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_text(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut out = String::new();

        out.push('\n');
        out.push_str(&rule);
        out.push('\n');
        out.push_str("PTL-X OPEN CORE SIMULATION COMPLETED\n");

        out.push_str(&format!(
            "- Generated {} synthetic samples",
            self.generated_samples
        ));
        if self.dropped_samples() > 0 {
            out.push_str(&format!(
                " (requested {}, {} dropped by profile partition)",
                self.requested_samples,
                self.dropped_samples()
            ));
        }
        out.push('\n');

        if self.profiles.is_empty() {
            out.push_str("- Sampling: uniform over [0, 1)\n");
        } else {
            out.push_str(&format!("- Profiles: {}\n", self.profiles.join(", ")));
        }

        out.push_str(&format!(
            "- Parameters: alpha={} beta={} gamma={} seed={}\n",
            self.transform.alpha, self.transform.beta, self.transform.gamma, self.seed
        ));

        match &self.plot_path {
            Some(plot) => out.push_str(&format!(
                "- Outputs: CSV data ({}), visualization PNG ({})\n",
                self.csv_path.display(),
                plot.display()
            )),
            None => out.push_str(&format!(
                "- Outputs: CSV data ({})\n",
                self.csv_path.display()
            )),
        }

        out.push_str(&rule);
        out.push('\n');
        out.push_str(&self.stats.to_table());
        out.push_str(&rule);
        out.push('\n');
        for line in NOTICE_LINES {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&rule);
        out.push('\n');

        out
    }
}
