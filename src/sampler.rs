//! Seeded synthetic sample generation
//!
//! Every call to [`ProfileSampler::generate`] starts from a fresh RNG seeded
//! with the configured seed, so identical inputs reproduce identical batches.
//!
//! Within a draw, all M values are drawn first, then all E values, then all R
//! values. With profiles this happens once per profile, in profile order.

use crate::batch::{SampleBatch, UNIFORM_LABEL};
use crate::error::Result;
use crate::profile::{ProfileRange, ProfileSpec};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Seed used by the reference run
pub const DEFAULT_SEED: u64 = 42;

/// Generates labeled sample batches from uniform ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileSampler {
    seed: u64,
}

impl Default for ProfileSampler {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl ProfileSampler {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a batch of (up to) `n` samples
    ///
    /// Without profiles, or with an empty profile list, all `n` samples are drawn over
    /// `[0, 1)` and labeled `"Uniform"`. With `k` profiles, each profile gets
    /// `n / k` samples and the remainder is dropped, so the batch may hold
    /// fewer than `n` samples.
    ///
    /// # Errors
    /// Returns an error if the profiles contain an invalid range or a duplicate
    /// profile name.
    pub fn generate(&self, n: usize, profiles: Option<&ProfileSpec>) -> Result<SampleBatch> {
        let mut rng = StdRng::seed_from_u64(self.seed);

        let spec = match profiles {
            Some(spec) if !spec.is_empty() => spec,
            _ => {
                tracing::debug!(n, seed = self.seed, "generating uniform samples");
                return Self::draw_block(&mut rng, n, UNIFORM_LABEL, uniform_ranges());
            }
        };

        spec.validate()?;

        let per_profile = spec.samples_per_profile(n);
        let dropped = n - per_profile * spec.len();
        if dropped > 0 {
            tracing::warn!(
                requested = n,
                profiles = spec.len(),
                per_profile,
                dropped,
                "sample count not divisible by profile count; remainder dropped"
            );
        }

        let mut batch = SampleBatch::default();
        for profile in spec {
            tracing::debug!(
                profile = %profile.name,
                samples = per_profile,
                "generating profile samples"
            );
            let block = Self::draw_block(
                &mut rng,
                per_profile,
                &profile.name,
                [profile.m_range, profile.e_range, profile.r_range],
            )?;
            batch.extend(block);
        }

        Ok(batch)
    }

    /// Draw `count` samples for one label: M block, then E, then R
    fn draw_block(
        rng: &mut StdRng,
        count: usize,
        label: &str,
        [m_range, e_range, r_range]: [ProfileRange; 3],
    ) -> Result<SampleBatch> {
        let m = draw_uniform(rng, m_range, count);
        let e = draw_uniform(rng, e_range, count);
        let r = draw_uniform(rng, r_range, count);
        SampleBatch::new(m, e, r, vec![label.to_string(); count])
    }
}

fn uniform_ranges() -> [ProfileRange; 3] {
    [ProfileRange::UNIT; 3]
}

/// Draw `count` values uniformly from `[low, high)`; a point range yields `low`
fn draw_uniform(rng: &mut StdRng, range: ProfileRange, count: usize) -> Vec<f64> {
    if range.low >= range.high {
        return vec![range.low; count];
    }
    let dist = Uniform::new(range.low, range.high);
    (0..count).map(|_| dist.sample(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PtlxError;
    use crate::profile::ProfileDefinition;

    fn three_profiles() -> ProfileSpec {
        ProfileSpec::new(vec![
            ProfileDefinition::new("Acute Flashback", (0.7, 0.9), (0.8, 1.0), (0.1, 0.3)),
            ProfileDefinition::new("Chronic Avoidance", (0.4, 0.6), (0.5, 0.7), (0.6, 0.8)),
            ProfileDefinition::new("High-Functioning", (0.2, 0.4), (0.3, 0.5), (0.7, 0.9)),
        ])
        .unwrap()
    }

    #[test]
    fn test_uniform_branch_length_and_label() {
        let batch = ProfileSampler::new(7).generate(250, None).unwrap();
        assert_eq!(batch.len(), 250);
        assert!(batch.labels().iter().all(|l| l == UNIFORM_LABEL));
        assert!(batch.m().iter().all(|&v| (0.0..1.0).contains(&v)));
        assert!(batch.e().iter().all(|&v| (0.0..1.0).contains(&v)));
        assert!(batch.r().iter().all(|&v| (0.0..1.0).contains(&v)));
    }

    #[test]
    fn test_empty_spec_behaves_like_uniform() {
        let sampler = ProfileSampler::new(3);
        let uniform = sampler.generate(40, None).unwrap();
        let empty = sampler.generate(40, Some(&ProfileSpec::default())).unwrap();
        assert_eq!(uniform, empty);
    }

    #[test]
    fn test_profile_branch_truncates_remainder() {
        let batch = ProfileSampler::default()
            .generate(1000, Some(&three_profiles()))
            .unwrap();
        assert_eq!(batch.len(), 999);
    }

    #[test]
    fn test_profile_values_within_ranges() {
        let spec = three_profiles();
        let batch = ProfileSampler::default().generate(300, Some(&spec)).unwrap();
        for sample in batch.iter() {
            let profile = spec.get(sample.label).unwrap();
            assert!(profile.m_range.contains(sample.m));
            assert!(profile.e_range.contains(sample.e));
            assert!(profile.r_range.contains(sample.r));
        }
    }

    #[test]
    fn test_same_seed_same_output() {
        let spec = three_profiles();
        let a = ProfileSampler::new(42).generate(99, Some(&spec)).unwrap();
        let b = ProfileSampler::new(42).generate(99, Some(&spec)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_different_output() {
        let a = ProfileSampler::new(1).generate(10, None).unwrap();
        let b = ProfileSampler::new(2).generate(10, None).unwrap();
        assert_ne!(a.m(), b.m());
    }

    #[test]
    fn test_point_range_yields_constant() {
        let spec = ProfileSpec::new(vec![ProfileDefinition::new(
            "Fixed",
            (0.5, 0.5),
            (0.0, 1.0),
            (0.25, 0.25),
        )])
        .unwrap();
        let batch = ProfileSampler::default().generate(5, Some(&spec)).unwrap();
        assert!(batch.m().iter().all(|&v| v == 0.5));
        assert!(batch.r().iter().all(|&v| v == 0.25));
    }

    #[test]
    fn test_overflowing_range_is_error_not_panic() {
        let wide = ProfileDefinition::new("Wide", (0.0, 1.0), (-f64::MAX, f64::MAX), (0.0, 1.0));
        assert!(ProfileSpec::new(vec![wide.clone()]).is_err());

        // Deserialization skips validation; generate must still refuse the range
        let spec: ProfileSpec = serde_json::from_value(serde_json::json!([wide])).unwrap();
        let result = ProfileSampler::new(42).generate(10, Some(&spec));
        assert!(matches!(result, Err(PtlxError::InvalidRange { .. })));
    }

    #[test]
    fn test_fewer_samples_than_profiles_is_empty() {
        let batch = ProfileSampler::default()
            .generate(2, Some(&three_profiles()))
            .unwrap();
        assert!(batch.is_empty());
    }
}
