use crate::error::{PtlxError, Result};
use serde::{Deserialize, Serialize};

/// Half-open sampling range `[low, high)`
///
/// Serialized as a two-element array, e.g. `m_range = [0.7, 0.9]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct ProfileRange {
    pub low: f64,
    pub high: f64,
}

impl ProfileRange {
    pub const UNIT: ProfileRange = ProfileRange {
        low: 0.0,
        high: 1.0,
    };

    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Check `low <= high`, both ends finite and a finite width
    pub fn validate(&self, field: &str) -> Result<()> {
        if !self.low.is_finite()
            || !self.high.is_finite()
            || self.low > self.high
            || !(self.high - self.low).is_finite()
        {
            return Err(PtlxError::InvalidRange {
                field: field.to_string(),
                low: self.low,
                high: self.high,
            });
        }
        Ok(())
    }

    /// True when the range lies inside the intended [0, 1] domain
    pub fn within_unit_interval(&self) -> bool {
        self.low >= 0.0 && self.high <= 1.0
    }

    pub fn contains(&self, value: f64) -> bool {
        if self.low == self.high {
            value == self.low
        } else {
            value >= self.low && value < self.high
        }
    }
}

impl From<(f64, f64)> for ProfileRange {
    fn from((low, high): (f64, f64)) -> Self {
        Self { low, high }
    }
}

impl From<ProfileRange> for (f64, f64) {
    fn from(range: ProfileRange) -> Self {
        (range.low, range.high)
    }
}

/// A named cluster of synthetic samples
///
/// # Example TOML
/// ```toml
/// [[profile]]
/// name = "Acute Flashback"
/// m_range = [0.7, 0.9]
/// e_range = [0.8, 1.0]
/// r_range = [0.1, 0.3]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDefinition {
    /// Label attached to every sample drawn from this profile
    pub name: String,

    /// Memory density range
    pub m_range: ProfileRange,

    /// Emotional charge range
    pub e_range: ProfileRange,

    /// Recursive intensity range
    pub r_range: ProfileRange,
}

impl ProfileDefinition {
    pub fn new(
        name: impl Into<String>,
        m_range: impl Into<ProfileRange>,
        e_range: impl Into<ProfileRange>,
        r_range: impl Into<ProfileRange>,
    ) -> Self {
        Self {
            name: name.into(),
            m_range: m_range.into(),
            e_range: e_range.into(),
            r_range: r_range.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PtlxError::InvalidConfig(
                "profile name must not be empty".to_string(),
            ));
        }

        self.m_range.validate(&format!("{}.m_range", self.name))?;
        self.e_range.validate(&format!("{}.e_range", self.name))?;
        self.r_range.validate(&format!("{}.r_range", self.name))?;

        for (field, range) in [
            ("m_range", self.m_range),
            ("e_range", self.e_range),
            ("r_range", self.r_range),
        ] {
            if !range.within_unit_interval() {
                tracing::warn!(
                    profile = %self.name,
                    field,
                    low = range.low,
                    high = range.high,
                    "profile range extends outside the intended [0, 1] domain"
                );
            }
        }

        Ok(())
    }
}

/// Ordered list of profiles
///
/// Order is significant: the sampler emits one contiguous block per profile
/// in this order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileSpec {
    profiles: Vec<ProfileDefinition>,
}

impl ProfileSpec {
    /// Build a profile list, rejecting invalid ranges and duplicate names
    pub fn new(profiles: Vec<ProfileDefinition>) -> Result<Self> {
        let spec = Self { profiles };
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> Result<()> {
        for (idx, profile) in self.profiles.iter().enumerate() {
            profile.validate()?;
            if self.profiles[..idx].iter().any(|p| p.name == profile.name) {
                return Err(PtlxError::DuplicateProfile(profile.name.clone()));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProfileDefinition> {
        self.profiles.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&ProfileDefinition> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Number of samples each profile receives for a requested total
    ///
    /// The remainder `n % k` is dropped.
    pub fn samples_per_profile(&self, n: usize) -> usize {
        if self.profiles.is_empty() {
            0
        } else {
            n / self.profiles.len()
        }
    }
}

impl<'a> IntoIterator for &'a ProfileSpec {
    type Item = &'a ProfileDefinition;
    type IntoIter = std::slice::Iter<'a, ProfileDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.profiles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acute() -> ProfileDefinition {
        ProfileDefinition::new("Acute Flashback", (0.7, 0.9), (0.8, 1.0), (0.1, 0.3))
    }

    #[test]
    fn test_range_validate() {
        assert!(ProfileRange::new(0.2, 0.4).validate("m").is_ok());
        assert!(ProfileRange::new(0.4, 0.4).validate("m").is_ok());
        assert!(ProfileRange::new(0.5, 0.4).validate("m").is_err());
        assert!(ProfileRange::new(f64::NAN, 0.4).validate("m").is_err());
    }

    #[test]
    fn test_range_with_overflowing_width_rejected() {
        let range = ProfileRange::new(-f64::MAX, f64::MAX);
        assert!(matches!(
            range.validate("m"),
            Err(PtlxError::InvalidRange { ref field, .. }) if field == "m"
        ));

        let wide = ProfileDefinition::new("Wide", (-f64::MAX, f64::MAX), (0.0, 1.0), (0.0, 1.0));
        let err = ProfileSpec::new(vec![wide]).unwrap_err();
        assert!(matches!(err, PtlxError::InvalidRange { ref field, .. } if field == "Wide.m_range"));
    }

    #[test]
    fn test_range_contains_half_open() {
        let range = ProfileRange::new(0.2, 0.4);
        assert!(range.contains(0.2));
        assert!(range.contains(0.39));
        assert!(!range.contains(0.4));
        assert!(ProfileRange::new(0.3, 0.3).contains(0.3));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = ProfileSpec::new(vec![acute(), acute()]).unwrap_err();
        assert!(matches!(err, PtlxError::DuplicateProfile(name) if name == "Acute Flashback"));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let bad = ProfileDefinition::new("Bad", (0.9, 0.7), (0.0, 1.0), (0.0, 1.0));
        let err = ProfileSpec::new(vec![bad]).unwrap_err();
        assert!(matches!(err, PtlxError::InvalidRange { ref field, .. } if field == "Bad.m_range"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let bad = ProfileDefinition::new("  ", (0.0, 1.0), (0.0, 1.0), (0.0, 1.0));
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_samples_per_profile_truncates() {
        let spec = ProfileSpec::new(vec![
            acute(),
            ProfileDefinition::new("Other", (0.0, 1.0), (0.0, 1.0), (0.0, 1.0)),
            ProfileDefinition::new("Third", (0.0, 1.0), (0.0, 1.0), (0.0, 1.0)),
        ])
        .unwrap();
        assert_eq!(spec.samples_per_profile(1000), 333);
        assert_eq!(spec.samples_per_profile(900), 300);
        assert_eq!(spec.samples_per_profile(2), 0);
        assert_eq!(ProfileSpec::default().samples_per_profile(10), 0);
    }

    #[test]
    fn test_order_preserved() {
        let spec = ProfileSpec::new(vec![
            ProfileDefinition::new("b", (0.0, 1.0), (0.0, 1.0), (0.0, 1.0)),
            ProfileDefinition::new("a", (0.0, 1.0), (0.0, 1.0), (0.0, 1.0)),
        ])
        .unwrap();
        assert_eq!(spec.names(), vec!["b", "a"]);
        assert!(spec.get("a").is_some());
    }
}
