//! The validation result record.

use serde::{Deserialize, Serialize};

/// Outcome of validating a package for upload.
///
/// `is_valid` is true exactly when `errors` is empty; warnings never fail a
/// package on their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub cloud_compatible: bool,
    pub schema_compliant: bool,
    pub size_limit: SizeLimitInfo,
    pub feature_support: FeatureSupport,
    pub recommendations: Vec<String>,
    /// Overall quality score, clamped to 0–100.
    pub score: u8,
}

/// Size accounting against the tier ceiling that applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeLimitInfo {
    pub current: u64,
    pub maximum: u64,
    pub within_limit: bool,
    /// Percentage of the ceiling consumed.
    pub percentage: f64,
}

impl SizeLimitInfo {
    pub fn measure(current: u64, maximum: u64) -> Self {
        Self {
            current,
            maximum,
            within_limit: current <= maximum,
            percentage: (current as f64 / maximum as f64) * 100.0,
        }
    }
}

/// Declared features split against the known-feature allow-list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSupport {
    /// Source platform identifier the split was computed for.
    pub ide: String,
    pub supported: Vec<String>,
    pub unsupported: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_at_ceiling_is_within_limit() {
        let info = SizeLimitInfo::measure(1024, 1024);
        assert!(info.within_limit);
        assert_eq!(info.percentage, 100.0);
    }

    #[test]
    fn one_byte_over_is_not() {
        let info = SizeLimitInfo::measure(1025, 1024);
        assert!(!info.within_limit);
        assert!(info.percentage > 100.0);
    }
}
