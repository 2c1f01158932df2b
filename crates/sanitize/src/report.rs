//! Result and report types for a sanitization pass.

use crate::rules::{Category, SensitiveSeverity};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Derived three-state summary of a sanitization pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityLevel {
    Safe,
    Warning,
    Blocked,
}

/// Counts of scanned values by classification severity.
///
/// Buckets are mutually exclusive per value: each scanned value lands in
/// exactly one, taken from the category that matched (or `safe` if none did).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityBreakdown {
    pub safe: u64,
    pub low: u64,
    pub medium: u64,
    pub critical: u64,
}

impl SeverityBreakdown {
    pub fn record(&mut self, severity: SensitiveSeverity) {
        match severity {
            SensitiveSeverity::Safe => self.safe += 1,
            SensitiveSeverity::Low => self.low += 1,
            SensitiveSeverity::Medium => self.medium += 1,
            SensitiveSeverity::Critical => self.critical += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.safe + self.low + self.medium + self.critical
    }

    /// Derive the public security level: any critical finding blocks the
    /// configuration; any low/medium finding downgrades it to a warning.
    pub fn security_level(&self) -> SecurityLevel {
        if self.critical > 0 {
            SecurityLevel::Blocked
        } else if self.medium > 0 || self.low > 0 {
            SecurityLevel::Warning
        } else {
            SecurityLevel::Safe
        }
    }
}

/// Structured per-pass accounting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizationReport {
    /// Every scanned scalar increments this, redacted or not.
    pub total_fields: u64,
    /// Number of values that were rewritten.
    pub sanitized_fields: u64,
    /// Per-category detail entries ("key at path").
    pub findings_by_category: BTreeMap<Category, Vec<String>>,
    pub processing_time_ms: u64,
}

/// Output of one sanitization pass. Sanitization is best-effort and never
/// fails; malformed or empty input yields an empty, `safe` result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizationResult {
    /// Deep copy of the input with sensitive values replaced.
    pub sanitized_data: Value,
    /// Human-readable findings, one per category that fired, in first-hit
    /// order. Ordering is not guaranteed stable across releases.
    pub findings: Vec<String>,
    pub severity_breakdown: SeverityBreakdown,
    pub security_level: SecurityLevel,
    pub report: SanitizationReport,
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn security_level_derivation() {
        let mut breakdown = SeverityBreakdown::default();
        assert_eq!(breakdown.security_level(), SecurityLevel::Safe);

        breakdown.record(SensitiveSeverity::Safe);
        assert_eq!(breakdown.security_level(), SecurityLevel::Safe);

        breakdown.record(SensitiveSeverity::Low);
        assert_eq!(breakdown.security_level(), SecurityLevel::Warning);

        breakdown.record(SensitiveSeverity::Medium);
        assert_eq!(breakdown.security_level(), SecurityLevel::Warning);

        breakdown.record(SensitiveSeverity::Critical);
        assert_eq!(breakdown.security_level(), SecurityLevel::Blocked);
    }

    #[test]
    fn buckets_are_mutually_exclusive() {
        let mut breakdown = SeverityBreakdown::default();
        for severity in [
            SensitiveSeverity::Safe,
            SensitiveSeverity::Low,
            SensitiveSeverity::Medium,
            SensitiveSeverity::Critical,
        ] {
            breakdown.record(severity);
        }
        assert_eq!(breakdown.total(), 4);
        assert_eq!(
            (breakdown.safe, breakdown.low, breakdown.medium, breakdown.critical),
            (1, 1, 1, 1)
        );
    }
}
