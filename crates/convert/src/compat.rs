//! Compatibility scoring for a conversion.

use crate::converter::FeatureAnalysis;
use serde::{Deserialize, Serialize};
use taptik_core::{ComponentCounts, ConfigurationContext};

/// Bucketed rating derived from the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompatibilityRating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl CompatibilityRating {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=100 => Self::Excellent,
            70..=89 => Self::Good,
            50..=69 => Self::Fair,
            _ => Self::Poor,
        }
    }
}

/// 0–100 estimate of how well a conversion preserves source features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityScore {
    pub score: u8,
    pub rating: CompatibilityRating,
    /// True when nothing was lost and approximations stay under 30% of the
    /// feature total, i.e. converting back should be nearly lossless.
    pub reversible: bool,
}

/// Count the non-empty top-level feature fields of a converted context.
fn direct_features(ctx: &ConfigurationContext) -> u32 {
    let counts = ComponentCounts::for_context(ctx);
    let mut direct = 0;
    for present in [
        counts.agents > 0,
        counts.commands > 0,
        counts.mcp_servers > 0,
        counts.steering_rules > 0,
        counts.instructions > 0,
    ] {
        direct += u32::from(present);
    }
    if ctx.scopes().any(|(_, scope)| !scope.settings.is_null()) {
        direct += 1;
    }
    direct
}

/// Score a conversion: `round(((direct + 0.7 * approximated) / total) * 100)`
/// where `total = direct + approximated + unsupported`.
pub fn score_conversion(
    converted: &ConfigurationContext,
    analysis: &FeatureAnalysis,
) -> CompatibilityScore {
    let direct = direct_features(converted);
    let approximated = analysis.approximations.len() as u32;
    let unsupported = analysis.unsupported.len() as u32;
    let total = direct + approximated + unsupported;

    if total == 0 {
        // Nothing to convert; an empty context is trivially compatible.
        return CompatibilityScore {
            score: 100,
            rating: CompatibilityRating::Excellent,
            reversible: true,
        };
    }

    let raw = (f64::from(direct) + 0.7 * f64::from(approximated)) / f64::from(total) * 100.0;
    let score = raw.round().clamp(0.0, 100.0) as u8;
    let reversible = unsupported == 0 && f64::from(approximated) < 0.3 * f64::from(total);

    CompatibilityScore {
        score,
        rating: CompatibilityRating::from_score(score),
        reversible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::{Approximation, Confidence};
    use taptik_core::{CommandDef, McpServerDef, ScopeConfig};

    fn context_with(commands: usize, mcp: usize) -> ConfigurationContext {
        let mut ctx = ConfigurationContext::new("1.0.0", "kiro");
        ctx.data.insert(
            "local".into(),
            ScopeConfig {
                commands: (0..commands)
                    .map(|i| CommandDef {
                        name: format!("cmd{i}"),
                        command: "run".into(),
                        args: Vec::new(),
                    })
                    .collect(),
                mcp_servers: (0..mcp)
                    .map(|i| McpServerDef {
                        name: format!("srv{i}"),
                        transport: "stdio".into(),
                        ..Default::default()
                    })
                    .collect(),
                ..Default::default()
            },
        );
        ctx
    }

    fn approximation(feature: &str) -> Approximation {
        Approximation {
            source_feature: feature.into(),
            target_approximation: "other".into(),
            confidence: Confidence::Medium,
            note: None,
        }
    }

    #[test]
    fn all_direct_scores_100() {
        let ctx = context_with(2, 1);
        let score = score_conversion(&ctx, &FeatureAnalysis::default());
        assert_eq!(score.score, 100);
        assert_eq!(score.rating, CompatibilityRating::Excellent);
        assert!(score.reversible);
    }

    #[test]
    fn empty_conversion_is_trivially_compatible() {
        let ctx = ConfigurationContext::new("1.0.0", "kiro");
        let score = score_conversion(&ctx, &FeatureAnalysis::default());
        assert_eq!(score.score, 100);
        assert!(score.reversible);
    }

    #[test]
    fn approximations_weigh_at_seventy_percent() {
        // direct=2 (commands, mcp), approx=1, unsupported=1 -> total=4
        // score = (2 + 0.7) / 4 * 100 = 67.5 -> 68
        let ctx = context_with(1, 1);
        let analysis = FeatureAnalysis {
            unsupported: vec!["agents".into()],
            approximations: vec![approximation("hooks")],
        };
        let score = score_conversion(&ctx, &analysis);
        assert_eq!(score.score, 68);
        assert_eq!(score.rating, CompatibilityRating::Fair);
        assert!(!score.reversible, "unsupported features break reversibility");
    }

    #[test]
    fn heavy_approximation_breaks_reversibility() {
        // direct=1, approx=2, unsupported=0 -> total=3; 2/3 >= 30%
        let ctx = context_with(1, 0);
        let analysis = FeatureAnalysis {
            unsupported: Vec::new(),
            approximations: vec![approximation("a"), approximation("b")],
        };
        let score = score_conversion(&ctx, &analysis);
        assert!(!score.reversible);
        // score = (1 + 1.4) / 3 * 100 = 80
        assert_eq!(score.score, 80);
        assert_eq!(score.rating, CompatibilityRating::Good);
    }

    #[test]
    fn rating_buckets() {
        assert_eq!(CompatibilityRating::from_score(90), CompatibilityRating::Excellent);
        assert_eq!(CompatibilityRating::from_score(89), CompatibilityRating::Good);
        assert_eq!(CompatibilityRating::from_score(70), CompatibilityRating::Good);
        assert_eq!(CompatibilityRating::from_score(69), CompatibilityRating::Fair);
        assert_eq!(CompatibilityRating::from_score(50), CompatibilityRating::Fair);
        assert_eq!(CompatibilityRating::from_score(49), CompatibilityRating::Poor);
    }
}
