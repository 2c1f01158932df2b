//! Converter trait and feature-mapping types.

use serde::{Deserialize, Serialize};
use taptik_core::{ConfigurationContext, Platform};

/// Confidence that an approximation preserves the source feature's intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// A target-platform feature substituted for an unsupported source feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Approximation {
    pub source_feature: String,
    pub target_approximation: String,
    pub confidence: Confidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Which source features map directly, approximately, or not at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureAnalysis {
    pub unsupported: Vec<String>,
    pub approximations: Vec<Approximation>,
}

/// A converted context plus converter-emitted warnings.
#[derive(Debug, Clone)]
pub struct ConvertedContext {
    pub context: ConfigurationContext,
    pub warnings: Vec<String>,
}

/// Maps a configuration context from one platform's shape to another's.
///
/// Converters are pure: they never mutate the input context and never touch
/// the filesystem.
pub trait PlatformConverter: Send + Sync {
    fn source(&self) -> Platform;
    fn target(&self) -> Platform;

    /// Classify the context's features without converting.
    fn analyze(&self, ctx: &ConfigurationContext) -> FeatureAnalysis;

    /// Produce the target-shaped context.
    fn convert(&self, ctx: &ConfigurationContext) -> ConvertedContext;
}

/// Clone a context, rewriting its source platform identifier.
pub(crate) fn reheaded(ctx: &ConfigurationContext, platform: Platform) -> ConfigurationContext {
    let mut out = ctx.clone();
    out.source_platform = platform.as_str().to_string();
    out
}
