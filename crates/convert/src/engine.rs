//! Conversion engine: source detection, registry dispatch, compatibility
//! gating, and chained multi-platform conversion.

use crate::compat::{score_conversion, CompatibilityRating, CompatibilityScore};
use crate::converter::Approximation;
use crate::registry::{ConverterRegistry, RegistryLookup};
use serde::{Deserialize, Serialize};
use taptik_core::{ComponentCounts, ConfigurationContext, Platform};

/// Options controlling a conversion.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConversionOptions {
    /// Compute the compatibility score and fail closed on a poor rating.
    pub validate_compatibility: bool,
    /// Proceed even when compatibility validation rates the conversion poor.
    pub force: bool,
}

/// Outcome of one conversion step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub success: bool,
    pub context: Option<ConfigurationContext>,
    pub error: Option<String>,
    /// Feature kinds present and non-empty in the converted output.
    pub supported_features: Vec<String>,
    pub unsupported_features: Vec<String>,
    pub approximations: Vec<Approximation>,
    pub warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compatibility: Option<CompatibilityScore>,
}

impl ConversionResult {
    fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            context: None,
            error: Some(error.into()),
            supported_features: Vec::new(),
            unsupported_features: Vec::new(),
            approximations: Vec::new(),
            warnings: Vec::new(),
            compatibility: None,
        }
    }
}

/// The conversion engine. Owns the converter registry.
pub struct ConversionEngine {
    registry: ConverterRegistry,
}

impl ConversionEngine {
    pub fn new(registry: ConverterRegistry) -> Self {
        Self { registry }
    }

    pub fn with_defaults() -> Self {
        Self::new(ConverterRegistry::with_defaults())
    }

    pub fn registry(&self) -> &ConverterRegistry {
        &self.registry
    }

    /// Convert a context to the target platform's shape.
    pub fn convert(
        &self,
        ctx: &ConfigurationContext,
        target: Platform,
        options: &ConversionOptions,
    ) -> ConversionResult {
        let source = match detect_source(ctx) {
            Some(platform) => platform,
            None => {
                return ConversionResult::failure(format!(
                    "unable to determine source platform from '{}' or context data",
                    ctx.source_platform
                ));
            }
        };

        if source == target {
            return ConversionResult {
                success: true,
                supported_features: present_features(ctx),
                context: Some(ctx.clone()),
                error: None,
                unsupported_features: Vec::new(),
                approximations: Vec::new(),
                warnings: vec![format!(
                    "source and target are both {target}; nothing to convert"
                )],
                compatibility: None,
            };
        }

        let converter = match self.registry.lookup(source, target) {
            RegistryLookup::Found(converter) => converter,
            RegistryLookup::NotFound { source, target } => {
                return ConversionResult::failure(format!(
                    "no converter available for {source} -> {target}"
                ));
            }
        };

        let analysis = converter.analyze(ctx);
        let converted = converter.convert(ctx);
        let compatibility = score_conversion(&converted.context, &analysis);

        if options.validate_compatibility
            && compatibility.rating == CompatibilityRating::Poor
            && !options.force
        {
            return ConversionResult {
                compatibility: Some(compatibility),
                ..ConversionResult::failure(format!(
                    "conversion {source} -> {target} rated poor (score {}); pass force to proceed",
                    compatibility.score
                ))
            };
        }

        tracing::debug!(
            target: "taptik::convert",
            %source,
            %target,
            score = compatibility.score,
            approximated = analysis.approximations.len(),
            unsupported = analysis.unsupported.len(),
            "conversion complete"
        );

        ConversionResult {
            success: true,
            supported_features: present_features(&converted.context),
            context: Some(converted.context),
            error: None,
            unsupported_features: analysis.unsupported,
            approximations: analysis.approximations,
            warnings: converted.warnings,
            compatibility: Some(compatibility),
        }
    }

    /// Apply single-step conversion along a platform chain, stopping at the
    /// first failure. Returns every step result accumulated so far, in order.
    pub fn convert_chain(
        &self,
        ctx: &ConfigurationContext,
        targets: &[Platform],
        options: &ConversionOptions,
    ) -> Vec<ConversionResult> {
        let mut results = Vec::with_capacity(targets.len());
        let mut current = ctx.clone();

        for target in targets {
            let result = self.convert(&current, *target, options);
            let next = result.context.clone();
            let failed = !result.success;
            results.push(result);
            if failed {
                break;
            }
            // Success always carries a context.
            if let Some(ctx) = next {
                current = ctx;
            }
        }
        results
    }
}

impl Default for ConversionEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Determine the source platform: the explicit identifier when it parses,
/// otherwise the single data key that names a known platform.
fn detect_source(ctx: &ConfigurationContext) -> Option<Platform> {
    if let Some(platform) = Platform::parse(&ctx.source_platform) {
        return Some(platform);
    }
    let mut candidates = ctx.data.keys().filter_map(|key| Platform::parse(key));
    let first = candidates.next()?;
    match candidates.next() {
        None => Some(first),
        Some(_) => None, // ambiguous
    }
}

/// Names of feature kinds present and non-empty in a context.
fn present_features(ctx: &ConfigurationContext) -> Vec<String> {
    let counts = ComponentCounts::for_context(ctx);
    let mut features = Vec::new();
    for (present, name) in [
        (counts.agents > 0, "agents"),
        (counts.commands > 0, "commands"),
        (counts.mcp_servers > 0, "mcp-servers"),
        (counts.steering_rules > 0, "steering-rules"),
        (counts.instructions > 0, "instructions"),
    ] {
        if present {
            features.push(name.to_string());
        }
    }
    features
}
