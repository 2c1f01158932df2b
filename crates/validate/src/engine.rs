//! Upload-readiness validation: an ordered sequence of checks over an
//! assembled package, each appending to shared error/warning lists.

use crate::cache::ValidationCache;
use crate::compat::{self, CLAUDE_SPECIFIC_KINDS};
use crate::result::{FeatureSupport, SizeLimitInfo, ValidationResult};
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use taptik_core::limits::{
    DEFAULT_PACKAGE_LIMIT, MAX_AGENTS, MAX_COMMANDS, MAX_INSTRUCTIONS, MAX_MCP_SERVERS,
    MAX_STEERING_RULES, MAX_TOTAL_COMPONENTS, METADATA_LIMIT, PLATFORM_EXECUTION_CEILING_SECS,
    PLATFORM_STORAGE_LIMIT, PREMIUM_PACKAGE_LIMIT, SIZE_WARNING_RATIO,
};
use taptik_core::{ComponentCounts, Compression, Platform, TaptikPackage, CHECKSUM_PLACEHOLDER};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Serialized field names every package's metadata section must carry.
/// Nullable fields may be null, but the key itself must be present.
const REQUIRED_METADATA_FIELDS: &[&str] = &[
    "title",
    "description",
    "tags",
    "searchKeywords",
    "componentCounts",
    "complexityLevel",
    "features",
    "compatibility",
    "version",
    "author",
    "createdAt",
    "fileSize",
    "checksum",
];

const COMPLEXITY_LEVELS: &[&str] = &["minimal", "basic", "intermediate", "advanced", "expert"];

/// Markup and SQL fragments that have no business in descriptive metadata.
static UNSAFE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(<script|<iframe|javascript:|onerror\s*=|onload\s*=|drop\s+table|delete\s+from|insert\s+into|union\s+select)",
    )
    .expect("unsafe content pattern")
});

/// Validates assembled packages before upload. Results are cached by
/// checksum and tier for a fixed TTL.
#[derive(Default)]
pub struct ValidationEngine {
    cache: ValidationCache,
}

impl ValidationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn purge_expired(&self) {
        self.cache.purge_expired();
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Run the full ordered check sequence against a package.
    ///
    /// Warnings never fail a package; `is_valid` reflects errors only.
    pub fn validate_for_upload(&self, pkg: &TaptikPackage, premium: bool) -> ValidationResult {
        let cache_key = format!("{}|premium={premium}", pkg.checksum);
        if let Some(cached) = self.cache.get(&cache_key) {
            tracing::trace!(target: "taptik::validate", checksum = %pkg.checksum, "cache hit");
            return cached;
        }

        let limit = if premium {
            PREMIUM_PACKAGE_LIMIT
        } else {
            DEFAULT_PACKAGE_LIMIT
        };

        // Serialization probe. A failure here is the structural analogue of a
        // circular reference and short-circuits everything else.
        let root = match serde_json::to_value(pkg) {
            Ok(root) => root,
            Err(e) => {
                return ValidationResult {
                    is_valid: false,
                    errors: vec![format!("package failed to serialize: {e}")],
                    warnings: Vec::new(),
                    cloud_compatible: false,
                    schema_compliant: false,
                    size_limit: SizeLimitInfo::measure(pkg.size, limit),
                    feature_support: FeatureSupport::default(),
                    recommendations: vec![
                        "Rebuild the package from its source configuration".to_string(),
                    ],
                    score: 0,
                };
            }
        };

        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut cloud_compatible = true;
        let counts = ComponentCounts::for_context(&pkg.sanitized_config);

        check_structure(&root, &mut errors);
        check_metadata_fields(pkg, &root, &mut errors);
        // The format tag needs no runtime check here: `PackageFormat` is a
        // closed enum, so an out-of-enum tag is rejected when the package is
        // deserialized and cannot reach this point.
        check_checksum(pkg, &mut errors);
        let size_limit = check_size(pkg, limit, &mut errors, &mut warnings, &mut cloud_compatible);
        let schema_compliant = check_schema(pkg, &mut errors);
        let feature_support = check_feature_support(pkg, &counts, &mut warnings);
        check_unsafe_content(pkg, &mut warnings);
        check_component_ceilings(&counts, &mut warnings);
        check_cross_platform(pkg, &counts, &mut warnings);
        check_processing_time(pkg, &counts, &mut warnings);

        let score = score(
            &errors,
            &warnings,
            pkg,
            limit,
            schema_compliant,
            cloud_compatible,
        );
        let recommendations =
            recommendations_for(&errors, &warnings, counts.total());

        let result = ValidationResult {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            cloud_compatible,
            schema_compliant,
            size_limit,
            feature_support,
            recommendations,
            score,
        };

        tracing::debug!(
            target: "taptik::validate",
            checksum = %pkg.checksum,
            valid = result.is_valid,
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            score = result.score,
            "validation complete"
        );

        self.cache.insert(cache_key, result.clone());
        result
    }
}

fn check_structure(root: &Value, errors: &mut Vec<String>) {
    for section in ["sanitizedConfig", "metadata", "manifest"] {
        if root.get(section).is_none() {
            errors.push(format!("missing required section '{section}'"));
        }
    }
}

/// Presence of all required metadata keys (null allowed for nullable ones)
/// plus value-level checks.
fn check_metadata_fields(pkg: &TaptikPackage, root: &Value, errors: &mut Vec<String>) {
    let metadata = match root.get("metadata") {
        Some(metadata) => metadata,
        None => return, // already reported by the structure check
    };

    for field in REQUIRED_METADATA_FIELDS {
        if metadata.get(field).is_none() {
            errors.push(format!("metadata missing required field '{field}'"));
        }
    }

    if pkg.metadata.title.chars().count() < 3 {
        errors.push("metadata title must be at least 3 characters".to_string());
    }
    if pkg.metadata.tags.is_empty() {
        errors.push("metadata must declare at least one tag".to_string());
    }
    if pkg.sanitized_config.target_platforms.is_empty() {
        errors.push("at least one target platform is required".to_string());
    }
    if pkg.metadata.version == "0.0.0" {
        errors.push("metadata version must not be 0.0.0".to_string());
    }
    if pkg.metadata.checksum.is_empty() || pkg.metadata.checksum == CHECKSUM_PLACEHOLDER {
        errors.push("metadata checksum is missing or still a placeholder".to_string());
    }
    if let Some(file_size) = metadata.get("fileSize").and_then(Value::as_i64) {
        if file_size < 0 {
            errors.push("metadata file size must be non-negative".to_string());
        }
    }
    match metadata.get("complexityLevel").and_then(Value::as_str) {
        Some(level) if COMPLEXITY_LEVELS.contains(&level) => {}
        Some(level) => errors.push(format!("unknown complexity level '{level}'")),
        None => {}
    }
    if let Some(Value::Object(count_map)) = metadata.get("componentCounts") {
        for (kind, count) in count_map {
            if count.as_i64().is_some_and(|n| n < 0) {
                errors.push(format!("component count '{kind}' must be non-negative"));
            }
        }
    }
    if let Some(created_at) = metadata.get("createdAt").and_then(Value::as_str) {
        if OffsetDateTime::parse(created_at, &Rfc3339).is_err() {
            errors.push("metadata creation date is not a valid timestamp".to_string());
        }
    }
}

fn check_checksum(pkg: &TaptikPackage, errors: &mut Vec<String>) {
    if pkg.checksum != pkg.metadata.checksum {
        errors.push(
            "checksum mismatch: package checksum does not match metadata checksum".to_string(),
        );
    }
}

/// Tier ceiling, platform storage ceiling, and metadata section ceiling.
/// The last two are independent of tier.
fn check_size(
    pkg: &TaptikPackage,
    limit: u64,
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
    cloud_compatible: &mut bool,
) -> SizeLimitInfo {
    let size_limit = SizeLimitInfo::measure(pkg.size, limit);
    if !size_limit.within_limit {
        errors.push(format!(
            "package size {} exceeds the {} byte limit",
            pkg.size, limit
        ));
        *cloud_compatible = false;
    } else if size_limit.percentage >= SIZE_WARNING_RATIO * 100.0 {
        warnings.push(format!(
            "package size is at {:.0}% of the limit",
            size_limit.percentage
        ));
    }

    if pkg.size > PLATFORM_STORAGE_LIMIT {
        errors.push(format!(
            "package size {} exceeds the {} byte platform storage ceiling",
            pkg.size, PLATFORM_STORAGE_LIMIT
        ));
        *cloud_compatible = false;
    }

    if let Ok(metadata_bytes) = serde_json::to_vec(&pkg.metadata) {
        if metadata_bytes.len() as u64 > METADATA_LIMIT {
            errors.push(format!(
                "metadata section {} bytes exceeds the {} byte ceiling",
                metadata_bytes.len(),
                METADATA_LIMIT
            ));
        }
    }
    size_limit
}

/// Per-record required fields of the embedded context. One error per missing
/// field, naming the record kind and field.
fn check_schema(pkg: &TaptikPackage, errors: &mut Vec<String>) -> bool {
    let before = errors.len();

    for (scope_name, scope) in pkg.sanitized_config.scopes() {
        for (i, agent) in scope.agents.iter().enumerate() {
            let label = record_label("agent", &agent.name, i);
            if agent.name.is_empty() {
                errors.push(format!("{label} in scope '{scope_name}' missing field 'name'"));
            }
            if agent.instructions.as_deref().unwrap_or("").is_empty() {
                errors.push(format!(
                    "{label} in scope '{scope_name}' missing field 'instructions'"
                ));
            }
        }
        for (i, command) in scope.commands.iter().enumerate() {
            let label = record_label("command", &command.name, i);
            if command.name.is_empty() {
                errors.push(format!("{label} in scope '{scope_name}' missing field 'name'"));
            }
            if command.command.is_empty() {
                errors.push(format!(
                    "{label} in scope '{scope_name}' missing field 'command'"
                ));
            }
        }
        for (i, server) in scope.mcp_servers.iter().enumerate() {
            let label = record_label("mcp server", &server.name, i);
            if server.name.is_empty() {
                errors.push(format!("{label} in scope '{scope_name}' missing field 'name'"));
            }
            if server.transport.is_empty() {
                errors.push(format!(
                    "{label} in scope '{scope_name}' missing field 'transport'"
                ));
            }
        }
        for (i, rule) in scope.steering_rules.iter().enumerate() {
            let label = record_label("steering rule", &rule.pattern, i);
            if rule.pattern.is_empty() {
                errors.push(format!(
                    "{label} in scope '{scope_name}' missing field 'pattern'"
                ));
            }
            if rule.rule.is_empty() {
                errors.push(format!("{label} in scope '{scope_name}' missing field 'rule'"));
            }
        }
    }
    errors.len() == before
}

fn record_label(kind: &str, name: &str, index: usize) -> String {
    if name.is_empty() {
        format!("{kind} #{index}")
    } else {
        format!("{kind} '{name}'")
    }
}

/// Platform allow-list and declared-feature split. Unknown identifiers are
/// warnings, never errors.
fn check_feature_support(
    pkg: &TaptikPackage,
    counts: &ComponentCounts,
    warnings: &mut Vec<String>,
) -> FeatureSupport {
    let source = Platform::parse(&pkg.sanitized_config.source_platform);
    if source.is_none() {
        warnings.push(format!(
            "unknown source platform '{}'",
            pkg.sanitized_config.source_platform
        ));
    }
    for target in &pkg.sanitized_config.target_platforms {
        if !Platform::is_known(target) {
            warnings.push(format!("unknown target platform '{target}'"));
        }
    }

    let mut supported = BTreeSet::new();
    let mut unsupported = Vec::new();
    for feature in &pkg.metadata.features {
        if compat::is_known_feature(feature) {
            supported.insert(feature.clone());
        } else {
            warnings.push(format!(
                "feature '{feature}' is not recognized by the cloud platform"
            ));
            unsupported.push(feature.clone());
        }
    }
    if source.is_some() {
        for (present, kind) in [
            (counts.agents > 0, "agents"),
            (counts.commands > 0, "commands"),
            (counts.mcp_servers > 0, "mcp-servers"),
            (counts.steering_rules > 0, "steering-rules"),
            (counts.instructions > 0, "instructions"),
        ] {
            if present {
                supported.insert(kind.to_string());
            }
        }
    }

    FeatureSupport {
        ide: pkg.sanitized_config.source_platform.clone(),
        supported: supported.into_iter().collect(),
        unsupported,
    }
}

fn check_unsafe_content(pkg: &TaptikPackage, warnings: &mut Vec<String>) {
    let mut scan = |field: &str, text: &str| {
        if UNSAFE_PATTERN.is_match(text) {
            warnings.push(format!("metadata {field} contains potentially unsafe content"));
        }
    };
    scan("title", &pkg.metadata.title);
    if let Some(description) = &pkg.metadata.description {
        scan("description", description);
    }
    for tag in &pkg.metadata.tags {
        scan("tag", tag);
    }
}

fn check_component_ceilings(counts: &ComponentCounts, warnings: &mut Vec<String>) {
    for (count, ceiling, kind) in [
        (counts.agents, MAX_AGENTS, "agent"),
        (counts.commands, MAX_COMMANDS, "command"),
        (counts.mcp_servers, MAX_MCP_SERVERS, "mcp server"),
        (counts.steering_rules, MAX_STEERING_RULES, "steering rule"),
        (counts.instructions, MAX_INSTRUCTIONS, "instruction"),
    ] {
        if count > ceiling {
            warnings.push(format!(
                "{kind} count {count} exceeds the recommended maximum of {ceiling}"
            ));
        }
    }
}

/// Per-target feature tables plus warnings for claude-code-only component
/// kinds shipped to other platforms.
fn check_cross_platform(
    pkg: &TaptikPackage,
    counts: &ComponentCounts,
    warnings: &mut Vec<String>,
) {
    for target_name in &pkg.sanitized_config.target_platforms {
        let target = match Platform::parse(target_name) {
            Some(target) => target,
            None => continue, // already warned by the allow-list check
        };
        let table = compat::supported_features(target);

        for feature in &pkg.metadata.features {
            let is_component_kind = CLAUDE_SPECIFIC_KINDS.contains(&feature.as_str())
                || feature == "commands"
                || feature == "instructions";
            if is_component_kind && !table.contains(&feature.as_str()) {
                warnings.push(format!("feature '{feature}' is not supported on {target}"));
            }
        }

        if target != Platform::ClaudeCode {
            for (present, kind) in [
                (counts.agents > 0, "agents"),
                (counts.mcp_servers > 0, "mcp servers"),
                (counts.steering_rules > 0, "steering rules"),
            ] {
                if present && !table.contains(&kind.replace(' ', "-").as_str()) {
                    warnings.push(format!(
                        "{kind} are claude-code specific and will be approximated on {target}"
                    ));
                }
            }
        }
    }
}

/// Rough throughput model of the cloud platform's processing step. Warns
/// against the execution ceiling, never enforces it.
fn check_processing_time(
    pkg: &TaptikPackage,
    counts: &ComponentCounts,
    warnings: &mut Vec<String>,
) {
    let estimated_secs =
        pkg.size as f64 / (2.0 * 1024.0 * 1024.0) + f64::from(counts.total()) * 0.05;
    if estimated_secs > PLATFORM_EXECUTION_CEILING_SECS as f64 {
        warnings.push(format!(
            "estimated processing time {estimated_secs:.0}s exceeds the {PLATFORM_EXECUTION_CEILING_SECS}s platform ceiling"
        ));
    }
}

fn score(
    errors: &[String],
    warnings: &[String],
    pkg: &TaptikPackage,
    limit: u64,
    schema_compliant: bool,
    cloud_compatible: bool,
) -> u8 {
    let mut score = 100i64 - 10 * errors.len() as i64 - 3 * warnings.len() as i64;
    if pkg.compression == Compression::Brotli {
        score += 2;
    }
    if pkg.size < limit / 2 {
        score += 3;
    }
    if schema_compliant {
        score += 5;
    }
    if cloud_compatible {
        score += 5;
    }
    score.clamp(0, 100) as u8
}

/// Deterministic recommendation strings derived from which checks fired.
fn recommendations_for(errors: &[String], warnings: &[String], total_components: u32) -> Vec<String> {
    let mut recommendations = Vec::new();
    let any = |haystack: &[String], needle: &str| haystack.iter().any(|s| s.contains(needle));

    if any(errors, "checksum") {
        recommendations.push("Re-create the package so the checksum matches its contents".to_string());
    }
    if any(errors, "exceeds the") {
        recommendations
            .push("Reduce the package size or upgrade to a premium tier".to_string());
    }
    if any(errors, "missing") {
        recommendations.push("Add the missing required fields and re-package".to_string());
    }
    if any(warnings, "unsafe content") {
        recommendations
            .push("Review metadata text for markup or SQL fragments".to_string());
    }
    if any(warnings, "exceeds the recommended maximum") {
        recommendations
            .push("Trim rarely used components to stay within recommended counts".to_string());
    }
    if total_components > MAX_TOTAL_COMPONENTS {
        recommendations
            .push("Consider splitting this configuration into smaller packages".to_string());
    }
    if errors.is_empty() {
        recommendations.push("Package is valid and ready for upload".to_string());
        recommendations.push("No changes required".to_string());
    }
    recommendations
}
