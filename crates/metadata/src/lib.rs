//! Heuristic metadata generation for configuration contexts.
//!
//! Derives descriptive metadata (tags, search keywords, features, complexity
//! level, compatibility hints) from a normalized [`ConfigurationContext`].
//! Everything here is advisory: generation never fails and never raises
//! errors, it only populates informational fields.
//!
//! # Example
//!
//! ```
//! use taptik_core::{ComplexityLevel, ConfigurationContext};
//! use taptik_metadata::{generate_metadata, MetadataOptions};
//!
//! let ctx = ConfigurationContext::new("1.0.0", "claude-code");
//! let metadata = generate_metadata(&ctx, &MetadataOptions::default());
//! assert_eq!(metadata.complexity_level, ComplexityLevel::Minimal);
//! assert_eq!(metadata.component_counts.total(), 0);
//! ```

#![deny(unsafe_code)]

pub mod keywords;
pub mod tags;

pub use keywords::collect_keywords;
pub use tags::collect_tags;

use taptik_core::{
    CloudMetadata, ComplexityLevel, ComponentCounts, ConfigurationContext, Platform,
    CHECKSUM_PLACEHOLDER,
};
use time::OffsetDateTime;

/// Caller-supplied descriptive fields.
#[derive(Debug, Clone, Default)]
pub struct MetadataOptions {
    /// Title; defaults to "<source> configuration".
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
}

/// Generate cloud metadata for a context.
///
/// `file_size` and `checksum` are left as placeholders for the packager to
/// fill in.
pub fn generate_metadata(ctx: &ConfigurationContext, options: &MetadataOptions) -> CloudMetadata {
    let counts = ComponentCounts::for_context(ctx);
    let tags = collect_tags(ctx, &counts);
    let search_keywords = collect_keywords(ctx);
    let complexity_level = ComplexityLevel::from_total(counts.total());
    let features = collect_features(&counts, &tags);
    let compatibility = collect_compatibility(ctx, &counts, &tags);

    tracing::debug!(
        target: "taptik::metadata",
        components = counts.total(),
        tags = tags.len(),
        keywords = search_keywords.len(),
        complexity = complexity_level.as_str(),
        "metadata generated"
    );

    CloudMetadata {
        title: options
            .title
            .clone()
            .unwrap_or_else(|| format!("{} configuration", ctx.source_platform)),
        description: options.description.clone(),
        tags,
        search_keywords,
        component_counts: counts,
        complexity_level,
        features,
        compatibility,
        version: ctx.version.clone(),
        author: options.author.clone(),
        created_at: OffsetDateTime::now_utc(),
        file_size: 0,
        checksum: CHECKSUM_PLACEHOLDER.to_string(),
    }
}

/// Feature names: component kinds that are present, plus flag-derived tags.
fn collect_features(counts: &ComponentCounts, tags: &[String]) -> Vec<String> {
    let mut features = Vec::new();
    if counts.agents > 0 {
        features.push("agents".to_string());
    }
    if counts.commands > 0 {
        features.push("commands".to_string());
    }
    if counts.mcp_servers > 0 {
        features.push("mcp-servers".to_string());
    }
    if counts.steering_rules > 0 {
        features.push("steering-rules".to_string());
    }
    if counts.instructions > 0 {
        features.push("instructions".to_string());
    }
    for flag_feature in ["git-integration", "ci-cd", "test-automation"] {
        if tags.iter().any(|t| t == flag_feature) {
            features.push(flag_feature.to_string());
        }
    }
    features
}

/// Source/target identifiers plus derived compatibility hints.
fn collect_compatibility(
    ctx: &ConfigurationContext,
    counts: &ComponentCounts,
    tags: &[String],
) -> Vec<String> {
    let mut compatibility = Vec::new();
    let mut push_unique = |entry: String, list: &mut Vec<String>| {
        if !list.contains(&entry) {
            list.push(entry);
        }
    };

    push_unique(platform_id(&ctx.source_platform), &mut compatibility);
    for target in &ctx.target_platforms {
        push_unique(platform_id(target), &mut compatibility);
    }
    if counts.mcp_servers > 0 {
        push_unique("mcp-compatible".to_string(), &mut compatibility);
    }
    if tags.iter().any(|t| t == "docker" || t == "kubernetes") {
        push_unique("container-ready".to_string(), &mut compatibility);
    }
    if let Ok(version) = semver::Version::parse(&ctx.version) {
        if version.major != 1 {
            push_unique(format!("v{}-compatible", version.major), &mut compatibility);
        }
    }
    compatibility
}

fn platform_id(raw: &str) -> String {
    Platform::parse(raw)
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| raw.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use taptik_core::{AgentDef, McpServerDef, ScopeConfig};

    #[test]
    fn empty_context_is_minimal() {
        let ctx = ConfigurationContext::new("1.0.0", "claude-code");
        let metadata = generate_metadata(&ctx, &MetadataOptions::default());

        assert_eq!(metadata.component_counts.total(), 0);
        assert_eq!(metadata.complexity_level, ComplexityLevel::Minimal);
        assert_eq!(metadata.title, "claude-code configuration");
        assert_eq!(metadata.checksum, CHECKSUM_PLACEHOLDER);
        assert_eq!(metadata.file_size, 0);
        assert!(metadata.features.is_empty());
    }

    #[test]
    fn mcp_presence_adds_compatibility_hint() {
        let mut ctx = ConfigurationContext::new("1.0.0", "claude-code");
        ctx.target_platforms = vec!["kiro".into()];
        ctx.data.insert(
            "local".into(),
            ScopeConfig {
                mcp_servers: vec![McpServerDef {
                    name: "filesystem".into(),
                    transport: "stdio".into(),
                    command: Some("mcp-fs".into()),
                    ..Default::default()
                }],
                ..Default::default()
            },
        );
        let metadata = generate_metadata(&ctx, &MetadataOptions::default());

        assert!(metadata.compatibility.contains(&"claude-code".to_string()));
        assert!(metadata.compatibility.contains(&"kiro".to_string()));
        assert!(metadata.compatibility.contains(&"mcp-compatible".to_string()));
        assert!(metadata.features.contains(&"mcp-servers".to_string()));
        assert!(metadata.tags.contains(&"mcp-enabled".to_string()));
    }

    #[test]
    fn non_v1_versions_get_a_version_hint() {
        let mut ctx = ConfigurationContext::new("2.1.0", "cursor");
        ctx.target_platforms = vec!["claude-code".into()];
        let metadata = generate_metadata(&ctx, &MetadataOptions::default());
        assert!(metadata.compatibility.contains(&"v2-compatible".to_string()));

        let v1 = ConfigurationContext::new("1.4.2", "cursor");
        let metadata = generate_metadata(&v1, &MetadataOptions::default());
        assert!(!metadata.compatibility.iter().any(|c| c.ends_with("-compatible") && c.starts_with('v')));
    }

    #[test]
    fn container_tags_mark_container_ready() {
        let mut ctx = ConfigurationContext::new("1.0.0", "claude-code");
        ctx.data.insert(
            "global".into(),
            ScopeConfig {
                settings: json!({ "dockerSupport": true }),
                ..Default::default()
            },
        );
        let metadata = generate_metadata(&ctx, &MetadataOptions::default());
        assert!(metadata.compatibility.contains(&"container-ready".to_string()));
    }

    #[test]
    fn caller_options_override_defaults() {
        let mut ctx = ConfigurationContext::new("1.0.0", "kiro");
        ctx.data.insert(
            "local".into(),
            ScopeConfig {
                agents: vec![AgentDef {
                    name: "reviewer".into(),
                    ..Default::default()
                }],
                ..Default::default()
            },
        );
        let options = MetadataOptions {
            title: Some("Team Kiro setup".into()),
            description: Some("Shared settings".into()),
            author: Some("platform-team".into()),
        };
        let metadata = generate_metadata(&ctx, &options);
        assert_eq!(metadata.title, "Team Kiro setup");
        assert_eq!(metadata.author.as_deref(), Some("platform-team"));
        assert_eq!(metadata.complexity_level, ComplexityLevel::Basic);
    }
}
