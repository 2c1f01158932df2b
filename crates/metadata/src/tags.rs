//! Tag derivation: platforms, component presence, feature flags, detected
//! technologies, and workflow hints.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;
use taptik_core::{ComponentCounts, ConfigurationContext, Platform};

/// Recognized technology tokens mapped to their canonical tag.
pub(crate) static TECHNOLOGY: LazyLock<BTreeMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        BTreeMap::from([
            // build tools
            ("webpack", "webpack"),
            ("vite", "vite"),
            ("rollup", "rollup"),
            ("esbuild", "esbuild"),
            ("gradle", "gradle"),
            ("maven", "maven"),
            ("bazel", "bazel"),
            // test frameworks
            ("jest", "jest"),
            ("vitest", "vitest"),
            ("pytest", "pytest"),
            ("mocha", "mocha"),
            ("cypress", "cypress"),
            ("playwright", "playwright"),
            ("junit", "junit"),
            // linters and formatters
            ("eslint", "eslint"),
            ("prettier", "prettier"),
            ("clippy", "clippy"),
            ("rustfmt", "rustfmt"),
            ("ruff", "ruff"),
            ("black", "black"),
            ("pylint", "pylint"),
            // containers and orchestration
            ("docker", "docker"),
            ("podman", "podman"),
            ("kubernetes", "kubernetes"),
            ("k8s", "kubernetes"),
            ("kubectl", "kubernetes"),
            ("helm", "helm"),
            ("terraform", "terraform"),
            // frontend frameworks
            ("react", "react"),
            ("vue", "vue"),
            ("angular", "angular"),
            ("svelte", "svelte"),
            ("nextjs", "nextjs"),
            ("nuxt", "nuxt"),
            // backend frameworks
            ("django", "django"),
            ("flask", "flask"),
            ("fastapi", "fastapi"),
            ("express", "express"),
            ("nestjs", "nestjs"),
            ("rails", "rails"),
            ("spring", "spring"),
            ("axum", "axum"),
            ("actix", "actix"),
            // languages
            ("typescript", "typescript"),
            ("javascript", "javascript"),
            ("python", "python"),
            ("rust", "rust"),
            ("golang", "golang"),
            ("java", "java"),
            ("kotlin", "kotlin"),
            ("swift", "swift"),
            ("ruby", "ruby"),
            ("php", "php"),
            // package managers
            ("npm", "npm"),
            ("pnpm", "pnpm"),
            ("yarn", "yarn"),
            ("pip", "pip"),
            ("poetry", "poetry"),
            ("cargo", "cargo"),
            ("bun", "bun"),
        ])
    });

/// Technology tags that mark a frontend stack.
const FRONTEND_TAGS: &[&str] = &["react", "vue", "angular", "svelte", "nextjs", "nuxt"];

/// Technology tags that mark a backend stack.
const BACKEND_TAGS: &[&str] = &[
    "django", "flask", "fastapi", "express", "nestjs", "rails", "spring", "axum", "actix",
];

/// Explicit boolean settings flags mapped to tag names.
pub(crate) const FEATURE_FLAGS: &[(&str, &str)] = &[
    ("gitIntegration", "git-integration"),
    ("dockerSupport", "docker"),
    ("kubernetesSupport", "kubernetes"),
    ("cicdPipeline", "ci-cd"),
    ("testAutomation", "test-automation"),
];

/// Split text into lowercase alphanumeric tokens.
pub(crate) fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

/// All text that counts toward technology and workflow detection: steering
/// rule bodies, command names and command lines, and instruction documents.
fn scannable_text(ctx: &ConfigurationContext) -> String {
    let mut text = String::new();
    for (_, scope) in ctx.scopes() {
        for rule in &scope.steering_rules {
            text.push_str(&rule.pattern);
            text.push(' ');
            text.push_str(&rule.rule);
            text.push(' ');
        }
        for command in &scope.commands {
            text.push_str(&command.name);
            text.push(' ');
            text.push_str(&command.command);
            text.push(' ');
            for arg in &command.args {
                text.push_str(arg);
                text.push(' ');
            }
        }
        if let Some(instructions) = &scope.instructions {
            if let Some(global) = &instructions.global {
                text.push_str(global);
                text.push(' ');
            }
            if let Some(local) = &instructions.local {
                text.push_str(local);
                text.push(' ');
            }
        }
    }
    text
}

fn workflow_tag(token: &str) -> Option<&'static str> {
    if token.starts_with("test") {
        return Some("testing");
    }
    if token == "coverage" {
        return Some("code-quality");
    }
    if token == "tdd" {
        return Some("tdd");
    }
    if matches!(token, "ci" | "cd" | "cicd" | "pipeline" | "continuous") {
        return Some("ci-cd");
    }
    if token.starts_with("deploy") {
        return Some("deployment");
    }
    if token.starts_with("lint") {
        return Some("linting");
    }
    if matches!(token, "format" | "formatting" | "fmt") {
        return Some("formatting");
    }
    None
}

/// Assemble the deduplicated, sorted tag set for a context.
pub fn collect_tags(ctx: &ConfigurationContext, counts: &ComponentCounts) -> Vec<String> {
    let mut tags = BTreeSet::new();

    // Platform identifiers, canonicalized when recognized.
    tags.insert(platform_tag(&ctx.source_platform));
    for target in &ctx.target_platforms {
        tags.insert(platform_tag(target));
    }
    if ctx.target_platforms.len() > 1 {
        tags.insert("multi-ide".to_string());
    }

    // Component presence.
    if counts.agents > 0 {
        tags.insert("custom-agents".to_string());
    }
    if counts.mcp_servers > 0 {
        tags.insert("mcp-enabled".to_string());
    }
    if counts.steering_rules > 0 {
        tags.insert("custom-rules".to_string());
    }
    if counts.instructions > 0 {
        tags.insert("guided-development".to_string());
    }

    // Explicit boolean feature flags in any scope's settings.
    for (_, scope) in ctx.scopes() {
        if let Some(settings) = scope.settings.as_object() {
            for (flag, tag) in FEATURE_FLAGS {
                if settings.get(*flag).and_then(|v| v.as_bool()) == Some(true) {
                    tags.insert((*tag).to_string());
                }
            }
        }
    }

    // Technology and workflow detection over rule/command/instruction text.
    let text = scannable_text(ctx);
    for token in tokenize(&text) {
        if let Some(tag) = TECHNOLOGY.get(token.as_str()) {
            tags.insert((*tag).to_string());
        }
        if let Some(tag) = workflow_tag(&token) {
            tags.insert(tag.to_string());
        }
    }

    let has_frontend = FRONTEND_TAGS.iter().any(|t| tags.contains(*t));
    let has_backend = BACKEND_TAGS.iter().any(|t| tags.contains(*t));
    if has_frontend && has_backend {
        tags.insert("fullstack".to_string());
    }

    tags.into_iter().collect()
}

fn platform_tag(raw: &str) -> String {
    match Platform::parse(raw) {
        Some(platform) => platform.as_str().to_string(),
        None => raw.to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use taptik_core::{CommandDef, ScopeConfig, SteeringRule};

    fn context_with_scope(scope: ScopeConfig) -> ConfigurationContext {
        let mut ctx = ConfigurationContext::new("1.0.0", "claude-code");
        ctx.target_platforms = vec!["kiro".into(), "cursor".into()];
        ctx.data.insert("local".into(), scope);
        ctx
    }

    #[test]
    fn platform_and_multi_ide_tags() {
        let ctx = context_with_scope(ScopeConfig::default());
        let counts = ComponentCounts::for_context(&ctx);
        let tags = collect_tags(&ctx, &counts);
        assert!(tags.contains(&"claude-code".to_string()));
        assert!(tags.contains(&"kiro".to_string()));
        assert!(tags.contains(&"cursor".to_string()));
        assert!(tags.contains(&"multi-ide".to_string()));
    }

    #[test]
    fn technology_detected_in_commands_and_rules() {
        let scope = ScopeConfig {
            commands: vec![CommandDef {
                name: "test".into(),
                command: "cargo test && pytest".into(),
                args: Vec::new(),
            }],
            steering_rules: vec![SteeringRule {
                pattern: "**/*.tsx".into(),
                rule: "Use React hooks and Express middleware conventions".into(),
            }],
            ..Default::default()
        };
        let ctx = context_with_scope(scope);
        let counts = ComponentCounts::for_context(&ctx);
        let tags = collect_tags(&ctx, &counts);
        assert!(tags.contains(&"cargo".to_string()));
        assert!(tags.contains(&"pytest".to_string()));
        assert!(tags.contains(&"react".to_string()));
        assert!(tags.contains(&"express".to_string()));
        assert!(tags.contains(&"testing".to_string()));
        assert!(
            tags.contains(&"fullstack".to_string()),
            "frontend + backend should add fullstack: {tags:?}"
        );
    }

    #[test]
    fn feature_flags_map_through_fixed_table() {
        let scope = ScopeConfig {
            settings: json!({ "gitIntegration": true, "dockerSupport": true, "telemetry": true }),
            ..Default::default()
        };
        let ctx = context_with_scope(scope);
        let counts = ComponentCounts::for_context(&ctx);
        let tags = collect_tags(&ctx, &counts);
        assert!(tags.contains(&"git-integration".to_string()));
        assert!(tags.contains(&"docker".to_string()));
        assert!(!tags.contains(&"telemetry".to_string()), "unmapped flags stay out");
    }

    #[test]
    fn tags_are_sorted_and_deduplicated() {
        let ctx = context_with_scope(ScopeConfig::default());
        let counts = ComponentCounts::for_context(&ctx);
        let tags = collect_tags(&ctx, &counts);
        let mut sorted = tags.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(tags, sorted);
    }
}
