//! Platform and feature allow-lists used by the compatibility checks.

use taptik_core::Platform;

/// Feature identifiers the cloud platform understands. Declared features
/// outside this list are carried but flagged as unsupported.
pub const KNOWN_FEATURES: &[&str] = &[
    "agents",
    "commands",
    "mcp-servers",
    "steering-rules",
    "instructions",
    "settings",
    "git-integration",
    "docker",
    "kubernetes",
    "ci-cd",
    "test-automation",
    "mcp-compatible",
    "container-ready",
];

/// Component kinds that only claude-code consumes natively. Their presence
/// while targeting another platform is worth a warning.
pub const CLAUDE_SPECIFIC_KINDS: &[&str] = &["agents", "mcp-servers", "steering-rules"];

pub fn is_known_feature(feature: &str) -> bool {
    KNOWN_FEATURES.contains(&feature)
}

/// Component-kind features each platform consumes without approximation.
pub fn supported_features(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::ClaudeCode => &[
            "agents",
            "commands",
            "mcp-servers",
            "steering-rules",
            "instructions",
            "settings",
        ],
        Platform::Kiro => &["mcp-servers", "steering-rules", "instructions", "settings"],
        Platform::Cursor | Platform::Windsurf => &["mcp-servers", "steering-rules", "settings"],
    }
}
