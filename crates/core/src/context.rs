//! Normalized in-memory configuration for one tool.
//!
//! A [`ConfigurationContext`] is produced by an external collector (a
//! file-system scanner outside this workspace) and consumed read-only by
//! every pipeline stage. The `data` section is keyed by scope ("local",
//! "global", or a platform identifier for single-platform exports) and holds
//! the typed component records plus a weakly-typed `settings` tree.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// Normalized configuration tree for one tool/platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationContext {
    /// Export format version (semver-shaped, e.g. "1.0.0").
    pub version: String,
    /// Identifier of the platform this context was collected from.
    #[serde(alias = "sourceIde")]
    pub source_platform: String,
    /// Platforms the owner intends to deploy this configuration to.
    #[serde(alias = "targetIdes", default)]
    pub target_platforms: Vec<String>,
    pub metadata: ContextMetadata,
    /// Component records keyed by scope; may be empty.
    #[serde(default)]
    pub data: BTreeMap<String, ScopeConfig>,
}

/// Collector-provided metadata. Always present, even on empty contexts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextMetadata {
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_by: Option<String>,
}

/// One scope's worth of component records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeConfig {
    /// Free-form tool settings; shape varies per platform.
    #[serde(default)]
    pub settings: Value,
    #[serde(default)]
    pub agents: Vec<AgentDef>,
    #[serde(default)]
    pub commands: Vec<CommandDef>,
    #[serde(default)]
    pub mcp_servers: Vec<McpServerDef>,
    #[serde(default)]
    pub steering_rules: Vec<SteeringRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<Instructions>,
}

/// A custom agent/subagent definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default)]
    pub tools: Vec<String>,
}

/// A custom slash command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandDef {
    pub name: String,
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// An MCP server definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpServerDef {
    pub name: String,
    /// Transport/protocol identifier (e.g. "stdio", "sse", "http").
    pub transport: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

/// A steering/guidance rule scoped by a file pattern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SteeringRule {
    pub pattern: String,
    pub rule: String,
}

/// Free-text instruction documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instructions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local: Option<String>,
}

impl ConfigurationContext {
    /// Create an empty context for the given source platform.
    pub fn new(version: impl Into<String>, source_platform: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            source_platform: source_platform.into(),
            target_platforms: Vec::new(),
            metadata: ContextMetadata {
                timestamp: OffsetDateTime::now_utc(),
                exported_by: None,
            },
            data: BTreeMap::new(),
        }
    }

    /// Scope entry, if present.
    pub fn scope(&self, name: &str) -> Option<&ScopeConfig> {
        self.data.get(name)
    }

    /// Iterate all scopes in key order.
    pub fn scopes(&self) -> impl Iterator<Item = (&String, &ScopeConfig)> {
        self.data.iter()
    }
}

impl ScopeConfig {
    /// True when the scope carries no components and no settings.
    pub fn is_empty(&self) -> bool {
        self.settings.is_null()
            && self.agents.is_empty()
            && self.commands.is_empty()
            && self.mcp_servers.is_empty()
            && self.steering_rules.is_empty()
            && self.instructions.is_none()
    }
}

impl Instructions {
    /// True when neither document is present.
    pub fn is_empty(&self) -> bool {
        self.global.is_none() && self.local.is_none()
    }

    /// Number of non-empty instruction documents.
    pub fn section_count(&self) -> usize {
        usize::from(self.global.as_deref().is_some_and(|s| !s.is_empty()))
            + usize::from(self.local.as_deref().is_some_and(|s| !s.is_empty()))
    }
}
