//! Descriptive metadata attached to a portable package.

use crate::context::ConfigurationContext;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Checksum value carried by freshly generated metadata until the packager
/// computes the real one. Validation rejects packages still carrying it.
pub const CHECKSUM_PLACEHOLDER: &str = "pending";

/// Descriptive record generated from a configuration context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudMetadata {
    pub title: String,
    pub description: Option<String>,
    /// Deduplicated, sorted.
    pub tags: Vec<String>,
    /// Lowercase, deduplicated, sorted, capped at
    /// [`crate::limits::MAX_SEARCH_KEYWORDS`].
    pub search_keywords: Vec<String>,
    pub component_counts: ComponentCounts,
    pub complexity_level: ComplexityLevel,
    pub features: Vec<String>,
    pub compatibility: Vec<String>,
    pub version: String,
    pub author: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub file_size: u64,
    pub checksum: String,
}

/// Per-kind component totals, summed across every scope of a context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentCounts {
    pub agents: u32,
    pub commands: u32,
    pub mcp_servers: u32,
    pub steering_rules: u32,
    pub instructions: u32,
}

impl ComponentCounts {
    /// Count components across all scopes of a context.
    pub fn for_context(ctx: &ConfigurationContext) -> Self {
        let mut counts = Self::default();
        for (_, scope) in ctx.scopes() {
            counts.agents += scope.agents.len() as u32;
            counts.commands += scope.commands.len() as u32;
            counts.mcp_servers += scope.mcp_servers.len() as u32;
            counts.steering_rules += scope.steering_rules.len() as u32;
            if let Some(instructions) = &scope.instructions {
                counts.instructions += instructions.section_count() as u32;
            }
        }
        counts
    }

    pub fn total(&self) -> u32 {
        self.agents + self.commands + self.mcp_servers + self.steering_rules + self.instructions
    }
}

/// Complexity bucket derived from the total component count.
///
/// Canonical thresholds: 0 → minimal, 1–3 → basic, 4–10 → intermediate,
/// 11–30 → advanced, above 30 → expert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityLevel {
    Minimal,
    Basic,
    Intermediate,
    Advanced,
    Expert,
}

impl ComplexityLevel {
    pub fn from_total(total: u32) -> Self {
        match total {
            0 => Self::Minimal,
            1..=3 => Self::Basic,
            4..=10 => Self::Intermediate,
            11..=30 => Self::Advanced,
            _ => Self::Expert,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Basic => "basic",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }
}
