//! Platform identifiers for AI-assisted IDE tools.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An AI-assisted IDE platform known to the pipeline.
///
/// Contexts and packages carry platform identifiers as plain strings so that
/// configurations exported by newer tools survive the pipeline; this enum is
/// the closed set the conversion and validation engines reason about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    ClaudeCode,
    Kiro,
    Cursor,
    Windsurf,
}

impl Platform {
    /// All platforms the pipeline knows about, in canonical order.
    pub const ALL: [Platform; 4] = [
        Platform::ClaudeCode,
        Platform::Kiro,
        Platform::Cursor,
        Platform::Windsurf,
    ];

    /// Parse a platform identifier, accepting common aliases.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "claude-code" | "claude" | "claudecode" => Some(Self::ClaudeCode),
            "kiro" => Some(Self::Kiro),
            "cursor" => Some(Self::Cursor),
            "windsurf" => Some(Self::Windsurf),
            _ => None,
        }
    }

    /// Canonical identifier used in contexts, packages, and tags.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClaudeCode => "claude-code",
            Self::Kiro => "kiro",
            Self::Cursor => "cursor",
            Self::Windsurf => "windsurf",
        }
    }

    /// Whether a raw identifier names a known platform.
    pub fn is_known(s: &str) -> bool {
        Self::parse(s).is_some()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
