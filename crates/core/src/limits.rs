//! Size ceilings and fixed limits shared by the packager and validator.

/// Default package ceiling for free-tier uploads (10 MiB).
pub const DEFAULT_PACKAGE_LIMIT: u64 = 10 * 1024 * 1024;

/// Package ceiling for premium-tier uploads (100 MiB).
pub const PREMIUM_PACKAGE_LIMIT: u64 = 100 * 1024 * 1024;

/// Storage ceiling imposed by the cloud platform, independent of tier (50 MiB).
pub const PLATFORM_STORAGE_LIMIT: u64 = 50 * 1024 * 1024;

/// Ceiling for the serialized metadata section alone (1 MiB).
pub const METADATA_LIMIT: u64 = 1024 * 1024;

/// Fraction of the active ceiling at which a size warning fires.
pub const SIZE_WARNING_RATIO: f64 = 0.9;

/// Maximum number of search keywords kept in generated metadata.
pub const MAX_SEARCH_KEYWORDS: usize = 50;

/// Per-kind component ceilings; exceeding one is a warning, not an error.
pub const MAX_AGENTS: u32 = 50;
pub const MAX_COMMANDS: u32 = 100;
pub const MAX_MCP_SERVERS: u32 = 20;
pub const MAX_STEERING_RULES: u32 = 100;
pub const MAX_INSTRUCTIONS: u32 = 20;

/// Total-component ceiling past which a "consider splitting" recommendation
/// is emitted.
pub const MAX_TOTAL_COMPONENTS: u32 = 200;

/// Execution-time ceiling (seconds) of the cloud platform's processing step.
/// Used only to warn; never enforced locally.
pub const PLATFORM_EXECUTION_CEILING_SECS: u64 = 30;
