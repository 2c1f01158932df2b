//! Shared data model for the taptik configuration portability pipeline.
//!
//! Every pipeline stage (sanitize, convert, generate metadata, package,
//! validate) consumes and produces the types defined here. Stages treat a
//! [`ConfigurationContext`] as read-only input and return new values; nothing
//! in this crate mutates a context in place.

#![deny(unsafe_code)]

pub mod context;
pub mod limits;
pub mod metadata;
pub mod package;
pub mod platform;

pub use context::{
    AgentDef, CommandDef, ConfigurationContext, ContextMetadata, Instructions, McpServerDef,
    ScopeConfig, SteeringRule,
};
pub use metadata::{CloudMetadata, ComplexityLevel, ComponentCounts, CHECKSUM_PLACEHOLDER};
pub use package::{Compression, PackageFormat, PackageManifest, TaptikPackage};
pub use platform::Platform;
