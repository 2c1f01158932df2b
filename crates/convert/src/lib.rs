//! Cross-platform configuration conversion.
//!
//! Maps a [`ConfigurationContext`](taptik_core::ConfigurationContext) from a
//! source platform's shape to a target platform's, tracking which features
//! mapped directly, which were approximated, and which are unsupported, and
//! scoring the result. Converters are registered per ordered
//! (source, target) pair; a missing pair is a typed lookup miss, never a
//! panic.
//!
//! # Example
//!
//! ```
//! use taptik_convert::{ConversionEngine, ConversionOptions};
//! use taptik_core::{ConfigurationContext, Platform};
//!
//! let engine = ConversionEngine::with_defaults();
//! let ctx = ConfigurationContext::new("1.0.0", "claude-code");
//! let result = engine.convert(&ctx, Platform::Kiro, &ConversionOptions::default());
//! assert!(result.success);
//! assert_eq!(result.context.unwrap().source_platform, "kiro");
//! ```

#![deny(unsafe_code)]

pub mod compat;
pub mod converter;
pub mod converters;
pub mod engine;
pub mod registry;

pub use compat::{score_conversion, CompatibilityRating, CompatibilityScore};
pub use converter::{Approximation, Confidence, ConvertedContext, FeatureAnalysis, PlatformConverter};
pub use engine::{ConversionEngine, ConversionOptions, ConversionResult};
pub use registry::{ConverterRegistry, RegistryLookup};
