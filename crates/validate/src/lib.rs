//! Upload-readiness validation for assembled packages.
//!
//! [`ValidationEngine::validate_for_upload`] runs an ordered sequence of
//! structural, schema, size, integrity, and compatibility checks and scores
//! the result. Warnings never fail a package; errors do. Results are cached
//! by checksum and tier for five minutes.
//!
//! # Example
//!
//! ```
//! use taptik_core::ConfigurationContext;
//! use taptik_metadata::{generate_metadata, MetadataOptions};
//! use taptik_package::{PackageOptions, Packager};
//! use taptik_validate::ValidationEngine;
//!
//! # fn main() -> Result<(), taptik_package::PackageError> {
//! let mut ctx = ConfigurationContext::new("1.0.0", "claude-code");
//! ctx.target_platforms = vec!["claude-code".into()];
//! let metadata = generate_metadata(&ctx, &MetadataOptions::default());
//! let pkg = Packager::new().package(metadata, ctx, &PackageOptions::default())?;
//!
//! let result = ValidationEngine::new().validate_for_upload(&pkg, false);
//! assert!(result.is_valid);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]

pub mod cache;
pub mod compat;
pub mod engine;
pub mod result;

pub use cache::{ValidationCache, RESULT_TTL};
pub use engine::ValidationEngine;
pub use result::{FeatureSupport, SizeLimitInfo, ValidationResult};
