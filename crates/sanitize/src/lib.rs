//! Sensitive-data detection and redaction for configuration trees.
//!
//! The engine walks an arbitrary JSON-shaped tree and tests every string
//! value (in the context of its object key) against an ordered category
//! list; the first matching rule redacts the value and classifies its
//! severity. Redaction is best-effort heuristic classification, not a
//! cryptographic guarantee of completeness.
//!
//! # Example
//!
//! ```
//! use taptik_sanitize::{Sanitizer, SecurityLevel};
//! use serde_json::json;
//!
//! let sanitizer = Sanitizer::new();
//! let result = sanitizer.sanitize(&json!({ "apiKey": "sk-1234567890abcdef" }));
//! assert_eq!(result.sanitized_data["apiKey"], "[REDACTED]");
//! assert_eq!(result.security_level, SecurityLevel::Warning);
//! ```

#![deny(unsafe_code)]

pub mod engine;
pub mod report;
pub mod rules;

pub use engine::Sanitizer;
pub use report::{SanitizationReport, SanitizationResult, SecurityLevel, SeverityBreakdown};
pub use rules::{classify, Category, Classification, SensitiveSeverity};
