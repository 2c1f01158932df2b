//! The portable package artifact and its wire-format tags.

use crate::context::ConfigurationContext;
use crate::metadata::CloudMetadata;
use serde::{Deserialize, Serialize};

/// Versioned package format tag. Closed enumeration; arbitrary strings are
/// rejected at deserialization time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackageFormat {
    #[serde(rename = "taptik-v1")]
    TaptikV1,
    #[serde(rename = "taptik-v2")]
    TaptikV2,
}

impl PackageFormat {
    /// Format tags accepted by the validation engine.
    pub const SUPPORTED: [PackageFormat; 2] = [PackageFormat::TaptikV1, PackageFormat::TaptikV2];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "taptik-v1" => Some(Self::TaptikV1),
            "taptik-v2" => Some(Self::TaptikV2),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TaptikV1 => "taptik-v1",
            Self::TaptikV2 => "taptik-v2",
        }
    }
}

impl Default for PackageFormat {
    fn default() -> Self {
        Self::TaptikV1
    }
}

/// Compression mode recorded in a package.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    #[default]
    Gzip,
    Brotli,
    None,
}

impl Compression {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gzip => "gzip",
            Self::Brotli => "brotli",
            Self::None => "none",
        }
    }
}

/// File and directory accounting for a package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    pub files: Vec<String>,
    pub directories: Vec<String>,
    /// Cumulative serialized size of all member files, in bytes.
    pub total_size: u64,
}

/// The final portable artifact assembled by the packager.
///
/// Invariant: `checksum` and `metadata.checksum` must match; a mismatch marks
/// the package corrupt and validation fails it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaptikPackage {
    pub metadata: CloudMetadata,
    pub sanitized_config: ConfigurationContext,
    pub checksum: String,
    pub format: PackageFormat,
    pub compression: Compression,
    /// Size in bytes of the serialized configuration after compression.
    pub size: u64,
    pub manifest: PackageManifest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_tags_round_trip() {
        for format in PackageFormat::SUPPORTED {
            assert_eq!(PackageFormat::parse(format.as_str()), Some(format));
        }
        assert_eq!(PackageFormat::parse("taptik-v3"), None);
    }

    #[test]
    fn arbitrary_format_strings_are_rejected() {
        let err = serde_json::from_str::<PackageFormat>("\"zip\"");
        assert!(err.is_err());
    }

    #[test]
    fn compression_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Compression::Brotli).unwrap(),
            "\"brotli\""
        );
        assert_eq!(
            serde_json::from_str::<Compression>("\"none\"").unwrap(),
            Compression::None
        );
    }
}
