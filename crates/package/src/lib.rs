//! Package assembly: serializes a sanitized/converted context, computes its
//! checksum, accounts for compression, and records the manifest.
//!
//! Packaging failures are always fatal to the package being built; no
//! partial packages are returned.

#![deny(unsafe_code)]

use flate2::write::GzEncoder;
use sha2::{Digest, Sha256};
use std::io::Write;
use taptik_core::{
    CloudMetadata, Compression, ConfigurationContext, PackageFormat, PackageManifest,
    TaptikPackage,
};
use thiserror::Error;

/// Fatal packaging failures.
#[derive(Debug, Error)]
pub enum PackageError {
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("compression failed: {0}")]
    Compress(#[from] std::io::Error),
}

/// Options for package assembly.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageOptions {
    pub format: PackageFormat,
    pub compression: Compression,
}

/// Assembles [`TaptikPackage`]s.
#[derive(Debug, Default)]
pub struct Packager;

impl Packager {
    pub fn new() -> Self {
        Self
    }

    /// Build the final portable artifact.
    ///
    /// The computed checksum is written into both the package and its
    /// embedded metadata, and `metadata.file_size` is set to the recorded
    /// (post-compression) size.
    pub fn package(
        &self,
        metadata: CloudMetadata,
        context: ConfigurationContext,
        options: &PackageOptions,
    ) -> Result<TaptikPackage, PackageError> {
        let serialized = serde_json::to_vec(&context)?;
        let checksum = content_checksum(&serialized);
        let size = compressed_size(&serialized, options.compression)?;

        let mut metadata = metadata;
        metadata.checksum = checksum.clone();
        metadata.file_size = size;

        let manifest = build_manifest(&metadata, &context)?;

        tracing::debug!(
            target: "taptik::package",
            raw_bytes = serialized.len(),
            size,
            compression = options.compression.as_str(),
            format = options.format.as_str(),
            files = manifest.files.len(),
            "package assembled"
        );

        Ok(TaptikPackage {
            metadata,
            sanitized_config: context,
            checksum,
            format: options.format,
            compression: options.compression,
            size,
            manifest,
        })
    }
}

/// SHA-256 of the serialized configuration, lowercase hex.
fn content_checksum(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Size in bytes the serialized configuration occupies under the selected
/// compression mode.
fn compressed_size(data: &[u8], mode: Compression) -> Result<u64, PackageError> {
    match mode {
        Compression::None => Ok(data.len() as u64),
        Compression::Gzip => {
            let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(data)?;
            let compressed = encoder.finish()?;
            Ok(compressed.len() as u64)
        }
        Compression::Brotli => {
            let mut compressed = Vec::new();
            {
                let mut writer = brotli::CompressorWriter::new(&mut compressed, 4096, 5, 22);
                writer.write_all(data)?;
            }
            Ok(compressed.len() as u64)
        }
    }
}

/// Record the member file/directory lists and cumulative serialized sizes.
fn build_manifest(
    metadata: &CloudMetadata,
    context: &ConfigurationContext,
) -> Result<PackageManifest, PackageError> {
    let mut manifest = PackageManifest::default();

    let metadata_bytes = serde_json::to_vec(metadata)?;
    manifest.files.push("metadata.json".to_string());
    manifest.total_size += metadata_bytes.len() as u64;

    for (scope_name, scope) in context.scopes() {
        manifest.directories.push(scope_name.clone());

        if !scope.settings.is_null() {
            manifest.files.push(format!("{scope_name}/settings.json"));
            manifest.total_size += serde_json::to_vec(&scope.settings)?.len() as u64;
        }
        if !scope.agents.is_empty() {
            manifest.files.push(format!("{scope_name}/agents.json"));
            manifest.total_size += serde_json::to_vec(&scope.agents)?.len() as u64;
        }
        if !scope.commands.is_empty() {
            manifest.files.push(format!("{scope_name}/commands.json"));
            manifest.total_size += serde_json::to_vec(&scope.commands)?.len() as u64;
        }
        if !scope.mcp_servers.is_empty() {
            manifest.files.push(format!("{scope_name}/mcp-servers.json"));
            manifest.total_size += serde_json::to_vec(&scope.mcp_servers)?.len() as u64;
        }
        if !scope.steering_rules.is_empty() {
            manifest.files.push(format!("{scope_name}/steering-rules.json"));
            manifest.total_size += serde_json::to_vec(&scope.steering_rules)?.len() as u64;
        }
        if let Some(instructions) = &scope.instructions {
            manifest.files.push(format!("{scope_name}/instructions.json"));
            manifest.total_size += serde_json::to_vec(instructions)?.len() as u64;
        }
    }

    Ok(manifest)
}
