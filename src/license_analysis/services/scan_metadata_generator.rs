use crate::license_analysis::domain::ScanMetadata;
use chrono::Utc;
use uuid::Uuid;

/// Stamps a scan with the tool identity, a timestamp and a unique id
pub struct ScanMetadataGenerator;

impl ScanMetadataGenerator {
    pub fn generate(tool_name: &str, tool_version: &str) -> ScanMetadata {
        ScanMetadata::new(
            tool_name.to_string(),
            tool_version.to_string(),
            Utc::now().to_rfc3339(),
            format!("urn:uuid:{}", Uuid::new_v4()),
        )
    }

    /// Metadata naming this binary and its compile-time version
    pub fn generate_default() -> ScanMetadata {
        Self::generate("license-reconciler", env!("CARGO_PKG_VERSION"))
    }
}
