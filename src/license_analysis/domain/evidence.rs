use super::PackageId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a piece of license evidence came from
///
/// Variant order is the reliability ranking used as the reconciliation
/// tie-break: earlier variants win.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    MetadataField,
    Classifier,
    LicenseFile,
    ReadmeMention,
}

impl SourceKind {
    /// All source kinds in priority order
    pub const PRIORITY_ORDER: [SourceKind; 4] = [
        SourceKind::MetadataField,
        SourceKind::Classifier,
        SourceKind::LicenseFile,
        SourceKind::ReadmeMention,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::MetadataField => "metadata_field",
            SourceKind::Classifier => "classifier",
            SourceKind::LicenseFile => "license_file",
            SourceKind::ReadmeMention => "readme_mention",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw license signals for one package, keyed by source kind
pub type RawSources = BTreeMap<SourceKind, String>;

/// One typed piece of license evidence. Immutable once collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvidenceRecord {
    package_id: PackageId,
    source_kind: SourceKind,
    raw_text: String,
    extracted_candidate: Option<String>,
    modifications: Vec<String>,
}

impl EvidenceRecord {
    pub fn new(
        package_id: PackageId,
        source_kind: SourceKind,
        raw_text: String,
        extracted_candidate: Option<String>,
    ) -> Self {
        Self {
            package_id,
            source_kind,
            raw_text,
            extracted_candidate,
            modifications: Vec::new(),
        }
    }

    /// Attaches departures from standard license wording found in the text
    pub fn with_modifications(self, modifications: Vec<String>) -> Self {
        Self {
            modifications,
            ..self
        }
    }

    pub fn package_id(&self) -> &PackageId {
        &self.package_id
    }

    pub fn source_kind(&self) -> SourceKind {
        self.source_kind
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn extracted_candidate(&self) -> Option<&str> {
        self.extracted_candidate.as_deref()
    }

    pub fn modifications(&self) -> &[String] {
        &self.modifications
    }
}
