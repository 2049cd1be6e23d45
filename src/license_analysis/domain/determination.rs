use super::{LicenseId, PackageId, SourceKind};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Strength of agreement behind a license determination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Uncertain,
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfidenceLevel::High => write!(f, "HIGH"),
            ConfidenceLevel::Medium => write!(f, "MEDIUM"),
            ConfidenceLevel::Uncertain => write!(f, "UNCERTAIN"),
        }
    }
}

/// The reconciled license of one package for one scan
///
/// Produced once per package per scan. Applying an override consumes the
/// computed determination and yields a new one; nothing is mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseDetermination {
    package_id: PackageId,
    canonical_license: LicenseId,
    confidence: ConfidenceLevel,
    conflicting: bool,
    contributing_sources: BTreeSet<SourceKind>,
    override_applied: bool,
    detected_license: LicenseId,
    override_reason: Option<String>,
    source_candidates: BTreeMap<SourceKind, LicenseId>,
    reasons: Vec<String>,
    modifications: Vec<String>,
}

impl LicenseDetermination {
    /// Creates a computed (non-overridden) determination
    pub fn new(
        package_id: PackageId,
        canonical_license: LicenseId,
        confidence: ConfidenceLevel,
        conflicting: bool,
        source_candidates: BTreeMap<SourceKind, LicenseId>,
        reasons: Vec<String>,
    ) -> Self {
        let contributing_sources = source_candidates
            .iter()
            .filter(|(_, license)| !license.is_unknown())
            .map(|(kind, _)| *kind)
            .collect();

        Self {
            package_id,
            detected_license: canonical_license.clone(),
            canonical_license,
            confidence,
            conflicting,
            contributing_sources,
            override_applied: false,
            override_reason: None,
            source_candidates,
            reasons,
            modifications: Vec::new(),
        }
    }

    /// Records how the license texts behind this determination depart from
    /// standard wording. Audit only; confidence is unaffected.
    pub fn with_modifications(self, modifications: Vec<String>) -> Self {
        Self {
            modifications,
            ..self
        }
    }

    /// Replaces the license with a manual override
    ///
    /// The conflict flag, detected license and contributing sources are kept
    /// for audit; they no longer drive the verdict.
    pub fn with_override(self, license: LicenseId, reason: String) -> Self {
        let mut reasons = self.reasons;
        reasons.push(format!("Manual override: {}", reason));

        Self {
            canonical_license: license,
            confidence: ConfidenceLevel::High,
            override_applied: true,
            override_reason: Some(reason),
            reasons,
            ..self
        }
    }

    pub fn package_id(&self) -> &PackageId {
        &self.package_id
    }

    pub fn canonical_license(&self) -> &LicenseId {
        &self.canonical_license
    }

    pub fn confidence(&self) -> ConfidenceLevel {
        self.confidence
    }

    pub fn conflicting(&self) -> bool {
        self.conflicting
    }

    pub fn contributing_sources(&self) -> &BTreeSet<SourceKind> {
        &self.contributing_sources
    }

    pub fn override_applied(&self) -> bool {
        self.override_applied
    }

    pub fn detected_license(&self) -> &LicenseId {
        &self.detected_license
    }

    pub fn override_reason(&self) -> Option<&str> {
        self.override_reason.as_deref()
    }

    pub fn source_candidates(&self) -> &BTreeMap<SourceKind, LicenseId> {
        &self.source_candidates
    }

    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    pub fn modifications(&self) -> &[String] {
        &self.modifications
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkg(name: &str) -> PackageId {
        PackageId::new(name.to_string()).unwrap()
    }

    #[test]
    fn test_contributing_sources_skip_unknown_candidates() {
        let mut candidates = BTreeMap::new();
        candidates.insert(SourceKind::MetadataField, LicenseId::canonical("MIT"));
        candidates.insert(SourceKind::ReadmeMention, LicenseId::Unknown);

        let determination = LicenseDetermination::new(
            pkg("six"),
            LicenseId::canonical("MIT"),
            ConfidenceLevel::Medium,
            false,
            candidates,
            vec![],
        );

        assert_eq!(determination.contributing_sources().len(), 1);
        assert!(determination
            .contributing_sources()
            .contains(&SourceKind::MetadataField));
        assert_eq!(determination.source_candidates().len(), 2);
    }

    #[test]
    fn test_with_override_preserves_audit_fields() {
        let mut candidates = BTreeMap::new();
        candidates.insert(SourceKind::MetadataField, LicenseId::canonical("MIT"));
        candidates.insert(SourceKind::LicenseFile, LicenseId::canonical("Apache-2.0"));

        let computed = LicenseDetermination::new(
            pkg("attrs"),
            LicenseId::canonical("MIT"),
            ConfidenceLevel::Uncertain,
            true,
            candidates,
            vec!["Sources disagree".to_string()],
        );
        let overridden = computed.with_override(
            LicenseId::canonical("Apache-2.0"),
            "Verified upstream".to_string(),
        );

        assert_eq!(overridden.canonical_license().as_str(), "Apache-2.0");
        assert_eq!(overridden.detected_license().as_str(), "MIT");
        assert_eq!(overridden.confidence(), ConfidenceLevel::High);
        assert!(overridden.override_applied());
        assert!(overridden.conflicting());
        assert_eq!(overridden.contributing_sources().len(), 2);
        assert_eq!(overridden.override_reason(), Some("Verified upstream"));
    }

    #[test]
    fn test_serialized_field_layout() {
        let determination = LicenseDetermination::new(
            pkg("idna"),
            LicenseId::Unknown,
            ConfidenceLevel::Uncertain,
            false,
            BTreeMap::new(),
            vec![],
        );
        let json = serde_json::to_value(&determination).unwrap();
        assert_eq!(json["package_id"], "idna");
        assert_eq!(json["canonical_license"], "UNKNOWN");
        assert_eq!(json["confidence"], "UNCERTAIN");
        assert_eq!(json["conflicting"], false);
        assert_eq!(json["override_applied"], false);
        assert!(json["contributing_sources"].as_array().unwrap().is_empty());
        assert!(json["modifications"].as_array().unwrap().is_empty());
    }
}
