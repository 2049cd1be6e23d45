use super::LicenseNormalizer;
use crate::license_analysis::domain::{EvidenceRecord, PackageId, RawSources, SourceKind};

/// EvidenceCollector service turning raw provider output into typed records
///
/// Never fails. A source kind with no (or blank) text produces no record.
pub struct EvidenceCollector;

impl EvidenceCollector {
    /// Packages raw sources into evidence records in source-priority order
    pub fn collect(package_id: &PackageId, raw_sources: &RawSources) -> Vec<EvidenceRecord> {
        SourceKind::PRIORITY_ORDER
            .iter()
            .filter_map(|kind| {
                let raw_text = raw_sources.get(kind)?;
                if raw_text.trim().is_empty() {
                    return None;
                }
                let extraction = LicenseNormalizer::extract(raw_text, *kind);
                Some(
                    EvidenceRecord::new(
                        package_id.clone(),
                        *kind,
                        raw_text.clone(),
                        extraction.candidate,
                    )
                    .with_modifications(extraction.modifications),
                )
            })
            .collect()
    }
}
