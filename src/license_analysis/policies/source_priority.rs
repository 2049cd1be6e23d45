use crate::license_analysis::domain::{LicenseId, SourceKind};
use std::collections::BTreeMap;

/// SourcePriority policy for choosing between disagreeing evidence sources
///
/// Priority order:
/// 1. metadata field
/// 2. classifier
/// 3. license file
/// 4. README mention
///
/// This is a deterministic tie-break, not a judgment of which source is right.
pub struct SourcePriority;

impl SourcePriority {
    /// Picks the known candidate from the highest-priority source
    ///
    /// # Returns
    /// The winning source kind and its license, or None if every candidate is unknown
    pub fn select(candidates: &BTreeMap<SourceKind, LicenseId>) -> Option<(SourceKind, &LicenseId)> {
        SourceKind::PRIORITY_ORDER.iter().find_map(|kind| {
            candidates
                .get(kind)
                .filter(|license| !license.is_unknown())
                .map(|license| (*kind, license))
        })
    }

    /// Distinct known licenses in the candidate set, sorted
    pub fn distinct_known(candidates: &BTreeMap<SourceKind, LicenseId>) -> Vec<&LicenseId> {
        let mut licenses: Vec<&LicenseId> = candidates
            .values()
            .filter(|license| !license.is_unknown())
            .collect();
        licenses.sort();
        licenses.dedup();
        licenses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_prefers_metadata() {
        let mut candidates = BTreeMap::new();
        candidates.insert(SourceKind::ReadmeMention, LicenseId::canonical("BSD-3-Clause"));
        candidates.insert(SourceKind::MetadataField, LicenseId::canonical("MIT"));

        let (kind, license) = SourcePriority::select(&candidates).unwrap();
        assert_eq!(kind, SourceKind::MetadataField);
        assert_eq!(license.as_str(), "MIT");
    }

    #[test]
    fn test_select_skips_unknown_candidates() {
        let mut candidates = BTreeMap::new();
        candidates.insert(SourceKind::MetadataField, LicenseId::Unknown);
        candidates.insert(SourceKind::LicenseFile, LicenseId::canonical("Apache-2.0"));

        let (kind, _) = SourcePriority::select(&candidates).unwrap();
        assert_eq!(kind, SourceKind::LicenseFile);
    }

    #[test]
    fn test_select_none_when_all_unknown() {
        let mut candidates = BTreeMap::new();
        candidates.insert(SourceKind::Classifier, LicenseId::Unknown);
        assert!(SourcePriority::select(&candidates).is_none());
        assert!(SourcePriority::select(&BTreeMap::new()).is_none());
    }

    #[test]
    fn test_distinct_known() {
        let mut candidates = BTreeMap::new();
        candidates.insert(SourceKind::MetadataField, LicenseId::canonical("MIT"));
        candidates.insert(SourceKind::Classifier, LicenseId::canonical("MIT"));
        candidates.insert(SourceKind::LicenseFile, LicenseId::canonical("Apache-2.0"));
        candidates.insert(SourceKind::ReadmeMention, LicenseId::Unknown);

        let distinct = SourcePriority::distinct_known(&candidates);
        assert_eq!(distinct.len(), 2);
        assert_eq!(distinct[0].as_str(), "Apache-2.0");
    }
}
