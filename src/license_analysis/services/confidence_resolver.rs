use super::LicenseNormalizer;
use crate::license_analysis::domain::{
    ConfidenceLevel, EvidenceRecord, LicenseDetermination, LicenseId, LicenseOverride, PackageId,
    SourceKind,
};
use crate::license_analysis::policies::SourcePriority;
use std::collections::BTreeMap;

/// ConfidenceResolver service reconciling one package's evidence
///
/// Pure: the same records (and override) always produce an identical
/// determination.
pub struct ConfidenceResolver;

impl ConfidenceResolver {
    /// Reconciles evidence records into a single determination
    pub fn resolve(package_id: &PackageId, records: &[EvidenceRecord]) -> LicenseDetermination {
        let candidates: BTreeMap<SourceKind, LicenseId> = records
            .iter()
            .map(|record| {
                (
                    record.source_kind(),
                    LicenseNormalizer::normalize(record.raw_text(), record.source_kind()),
                )
            })
            .collect();

        let distinct = SourcePriority::distinct_known(&candidates);
        let known_sources: Vec<SourceKind> = candidates
            .iter()
            .filter(|(_, license)| !license.is_unknown())
            .map(|(kind, _)| *kind)
            .collect();
        let silent_sources: Vec<SourceKind> = candidates
            .iter()
            .filter(|(_, license)| license.is_unknown())
            .map(|(kind, _)| *kind)
            .collect();

        let mut reasons = Vec::new();
        let (license, confidence, conflicting) = match (distinct.len(), SourcePriority::select(&candidates)) {
            (0, _) | (_, None) => {
                if candidates.is_empty() {
                    reasons.push("No license evidence found".to_string());
                } else {
                    reasons.push(format!(
                        "No source yielded a recognizable license ({})",
                        join_kinds(&silent_sources)
                    ));
                }
                (LicenseId::Unknown, ConfidenceLevel::Uncertain, false)
            }
            (1, Some((_, license))) => {
                let confidence = if known_sources.len() >= 2 {
                    reasons.push(format!(
                        "{} sources agree on {} ({})",
                        known_sources.len(),
                        license,
                        join_kinds(&known_sources)
                    ));
                    ConfidenceLevel::High
                } else {
                    reasons.push(format!("Only {} identified {}", join_kinds(&known_sources), license));
                    ConfidenceLevel::Medium
                };
                if !silent_sources.is_empty() {
                    reasons.push(format!(
                        "No recognizable license in {}",
                        join_kinds(&silent_sources)
                    ));
                }
                (license.clone(), confidence, false)
            }
            (_, Some((winner, license))) => {
                let listing = candidates
                    .iter()
                    .filter(|(_, candidate)| !candidate.is_unknown())
                    .map(|(kind, candidate)| format!("{}={}", kind, candidate))
                    .collect::<Vec<_>>()
                    .join(", ");
                reasons.push(format!(
                    "Sources disagree: {}; using {} by source priority",
                    listing, winner
                ));
                (license.clone(), ConfidenceLevel::Uncertain, true)
            }
        };

        let modifications: Vec<String> = records
            .iter()
            .flat_map(|record| {
                record
                    .modifications()
                    .iter()
                    .map(move |modification| format!("{}: {}", record.source_kind(), modification))
            })
            .collect();
        if !modifications.is_empty() {
            reasons.push(format!(
                "License text departs from standard wording ({} finding(s))",
                modifications.len()
            ));
        }

        LicenseDetermination::new(
            package_id.clone(),
            license,
            confidence,
            conflicting,
            candidates,
            reasons,
        )
        .with_modifications(modifications)
    }

    /// Reconciles evidence and then applies a manual override, if any
    pub fn resolve_with_override(
        package_id: &PackageId,
        records: &[EvidenceRecord],
        license_override: Option<&LicenseOverride>,
    ) -> LicenseDetermination {
        let computed = Self::resolve(package_id, records);
        match license_override {
            Some(manual) => {
                computed.with_override(manual.license().clone(), manual.reason().to_string())
            }
            None => computed,
        }
    }
}

fn join_kinds(kinds: &[SourceKind]) -> String {
    kinds
        .iter()
        .map(SourceKind::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
