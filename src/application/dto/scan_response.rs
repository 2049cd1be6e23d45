use crate::license_analysis::domain::{
    CompatibilityReport, DependencyGraph, Issue, LicenseDetermination, LicenseStatistics,
    PackageId, ScanMetadata,
};
use crate::license_analysis::services::ScanOutcome;
use crate::shared::error::ExitCode;
use serde::Serialize;
use std::collections::BTreeMap;

/// ScanResponse - Internal response DTO from the license scan use case
///
/// Serialized as-is by the JSON formatter, so field names are part of the
/// output format.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResponse {
    pub metadata: ScanMetadata,
    pub determinations: BTreeMap<PackageId, LicenseDetermination>,
    pub graph: DependencyGraph,
    pub compatibility: CompatibilityReport,
    pub statistics: LicenseStatistics,
    pub issues: Vec<Issue>,
    pub exit_code: ExitCode,
}

impl ScanResponse {
    pub fn new(metadata: ScanMetadata, outcome: ScanOutcome) -> Self {
        let exit_code = ExitCode::from_issues(&outcome.issues);
        Self {
            metadata,
            determinations: outcome.determinations,
            graph: outcome.graph,
            compatibility: outcome.compatibility,
            statistics: outcome.statistics,
            issues: outcome.issues,
            exit_code,
        }
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}
