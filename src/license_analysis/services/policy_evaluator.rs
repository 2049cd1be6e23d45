use crate::license_analysis::domain::{
    CompatibilityReport, DependencyGraph, Issue, IssueKind, LicenseDetermination, PackageId,
    PolicyConfig,
};
use std::collections::BTreeMap;

/// PolicyEvaluator service turning determinations and graph facts into issues
///
/// Rules are independent and additive. Ignored packages never produce issues.
pub struct PolicyEvaluator;

impl PolicyEvaluator {
    /// Evaluates every dependency in graph order, then the graph's cycles
    pub fn evaluate(
        determinations: &BTreeMap<PackageId, LicenseDetermination>,
        graph: &DependencyGraph,
        compatibility: &CompatibilityReport,
        policy: &PolicyConfig,
    ) -> Vec<Issue> {
        let mut issues = Vec::new();

        for node in graph.dependencies() {
            let package_id = node.package_id();
            if policy.is_ignored(package_id) {
                continue;
            }
            let Some(determination) = determinations.get(package_id) else {
                continue;
            };
            issues.extend(Self::license_issues(determination, compatibility, policy));
        }

        issues.extend(Self::cycle_issues(graph, policy));
        issues
    }

    fn license_issues(
        determination: &LicenseDetermination,
        compatibility: &CompatibilityReport,
        policy: &PolicyConfig,
    ) -> Vec<Issue> {
        let package_id = determination.package_id();
        let license = determination.canonical_license();
        let mut issues = Vec::new();

        if license.is_unknown() && !determination.override_applied() {
            issues.push(Issue::of_kind(
                package_id.clone(),
                IssueKind::MissingLicense,
                format!("No license could be determined for {}", package_id),
            ));
        }

        if !policy.permits(license) {
            issues.push(Issue::of_kind(
                package_id.clone(),
                IssueKind::PolicyViolation,
                format!("License {} is not in the allowed list", license),
            ));
        }

        for verdict in compatibility.conflicts_for(license) {
            let other = if verdict.license_a() == license {
                verdict.license_b()
            } else {
                verdict.license_a()
            };
            issues.push(Issue::of_kind(
                package_id.clone(),
                IssueKind::CompatibilityConflict,
                format!(
                    "{} is incompatible with {}: {}",
                    license,
                    other,
                    verdict.rationale()
                ),
            ));
        }

        issues
    }

    /// One issue per distinct cycle, attributed to its first non-ignored member
    fn cycle_issues(graph: &DependencyGraph, policy: &PolicyConfig) -> Vec<Issue> {
        let root = graph.root().package_id();

        graph
            .cycles()
            .iter()
            .filter_map(|cycle| {
                let owner = cycle
                    .path()
                    .iter()
                    .find(|id| *id != root && !policy.is_ignored(id))?;
                Some(Issue::of_kind(
                    owner.clone(),
                    IssueKind::CycleDetected,
                    format!("Dependency cycle detected: {}", cycle.describe()),
                ))
            })
            .collect()
    }
}
