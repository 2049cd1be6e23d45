use super::{
    CompatibilityEngine, ConfidenceResolver, DependencyGraphBuilder, EvidenceCollector,
    LicenseStatisticsCalculator, PolicyEvaluator,
};
use crate::license_analysis::domain::{
    CompatibilityReport, DependencyGraph, Issue, LicenseDetermination, LicenseStatistics, Package,
    PackageId, PolicyConfig, RawSources,
};
use crate::license_analysis::policies::CompatibilityRuleset;
use crate::shared::Result;
use std::collections::BTreeMap;

/// Everything one scan produces
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub determinations: BTreeMap<PackageId, LicenseDetermination>,
    pub graph: DependencyGraph,
    pub compatibility: CompatibilityReport,
    pub statistics: LicenseStatistics,
    pub issues: Vec<Issue>,
}

/// LicenseScanner service: the whole reconciliation pipeline for one project
///
/// A scan is a pure function of its inputs. Nothing is shared between scans.
pub struct LicenseScanner;

impl LicenseScanner {
    /// Builds the graph, gathers evidence for every dependency and reconciles
    ///
    /// All evidence is gathered before reconciliation starts, so a provider
    /// failure returns an error and never a partial outcome.
    pub fn scan<E, D>(
        root: &Package,
        mut evidence_provider: E,
        edge_provider: D,
        policy: &PolicyConfig,
        ruleset: &CompatibilityRuleset,
        max_depth: Option<u32>,
    ) -> Result<ScanOutcome>
    where
        E: FnMut(&Package) -> Result<RawSources>,
        D: FnMut(&PackageId) -> Result<Vec<Package>>,
    {
        let graph = DependencyGraphBuilder::build(root, max_depth, edge_provider)?;

        let evidence = graph
            .dependencies()
            .map(|node| {
                let package = Package::from_parts(node.package_id().clone(), node.version().clone());
                Ok((node.package_id().clone(), evidence_provider(&package)?))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        Ok(Self::reconcile(graph, &evidence, policy, ruleset))
    }

    /// Reconciles already-gathered evidence against a built graph
    ///
    /// Dependencies with no entry in `evidence` are treated as having no sources.
    pub fn reconcile(
        graph: DependencyGraph,
        evidence: &BTreeMap<PackageId, RawSources>,
        policy: &PolicyConfig,
        ruleset: &CompatibilityRuleset,
    ) -> ScanOutcome {
        let no_sources = RawSources::new();

        let determinations: BTreeMap<PackageId, LicenseDetermination> = graph
            .dependencies()
            .map(|node| {
                let package_id = node.package_id();
                let sources = evidence.get(package_id).unwrap_or(&no_sources);
                let records = EvidenceCollector::collect(package_id, sources);
                let determination = ConfidenceResolver::resolve_with_override(
                    package_id,
                    &records,
                    policy.override_for(package_id),
                );
                (package_id.clone(), determination)
            })
            .collect();

        let in_scope: Vec<&LicenseDetermination> = determinations
            .values()
            .filter(|determination| !policy.is_ignored(determination.package_id()))
            .collect();

        let compatibility = CompatibilityEngine::evaluate(
            in_scope.iter().map(|determination| determination.canonical_license()),
            ruleset,
        );
        let statistics = LicenseStatisticsCalculator::calculate(in_scope.iter().copied(), ruleset);
        let issues = PolicyEvaluator::evaluate(&determinations, &graph, &compatibility, policy);

        ScanOutcome {
            determinations,
            graph,
            compatibility,
            statistics,
            issues,
        }
    }
}
