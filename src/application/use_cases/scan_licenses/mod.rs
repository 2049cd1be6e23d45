use crate::application::dto::{ScanRequest, ScanResponse};
use crate::license_analysis::domain::{DependencyGraph, Package, PackageId, RawSources};
use crate::license_analysis::policies::CompatibilityRuleset;
use crate::license_analysis::services::{
    DependencyGraphBuilder, LicenseScanner, ScanMetadataGenerator, ScanOutcome,
};
use crate::ports::inbound::LicenseScanPort;
use crate::ports::outbound::{DependencyEdgeProvider, EvidenceProvider, ProgressReporter};
use crate::shared::error::ScanError;
use crate::shared::Result;
use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::collections::BTreeMap;

/// Upper bound on evidence fetches in flight at once
const MAX_CONCURRENT_FETCHES: usize = 8;

/// ScanLicensesUseCase - Core use case for a license scan
///
/// Orchestrates graph construction, evidence gathering and reconciliation
/// using generic dependency injection for all infrastructure dependencies.
///
/// # Type Parameters
/// * `EP` - EvidenceProvider implementation
/// * `DP` - DependencyEdgeProvider implementation
/// * `PR` - ProgressReporter implementation
pub struct ScanLicensesUseCase<EP, DP, PR> {
    evidence_provider: EP,
    edge_provider: DP,
    progress_reporter: PR,
    ruleset: CompatibilityRuleset,
}

impl<EP, DP, PR> ScanLicensesUseCase<EP, DP, PR>
where
    EP: EvidenceProvider,
    DP: DependencyEdgeProvider,
    PR: ProgressReporter,
{
    /// Creates a new ScanLicensesUseCase with injected dependencies
    pub fn new(
        evidence_provider: EP,
        edge_provider: DP,
        progress_reporter: PR,
        ruleset: CompatibilityRuleset,
    ) -> Self {
        Self {
            evidence_provider,
            edge_provider,
            progress_reporter,
            ruleset,
        }
    }

    /// Executes the scan
    ///
    /// Every piece of evidence is gathered before reconciliation, so any
    /// provider failure aborts the scan without a partial response.
    pub async fn execute(&self, request: ScanRequest) -> Result<ScanResponse> {
        // Step 1: Walk the dependency graph
        let graph = self.build_graph(&request)?;

        // Step 2: Gather evidence for every dependency
        let evidence = self.fetch_evidence(&graph).await?;

        // Step 3: Reconcile
        let outcome = LicenseScanner::reconcile(graph, &evidence, &request.policy, &self.ruleset);
        self.report_outcome(&outcome);

        Ok(ScanResponse::new(
            ScanMetadataGenerator::generate_default(),
            outcome,
        ))
    }

    fn build_graph(&self, request: &ScanRequest) -> Result<DependencyGraph> {
        self.progress_reporter
            .report(&format!("📖 Resolving dependencies of {}", request.root));

        let graph = DependencyGraphBuilder::build(&request.root, request.max_depth, |id| {
            self.edge_provider
                .dependencies_of(id)
                .map_err(|e| Self::provider_failure(id, e))
        })?;

        let direct = graph.direct_dependencies().count();
        self.progress_reporter.report(&format!(
            "✅ Found {} package(s): {} direct, {} transitive",
            graph.dependency_count(),
            direct,
            graph.dependency_count() - direct
        ));

        let truncated = graph.dependencies().filter(|node| node.truncated()).count();
        if truncated > 0 {
            self.progress_reporter.report(&format!(
                "   - {} package(s) at the depth limit were not expanded",
                truncated
            ));
        }

        Ok(graph)
    }

    async fn fetch_evidence(
        &self,
        graph: &DependencyGraph,
    ) -> Result<BTreeMap<PackageId, RawSources>> {
        let packages: Vec<Package> = graph
            .dependencies()
            .map(|node| Package::from_parts(node.package_id().clone(), node.version().clone()))
            .collect();
        let total = packages.len();
        if total == 0 {
            return Ok(BTreeMap::new());
        }

        self.progress_reporter
            .report("🔍 Gathering license evidence...");

        let mut fetched = 0usize;
        let evidence = stream::iter(packages)
            .map(|package| async move {
                let sources = self
                    .evidence_provider
                    .fetch_evidence(&package)
                    .await
                    .map_err(|e| Self::provider_failure(package.id(), e))?;
                Ok::<_, anyhow::Error>((package.id().clone(), sources))
            })
            .buffered(MAX_CONCURRENT_FETCHES)
            .inspect_ok(|_| {
                fetched += 1;
                self.progress_reporter
                    .report_progress(fetched, total, Some("Gathering license evidence"));
            })
            .try_collect::<BTreeMap<_, _>>()
            .await
            .inspect_err(|e| self.progress_reporter.report_error(&format!("❌ {}", e)))?;

        self.progress_reporter.report_completion(&format!(
            "✅ Evidence gathered for {} package(s)",
            evidence.len()
        ));

        Ok(evidence)
    }

    fn report_outcome(&self, outcome: &ScanOutcome) {
        for cycle in outcome.graph.cycles() {
            self.progress_reporter
                .report(&format!("🔁 Cycle: {}", cycle.describe()));
        }
        self.progress_reporter.report(&format!(
            "📊 {} determination(s), {} issue(s)",
            outcome.determinations.len(),
            outcome.issues.len()
        ));
    }

    /// Wraps a provider error, keeping contract violations the provider already classified
    fn provider_failure(package: &PackageId, error: anyhow::Error) -> anyhow::Error {
        if error.downcast_ref::<ScanError>().is_some() {
            return error;
        }
        ScanError::ProviderFailure {
            package: package.to_string(),
            details: format!("{:#}", error),
        }
        .into()
    }
}

#[async_trait(?Send)]
impl<EP, DP, PR> LicenseScanPort for ScanLicensesUseCase<EP, DP, PR>
where
    EP: EvidenceProvider,
    DP: DependencyEdgeProvider,
    PR: ProgressReporter,
{
    async fn scan(&self, request: ScanRequest) -> Result<ScanResponse> {
        self.execute(request).await
    }
}

#[cfg(test)]
mod tests;
