use super::*;
use crate::license_analysis::domain::{ConfidenceLevel, IssueKind, PolicyConfig, SourceKind};
use crate::shared::error::ExitCode;
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap, HashSet};

// Mock implementations for testing
#[derive(Default)]
struct MockEvidenceProvider {
    sources: HashMap<String, RawSources>,
    failing: HashSet<String>,
}

impl MockEvidenceProvider {
    fn with(mut self, package: &str, kind: SourceKind, text: &str) -> Self {
        self.sources
            .entry(package.to_string())
            .or_default()
            .insert(kind, text.to_string());
        self
    }

    fn failing_on(mut self, package: &str) -> Self {
        self.failing.insert(package.to_string());
        self
    }
}

#[async_trait]
impl EvidenceProvider for MockEvidenceProvider {
    async fn fetch_evidence(&self, package: &Package) -> Result<RawSources> {
        if self.failing.contains(package.id().as_str()) {
            anyhow::bail!("Mock evidence provider failure");
        }
        Ok(self
            .sources
            .get(package.id().as_str())
            .cloned()
            .unwrap_or_default())
    }
}

#[derive(Default)]
struct MockEdgeProvider {
    edges: HashMap<String, Vec<String>>,
}

impl MockEdgeProvider {
    fn with(mut self, from: &str, to: &[&str]) -> Self {
        self.edges
            .insert(from.to_string(), to.iter().map(|s| s.to_string()).collect());
        self
    }
}

impl DependencyEdgeProvider for MockEdgeProvider {
    fn dependencies_of(&self, package_id: &PackageId) -> Result<Vec<Package>> {
        self.edges
            .get(package_id.as_str())
            .map(|children| {
                children
                    .iter()
                    .map(|name| Package::new(name.clone(), "1.0.0".to_string()))
                    .collect()
            })
            .unwrap_or_else(|| Ok(vec![]))
    }
}

#[derive(Default)]
struct MockProgressReporter {
    messages: RefCell<Vec<String>>,
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }

    fn report_progress(&self, current: usize, total: usize, _message: Option<&str>) {
        self.messages
            .borrow_mut()
            .push(format!("Progress: {}/{}", current, total));
    }

    fn report_error(&self, message: &str) {
        self.messages.borrow_mut().push(format!("Error: {}", message));
    }

    fn report_completion(&self, message: &str) {
        self.messages
            .borrow_mut()
            .push(format!("Completed: {}", message));
    }
}

fn use_case(
    evidence: MockEvidenceProvider,
    edges: MockEdgeProvider,
) -> ScanLicensesUseCase<MockEvidenceProvider, MockEdgeProvider, MockProgressReporter> {
    ScanLicensesUseCase::new(
        evidence,
        edges,
        MockProgressReporter::default(),
        CompatibilityRuleset::builtin().unwrap(),
    )
}

fn request(policy: PolicyConfig) -> ScanRequest {
    ScanRequest::new(
        Package::new("my-project".to_string(), "0.1.0".to_string()).unwrap(),
        policy,
        None,
    )
}

fn id(name: &str) -> PackageId {
    PackageId::new(name.to_string()).unwrap()
}

#[tokio::test]
async fn test_execute_reconciles_every_dependency() {
    let uc = use_case(
        MockEvidenceProvider::default()
            .with("requests", SourceKind::MetadataField, "Apache-2.0")
            .with("requests", SourceKind::Classifier, "License :: OSI Approved :: Apache Software License")
            .with("urllib3", SourceKind::MetadataField, "MIT"),
        MockEdgeProvider::default()
            .with("my-project", &["requests"])
            .with("requests", &["urllib3"]),
    );

    let response = uc.execute(request(PolicyConfig::default())).await.unwrap();

    assert_eq!(response.determinations.len(), 2);
    let requests = &response.determinations[&id("requests")];
    assert_eq!(requests.canonical_license().as_str(), "Apache-2.0");
    assert_eq!(requests.confidence(), ConfidenceLevel::High);
    assert_eq!(response.graph.node(&id("urllib3")).unwrap().depth(), 1);
    assert!(response.issues.is_empty());
    assert_eq!(response.exit_code, ExitCode::Success);
    assert!(response.metadata.scan_id().starts_with("urn:uuid:"));
}

#[tokio::test]
async fn test_execute_reports_policy_violation() {
    let uc = use_case(
        MockEvidenceProvider::default().with("gpl-lib", SourceKind::MetadataField, "GPL-3.0"),
        MockEdgeProvider::default().with("my-project", &["gpl-lib"]),
    );
    let policy = PolicyConfig::new(
        BTreeSet::from(["MIT".to_string()]),
        BTreeSet::new(),
        BTreeMap::new(),
    );

    let response = uc.execute(request(policy)).await.unwrap();

    assert_eq!(response.issues.len(), 1);
    assert_eq!(response.issues[0].kind(), IssueKind::PolicyViolation);
    assert_eq!(response.exit_code, ExitCode::IssuesFound);
}

#[tokio::test]
async fn test_evidence_failure_aborts_with_provider_failure() {
    let uc = use_case(
        MockEvidenceProvider::default().failing_on("broken"),
        MockEdgeProvider::default().with("my-project", &["fine", "broken"]),
    );

    let error = uc.execute(request(PolicyConfig::default())).await.unwrap_err();

    match error.downcast_ref::<ScanError>() {
        Some(ScanError::ProviderFailure { package, details }) => {
            assert_eq!(package, "broken");
            assert!(details.contains("Mock evidence provider failure"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_dependency_id_is_not_rewrapped() {
    let uc = use_case(
        MockEvidenceProvider::default(),
        MockEdgeProvider::default().with("my-project", &["bad name"]),
    );

    let error = uc.execute(request(PolicyConfig::default())).await.unwrap_err();
    assert!(matches!(
        error.downcast_ref::<ScanError>(),
        Some(ScanError::InvalidPackageId { .. })
    ));
}

#[tokio::test]
async fn test_project_without_dependencies() {
    let uc = use_case(MockEvidenceProvider::default(), MockEdgeProvider::default());

    let response = uc.execute(request(PolicyConfig::default())).await.unwrap();
    assert!(response.determinations.is_empty());
    assert_eq!(response.graph.dependency_count(), 0);
    assert_eq!(response.exit_code, ExitCode::Success);
}

#[tokio::test]
async fn test_progress_is_reported_per_package() {
    let uc = use_case(
        MockEvidenceProvider::default(),
        MockEdgeProvider::default().with("my-project", &["a", "b", "c"]),
    );

    uc.execute(request(PolicyConfig::default())).await.unwrap();

    let messages = uc.progress_reporter.messages.borrow();
    assert!(messages.contains(&"Progress: 3/3".to_string()));
    assert!(messages.iter().any(|m| m.starts_with("Completed: ")));
}

#[tokio::test]
async fn test_scan_port_delegates_to_execute() {
    let uc = use_case(
        MockEvidenceProvider::default(),
        MockEdgeProvider::default().with("my-project", &["a"]).with("a", &["my-project"]),
    );

    let response = LicenseScanPort::scan(&uc, request(PolicyConfig::default()))
        .await
        .unwrap();
    assert!(response.graph.has_cycles());
}
