use async_trait::async_trait;
use license_reconciler::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock EvidenceProvider serving canned license sources per package name
#[derive(Default, Clone)]
pub struct MockEvidenceProvider {
    sources: HashMap<String, RawSources>,
    failing: HashSet<String>,
    calls: Arc<AtomicUsize>,
}

impl MockEvidenceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, package: &str, kind: SourceKind, text: &str) -> Self {
        self.sources
            .entry(package.to_string())
            .or_default()
            .insert(kind, text.to_string());
        self
    }

    /// Makes every fetch for `package` fail
    pub fn failing_on(mut self, package: &str) -> Self {
        self.failing.insert(package.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EvidenceProvider for MockEvidenceProvider {
    async fn fetch_evidence(&self, package: &Package) -> Result<RawSources> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(package.id().as_str()) {
            anyhow::bail!("registry unavailable for {}", package);
        }
        Ok(self
            .sources
            .get(package.id().as_str())
            .cloned()
            .unwrap_or_default())
    }
}
