use license_reconciler::prelude::*;
use std::collections::HashMap;

/// Mock DependencyEdgeProvider over a fixed adjacency list
#[derive(Default, Clone)]
pub struct MockEdgeProvider {
    edges: HashMap<String, Vec<(String, String)>>,
}

impl MockEdgeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds edges from `from` to each `(name, version)` child
    pub fn with_edges(mut self, from: &str, children: &[(&str, &str)]) -> Self {
        self.edges.insert(
            from.to_string(),
            children
                .iter()
                .map(|(name, version)| (name.to_string(), version.to_string()))
                .collect(),
        );
        self
    }
}

impl DependencyEdgeProvider for MockEdgeProvider {
    fn dependencies_of(&self, package_id: &PackageId) -> Result<Vec<Package>> {
        self.edges
            .get(package_id.as_str())
            .into_iter()
            .flatten()
            .map(|(name, version)| Package::new(name.clone(), version.clone()))
            .collect()
    }
}
