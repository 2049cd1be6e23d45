use crate::license_analysis::domain::{Package, PolicyConfig};

/// ScanRequest - Internal request DTO for the license scan use case
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// The project being scanned; it roots the dependency graph
    pub root: Package,
    /// Allow-list, ignored packages and overrides
    pub policy: PolicyConfig,
    /// Nodes deeper than this are recorded but not expanded
    pub max_depth: Option<u32>,
}

impl ScanRequest {
    pub fn new(root: Package, policy: PolicyConfig, max_depth: Option<u32>) -> Self {
        Self {
            root,
            policy,
            max_depth,
        }
    }
}
