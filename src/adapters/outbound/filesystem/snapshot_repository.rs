use crate::license_analysis::domain::{Package, PackageId, RawSources, SourceKind, Version};
use crate::ports::outbound::{DependencyEdgeProvider, EvidenceProvider};
use crate::shared::error::ScanError;
use crate::shared::security::{read_checked_file, MAX_SNAPSHOT_SIZE};
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SnapshotFile {
    root: RootEntry,
    #[serde(default)]
    packages: BTreeMap<String, PackageEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RootEntry {
    name: String,
    version: String,
    #[serde(default)]
    dependencies: Vec<DependencyRef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PackageEntry {
    version: String,
    #[serde(default)]
    evidence: BTreeMap<SourceKind, String>,
    #[serde(default)]
    dependencies: Vec<DependencyRef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DependencyRef {
    name: String,
    version: String,
}

impl DependencyRef {
    fn into_package(self) -> Result<Package> {
        Package::new(self.name, self.version)
    }
}

#[derive(Debug)]
struct Snapshot {
    root: Package,
    edges: HashMap<PackageId, Vec<Package>>,
    evidence: HashMap<PackageId, RawSources>,
}

/// SnapshotRepository adapter serving a project snapshot from a JSON file
///
/// A snapshot holds the project root, its dependency edges and the raw
/// license sources of each package:
///
/// ```json
/// {
///   "root": {"name": "app", "version": "1.0.0", "dependencies": [{"name": "requests", "version": "2.31.0"}]},
///   "packages": {
///     "requests": {
///       "version": "2.31.0",
///       "evidence": {"metadata_field": "Apache-2.0"},
///       "dependencies": []
///     }
///   }
/// }
/// ```
///
/// The whole file is parsed and validated up front, so the provider
/// methods only fail on identifiers they were never given. Packages
/// referenced but absent from `packages` have no evidence and no edges.
///
/// Cloning is cheap; clones share the loaded snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    snapshot: Arc<Snapshot>,
}

impl SnapshotRepository {
    /// Loads a snapshot file after the symlink, file-type and size checks
    pub fn load(path: &Path) -> Result<Self> {
        let content = read_checked_file(path, "snapshot", MAX_SNAPSHOT_SIZE)?;
        Self::from_json(&content)
    }

    /// Parses a snapshot from JSON text
    ///
    /// # Errors
    /// `ScanError::Schema` for malformed JSON or structure, and
    /// `ScanError::InvalidPackageId` for malformed identifiers or versions.
    pub fn from_json(content: &str) -> Result<Self> {
        let file: SnapshotFile = serde_json::from_str(content).map_err(|e| ScanError::Schema {
            details: format!("invalid snapshot: {}", e),
        })?;

        let root = Package::new(file.root.name, file.root.version)?;
        let root_edges = file
            .root
            .dependencies
            .into_iter()
            .map(DependencyRef::into_package)
            .collect::<Result<Vec<_>>>()?;

        let mut edges = HashMap::new();
        let mut evidence = HashMap::new();
        for (name, entry) in file.packages {
            let id = PackageId::new(name)?;
            // lookups are by id, the version is only validated
            Version::new(entry.version)?;

            let dependencies = entry
                .dependencies
                .into_iter()
                .map(DependencyRef::into_package)
                .collect::<Result<Vec<_>>>()?;
            edges.insert(id.clone(), dependencies);
            evidence.insert(id, entry.evidence);
        }
        edges.insert(root.id().clone(), root_edges);

        Ok(Self {
            snapshot: Arc::new(Snapshot {
                root,
                edges,
                evidence,
            }),
        })
    }

    /// The project the snapshot was taken of
    pub fn root(&self) -> &Package {
        &self.snapshot.root
    }

    pub fn package_count(&self) -> usize {
        self.snapshot.evidence.len()
    }
}

#[async_trait]
impl EvidenceProvider for SnapshotRepository {
    async fn fetch_evidence(&self, package: &Package) -> Result<RawSources> {
        Ok(self
            .snapshot
            .evidence
            .get(package.id())
            .cloned()
            .unwrap_or_default())
    }
}

impl DependencyEdgeProvider for SnapshotRepository {
    fn dependencies_of(&self, package_id: &PackageId) -> Result<Vec<Package>> {
        Ok(self
            .snapshot
            .edges
            .get(package_id)
            .cloned()
            .unwrap_or_default())
    }
}
