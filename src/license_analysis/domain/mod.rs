pub mod compatibility;
pub mod dependency_graph;
pub mod determination;
pub mod evidence;
pub mod issue;
pub mod license_id;
pub mod package;
pub mod policy_config;
pub mod scan_metadata;
pub mod statistics;

pub use compatibility::{Compatibility, CompatibilityReport, CompatibilityVerdict, LicenseCategory};
pub use dependency_graph::{CycleRecord, DependencyGraph, DependencyNode, ROOT_DEPTH};
pub use determination::{ConfidenceLevel, LicenseDetermination};
pub use evidence::{EvidenceRecord, RawSources, SourceKind};
pub use issue::{Issue, IssueKind, Severity};
pub use license_id::{LicenseId, UNKNOWN_LICENSE};
pub use package::{Package, PackageId, Version};
pub use policy_config::{LicenseOverride, PolicyConfig};
pub use scan_metadata::ScanMetadata;
pub use statistics::{CategoryStatistics, LicenseStatistics};
