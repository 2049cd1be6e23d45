mod compatibility_engine;
mod confidence_resolver;
mod dependency_graph_builder;
mod evidence_collector;
mod license_normalizer;
mod license_scanner;
mod license_statistics;
mod policy_evaluator;
mod scan_metadata_generator;

pub use compatibility_engine::CompatibilityEngine;
pub use confidence_resolver::ConfidenceResolver;
pub use dependency_graph_builder::DependencyGraphBuilder;
pub use evidence_collector::EvidenceCollector;
pub use license_normalizer::{Extraction, LicenseNormalizer};
pub use license_scanner::{LicenseScanner, ScanOutcome};
pub use license_statistics::LicenseStatisticsCalculator;
pub use policy_evaluator::PolicyEvaluator;
pub use scan_metadata_generator::ScanMetadataGenerator;
