/// Mock implementations for testing
mod mock_edge_provider;
mod mock_evidence_provider;
mod mock_progress_reporter;

pub use mock_edge_provider::MockEdgeProvider;
pub use mock_evidence_provider::MockEvidenceProvider;
pub use mock_progress_reporter::MockProgressReporter;
