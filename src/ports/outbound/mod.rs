/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to reach package evidence, dependency edges, the console and output sinks.
pub mod dependency_edge_provider;
pub mod evidence_provider;
pub mod output_presenter;
pub mod progress_reporter;
pub mod report_formatter;

pub use dependency_edge_provider::DependencyEdgeProvider;
pub use evidence_provider::EvidenceProvider;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use report_formatter::ReportFormatter;
