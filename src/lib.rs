//! license-reconciler - license evidence reconciliation for project dependencies
//!
//! This library determines, for every dependency of a project, which license
//! applies and how confident that determination is, then checks the resulting
//! license set for pairwise compatibility and against a license policy. It
//! follows hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`license_analysis`): Pure business logic and domain models
//! - **Application Layer** (`application`): Use cases and application services
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//! - **Config / CLI** (`config`, `cli`): YAML policy files and the argument model
//!
//! # Example
//!
//! ```no_run
//! use license_reconciler::prelude::*;
//! use std::path::Path;
//!
//! # async fn example() -> Result<()> {
//! // Create adapters
//! let repository = SnapshotRepository::load(Path::new("snapshot.json"))?;
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = ScanLicensesUseCase::new(
//!     repository.clone(),
//!     repository.clone(),
//!     progress_reporter,
//!     CompatibilityRuleset::builtin()?,
//! );
//!
//! // Execute
//! let request = ScanRequest::new(repository.root().clone(), PolicyConfig::default(), None);
//! let response = use_case.execute(request).await?;
//!
//! // Format output
//! let output = MarkdownFormatter::new().format(&response, ReportView::Scan)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod license_analysis;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::{QuietProgressReporter, StderrProgressReporter};
    pub use crate::adapters::outbound::filesystem::{
        FileSystemWriter, SnapshotRepository, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
    pub use crate::application::dto::{OutputFormat, ReportView, ScanRequest, ScanResponse};
    pub use crate::application::use_cases::ScanLicensesUseCase;
    pub use crate::license_analysis::domain::{
        CompatibilityReport, ConfidenceLevel, DependencyGraph, Issue, IssueKind, LicenseId,
        LicenseDetermination, Package, PackageId, PolicyConfig, RawSources, SourceKind,
    };
    pub use crate::license_analysis::policies::CompatibilityRuleset;
    pub use crate::license_analysis::services::{LicenseNormalizer, LicenseScanner};
    pub use crate::ports::outbound::{
        DependencyEdgeProvider, EvidenceProvider, OutputPresenter, ProgressReporter,
        ReportFormatter,
    };
    pub use crate::shared::error::{ExitCode, ScanError};
    pub use crate::shared::Result;
}
