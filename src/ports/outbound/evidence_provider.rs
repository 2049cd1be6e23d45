use crate::license_analysis::domain::{Package, RawSources};
use crate::shared::Result;
use async_trait::async_trait;

/// EvidenceProvider port supplying the raw license sources of a package
///
/// # Async Support
/// Evidence for many packages is fetched concurrently, so implementations
/// must be `Send + Sync`.
#[async_trait]
pub trait EvidenceProvider: Send + Sync {
    /// Fetches every raw source known for one package version
    ///
    /// A package with no sources yields an empty map, not an error.
    ///
    /// # Errors
    /// Returns an error when the backing store cannot be read. The scan
    /// is aborted in that case.
    async fn fetch_evidence(&self, package: &Package) -> Result<RawSources>;
}
