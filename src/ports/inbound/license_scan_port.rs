use crate::application::dto::{ScanRequest, ScanResponse};
use crate::shared::Result;
use async_trait::async_trait;

/// LicenseScanPort - Inbound port for the license scan use case
///
/// This is the application's public API; the CLI drives scans through it.
#[async_trait(?Send)]
pub trait LicenseScanPort {
    /// Scans the project described by `request`
    ///
    /// # Errors
    /// Returns an error if:
    /// - An evidence or edge provider fails
    /// - A provider returns a malformed package identifier
    ///
    /// Data-quality findings are reported as issues in the response, never as errors.
    async fn scan(&self, request: ScanRequest) -> Result<ScanResponse>;
}
