use crate::application::dto::{ReportView, ScanResponse};
use crate::shared::Result;

/// ReportFormatter port rendering a scan result
///
/// One formatter handles every view; the view picks which part of the
/// response is rendered.
pub trait ReportFormatter {
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, response: &ScanResponse, view: ReportView) -> Result<String>;
}
