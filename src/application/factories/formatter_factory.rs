use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
use crate::application::dto::{OutputFormat, ReportView};
use crate::ports::outbound::ReportFormatter;

/// Factory for creating report formatters
///
/// Selection of the formatter adapter lives here so the CLI only deals
/// with `OutputFormat`.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use license_reconciler::application::dto::OutputFormat;
    /// use license_reconciler::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Markdown);
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn ReportFormatter> {
        match format {
            OutputFormat::Json => Box::new(JsonFormatter::new()),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new()),
        }
    }

    /// Returns the progress message shown while rendering
    ///
    /// # Examples
    /// ```
    /// use license_reconciler::application::dto::{OutputFormat, ReportView};
    /// use license_reconciler::application::factories::FormatterFactory;
    ///
    /// let message = FormatterFactory::progress_message(OutputFormat::Json, ReportView::Tree);
    /// assert_eq!(message, "📝 Rendering tree view as json...");
    /// ```
    pub fn progress_message(format: OutputFormat, view: ReportView) -> String {
        format!("📝 Rendering {} view as {}...", view, format)
    }
}
