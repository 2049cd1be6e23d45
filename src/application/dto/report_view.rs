/// Which part of a scan a report renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportView {
    /// Determinations, issues and statistics
    #[default]
    Scan,
    /// The dependency graph as an indented tree
    Tree,
    /// Pairwise license compatibility
    Matrix,
}

impl ReportView {
    pub fn title(&self) -> &'static str {
        match self {
            ReportView::Scan => "License Scan Report",
            ReportView::Tree => "Dependency Tree",
            ReportView::Matrix => "License Compatibility Matrix",
        }
    }
}

impl std::fmt::Display for ReportView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportView::Scan => write!(f, "scan"),
            ReportView::Tree => write!(f, "tree"),
            ReportView::Matrix => write!(f, "matrix"),
        }
    }
}
