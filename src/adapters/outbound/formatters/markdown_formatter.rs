use crate::application::dto::{ReportView, ScanResponse};
use crate::license_analysis::domain::{
    Compatibility, CompatibilityReport, DependencyGraph, LicenseDetermination, LicenseId,
    PackageId, Severity,
};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use std::collections::{BTreeMap, HashSet};

/// Markdown table header for determinations
const DETERMINATION_HEADER: &str = "| Package | Version | License | Confidence | Sources | Notes |\n";
const DETERMINATION_SEPARATOR: &str = "|---------|---------|---------|------------|---------|-------|\n";

const ISSUE_HEADER: &str = "| Severity | Kind | Package | Message |\n";
const ISSUE_SEPARATOR: &str = "|----------|------|---------|---------|\n";

const STATISTICS_HEADER: &str = "| Category | Packages | Share | Licenses |\n";
const STATISTICS_SEPARATOR: &str = "|----------|----------|-------|----------|\n";

/// MarkdownFormatter adapter for human-readable reports
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn compatibility_symbol(compatibility: Compatibility) -> &'static str {
        match compatibility {
            Compatibility::Compatible => "✅",
            Compatibility::Incompatible => "❌",
            Compatibility::Unknown => "❔",
        }
    }

    fn compatibility_label(compatibility: Compatibility) -> &'static str {
        match compatibility {
            Compatibility::Compatible => "compatible",
            Compatibility::Incompatible => "incompatible",
            Compatibility::Unknown => "unknown",
        }
    }

    fn license_of<'a>(
        determinations: &'a BTreeMap<PackageId, LicenseDetermination>,
        id: &PackageId,
    ) -> Option<&'a LicenseId> {
        determinations.get(id).map(|d| d.canonical_license())
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Scan view sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String, response: &ScanResponse, view: ReportView) {
        let metadata = &response.metadata;
        output.push_str(&format!("# {}\n\n", view.title()));
        output.push_str(&format!(
            "Generated by {} {} at {} ({})\n\n",
            metadata.tool_name(),
            metadata.tool_version(),
            metadata.timestamp(),
            metadata.scan_id()
        ));
        output.push_str(&format!(
            "Project: `{}@{}`\n\n",
            response.graph.root().package_id(),
            response.graph.root().version()
        ));
    }

    fn render_summary(&self, output: &mut String, response: &ScanResponse) {
        let errors = response
            .issues
            .iter()
            .filter(|i| i.severity() == Severity::Error)
            .count();
        let warnings = response.issues.len() - errors;

        output.push_str("## Summary\n\n");
        output.push_str(&format!(
            "- Packages scanned: {}\n",
            response.determinations.len()
        ));
        output.push_str(&format!(
            "- Issues: {} ({} error(s), {} warning(s))\n",
            response.issues.len(),
            errors,
            warnings
        ));
        output.push_str(&format!(
            "- Project compatibility: {}\n\n",
            Self::compatibility_label(response.compatibility.project_compatible())
        ));
    }

    fn render_determinations(&self, output: &mut String, response: &ScanResponse) {
        output.push_str("## License Determinations\n\n");
        if response.determinations.is_empty() {
            output.push_str("The project has no dependencies.\n\n");
            return;
        }

        output.push_str(DETERMINATION_HEADER);
        output.push_str(DETERMINATION_SEPARATOR);

        for node in response.graph.dependencies() {
            let Some(determination) = response.determinations.get(node.package_id()) else {
                continue;
            };

            let sources = determination
                .contributing_sources()
                .iter()
                .map(|kind| kind.as_str())
                .collect::<Vec<_>>()
                .join(", ");

            let mut notes = Vec::new();
            if let Some(reason) = determination.override_reason() {
                notes.push(format!(
                    "override (detected {}): {}",
                    determination.detected_license(),
                    reason
                ));
            }
            if determination.conflicting() {
                notes.push("sources disagree".to_string());
            }

            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} |\n",
                Self::escape_markdown_table_cell(node.package_id().as_str()),
                Self::escape_markdown_table_cell(node.version().as_str()),
                Self::escape_markdown_table_cell(determination.canonical_license().as_str()),
                determination.confidence(),
                if sources.is_empty() { "-".to_string() } else { sources },
                Self::escape_markdown_table_cell(&notes.join("; "))
            ));
        }
        output.push('\n');
    }

    fn render_issues(&self, output: &mut String, response: &ScanResponse) {
        output.push_str("## Issues\n\n");
        if response.issues.is_empty() {
            output.push_str("No issues found.\n\n");
            return;
        }

        output.push_str(ISSUE_HEADER);
        output.push_str(ISSUE_SEPARATOR);
        for issue in &response.issues {
            output.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                issue.severity(),
                issue.kind(),
                Self::escape_markdown_table_cell(issue.package_id().as_str()),
                Self::escape_markdown_table_cell(issue.message())
            ));
        }
        output.push('\n');
    }

    fn render_statistics(&self, output: &mut String, response: &ScanResponse) {
        let statistics = &response.statistics;
        if statistics.total_packages() == 0 {
            return;
        }

        output.push_str("## License Statistics\n\n");
        output.push_str(STATISTICS_HEADER);
        output.push_str(STATISTICS_SEPARATOR);
        for (category, stats) in statistics.by_category() {
            let licenses = stats
                .licenses()
                .iter()
                .map(|l| l.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            output.push_str(&format!(
                "| {} | {} | {:.1}% | {} |\n",
                category,
                stats.count(),
                stats.percentage(),
                licenses
            ));
        }
        output.push('\n');
    }
}

/// Tree view
impl MarkdownFormatter {
    /// Renders the graph as an indented tree
    ///
    /// Shared dependencies are expanded once and marked `(*)` afterwards.
    /// Edges that close a cycle and nodes cut off by the depth limit are
    /// marked and never expanded.
    fn render_tree(
        &self,
        output: &mut String,
        graph: &DependencyGraph,
        determinations: &BTreeMap<PackageId, LicenseDetermination>,
    ) {
        struct Frame<'a> {
            id: &'a PackageId,
            prefix: String,
            last: bool,
            closes_cycle: bool,
        }

        output.push_str(&format!(
            "{} package(s), maximum depth {}\n\n",
            graph.dependency_count(),
            graph.max_depth().map_or(0, |d| d.max(0))
        ));

        let root = graph.root();
        output.push_str("```text\n");
        output.push_str(&format!("{}@{}\n", root.package_id(), root.version()));

        let mut expanded: HashSet<&PackageId> = HashSet::from([root.package_id()]);
        let mut stack: Vec<Frame> = Vec::new();
        let root_children = root.children();
        for (i, child) in root_children.iter().enumerate().rev() {
            stack.push(Frame {
                id: child,
                prefix: String::new(),
                last: i + 1 == root_children.len(),
                closes_cycle: root.cycle_children().contains(child),
            });
        }

        while let Some(frame) = stack.pop() {
            let Some(node) = graph.node(frame.id) else {
                continue;
            };
            let connector = if frame.last { "└── " } else { "├── " };
            let license = Self::license_of(determinations, frame.id)
                .map_or_else(String::new, |l| format!(" ({})", l));

            let (marker, expand) = if frame.closes_cycle {
                (" ↻ cycle", false)
            } else if !expanded.insert(frame.id) {
                (" (*)", false)
            } else if node.truncated() {
                (" … depth limit", false)
            } else {
                ("", true)
            };

            output.push_str(&format!(
                "{}{}{}@{}{}{}\n",
                frame.prefix,
                connector,
                node.package_id(),
                node.version(),
                license,
                marker
            ));

            if expand {
                let child_prefix = format!("{}{}", frame.prefix, if frame.last { "    " } else { "│   " });
                let children = node.children();
                for (i, child) in children.iter().enumerate().rev() {
                    stack.push(Frame {
                        id: child,
                        prefix: child_prefix.clone(),
                        last: i + 1 == children.len(),
                        closes_cycle: node.cycle_children().contains(child),
                    });
                }
            }
        }
        output.push_str("```\n\n");

        if graph.has_cycles() {
            output.push_str("## Cycles\n\n");
            for cycle in graph.cycles() {
                output.push_str(&format!("- {}\n", cycle.describe()));
            }
            output.push('\n');
        }
    }
}

/// Matrix view
impl MarkdownFormatter {
    fn render_matrix(&self, output: &mut String, report: &CompatibilityReport) {
        output.push_str(&format!(
            "Project compatibility: **{}**\n\n",
            Self::compatibility_label(report.project_compatible())
        ));

        let licenses = report.licenses();
        if licenses.is_empty() {
            output.push_str("No licenses to compare.\n\n");
            return;
        }

        output.push_str("| |");
        for license in licenses {
            output.push_str(&format!(" {} |", license));
        }
        output.push_str("\n|---|");
        output.push_str(&"---|".repeat(licenses.len()));
        output.push('\n');

        for row in licenses {
            output.push_str(&format!("| **{}** |", row));
            for column in licenses {
                let symbol = match report.verdict(row, column) {
                    Some(verdict) => Self::compatibility_symbol(verdict.compatible()),
                    // the diagonal of a known license
                    None if row == column => "✅",
                    None => "❔",
                };
                output.push_str(&format!(" {} |", symbol));
            }
            output.push('\n');
        }
        output.push_str("\n✅ compatible · ❌ incompatible · ❔ unknown\n\n");

        let conflicts: Vec<_> = report
            .verdicts()
            .iter()
            .filter(|v| v.compatible() == Compatibility::Incompatible)
            .collect();
        if !conflicts.is_empty() {
            output.push_str("## Conflicts\n\n");
            for verdict in conflicts {
                output.push_str(&format!(
                    "- {} × {}: {}\n",
                    verdict.license_a(),
                    verdict.license_b(),
                    verdict.rationale()
                ));
            }
            output.push('\n');
        }
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, response: &ScanResponse, view: ReportView) -> Result<String> {
        let mut output = String::new();
        self.render_header(&mut output, response, view);

        match view {
            ReportView::Scan => {
                self.render_summary(&mut output, response);
                self.render_determinations(&mut output, response);
                self.render_issues(&mut output, response);
                self.render_statistics(&mut output, response);
            }
            ReportView::Tree => {
                self.render_tree(&mut output, &response.graph, &response.determinations)
            }
            ReportView::Matrix => self.render_matrix(&mut output, &response.compatibility),
        }

        Ok(output)
    }
}
