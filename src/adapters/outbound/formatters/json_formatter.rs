use crate::application::dto::{ReportView, ScanResponse};
use crate::license_analysis::domain::{CompatibilityReport, DependencyGraph, ScanMetadata};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use serde::Serialize;

#[derive(Serialize)]
struct TreeDocument<'a> {
    metadata: &'a ScanMetadata,
    graph: &'a DependencyGraph,
}

#[derive(Serialize)]
struct MatrixDocument<'a> {
    metadata: &'a ScanMetadata,
    compatibility: &'a CompatibilityReport,
}

/// JsonFormatter adapter emitting pretty-printed JSON
///
/// The scan view is the full response; the tree and matrix views keep the
/// metadata and the one section they are about.
#[derive(Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, response: &ScanResponse, view: ReportView) -> Result<String> {
        let json = match view {
            ReportView::Scan => serde_json::to_string_pretty(response)?,
            ReportView::Tree => serde_json::to_string_pretty(&TreeDocument {
                metadata: &response.metadata,
                graph: &response.graph,
            })?,
            ReportView::Matrix => serde_json::to_string_pretty(&MatrixDocument {
                metadata: &response.metadata,
                compatibility: &response.compatibility,
            })?,
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::license_analysis::domain::{Package, PolicyConfig, SourceKind};
    use crate::license_analysis::policies::CompatibilityRuleset;
    use crate::license_analysis::services::{LicenseScanner, ScanMetadataGenerator};
    use crate::license_analysis::domain::RawSources;
    use serde_json::Value;

    fn response() -> ScanResponse {
        let root = Package::new("app".to_string(), "1.0.0".to_string()).unwrap();
        let outcome = LicenseScanner::scan(
            &root,
            |package| {
                let mut sources = RawSources::new();
                match package.id().as_str() {
                    "apache-lib" => sources.insert(SourceKind::MetadataField, "Apache-2.0".to_string()),
                    "gpl-lib" => sources.insert(SourceKind::MetadataField, "GPL-2.0-only".to_string()),
                    _ => None,
                };
                Ok(sources)
            },
            |id| {
                Ok(if id.as_str() == "app" {
                    vec![
                        Package::new("apache-lib".to_string(), "2.0".to_string()).unwrap(),
                        Package::new("gpl-lib".to_string(), "1.0".to_string()).unwrap(),
                        Package::new("mystery".to_string(), "0.1".to_string()).unwrap(),
                    ]
                } else {
                    vec![]
                })
            },
            &PolicyConfig::default(),
            &CompatibilityRuleset::builtin().unwrap(),
            None,
        )
        .unwrap();
        ScanResponse::new(ScanMetadataGenerator::generate("license-reconciler", "0.1.0"), outcome)
    }

    #[test]
    fn test_scan_view_field_names() {
        let output = JsonFormatter::new().format(&response(), ReportView::Scan).unwrap();
        let json: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["metadata"]["tool_name"], "license-reconciler");
        assert_eq!(json["exit_code"], 1);

        let apache = &json["determinations"]["apache-lib"];
        assert_eq!(apache["canonical_license"], "Apache-2.0");
        assert_eq!(apache["confidence"], "MEDIUM");
        assert_eq!(apache["override_applied"], false);

        assert_eq!(json["determinations"]["mystery"]["canonical_license"], "UNKNOWN");
        assert_eq!(json["compatibility"]["project_compatible"], false);

        let kinds: Vec<&str> = json["issues"]
            .as_array()
            .unwrap()
            .iter()
            .map(|issue| issue["kind"].as_str().unwrap())
            .collect();
        assert!(kinds.contains(&"MISSING_LICENSE"));
        assert!(kinds.contains(&"COMPATIBILITY_CONFLICT"));
    }

    #[test]
    fn test_tree_view_has_graph_only() {
        let output = JsonFormatter::new().format(&response(), ReportView::Tree).unwrap();
        let json: Value = serde_json::from_str(&output).unwrap();

        assert!(json.get("determinations").is_none());
        let nodes = json["graph"]["nodes"].as_array().unwrap();
        assert_eq!(nodes.len(), 4);
        assert_eq!(nodes[0]["package_id"], "app");
        assert_eq!(nodes[0]["depth"], -1);
    }

    #[test]
    fn test_matrix_view_verdicts() {
        let output = JsonFormatter::new().format(&response(), ReportView::Matrix).unwrap();
        let json: Value = serde_json::from_str(&output).unwrap();

        let verdicts = json["compatibility"]["verdicts"].as_array().unwrap();
        let apache_gpl = verdicts
            .iter()
            .find(|v| v["license_a"] == "Apache-2.0" && v["license_b"] == "GPL-2.0")
            .unwrap();
        assert_eq!(apache_gpl["compatible"], false);

        assert!(verdicts.iter().any(|v| v["compatible"] == "UNKNOWN"));
    }
}
