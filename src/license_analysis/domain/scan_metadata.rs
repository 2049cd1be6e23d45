use serde::Serialize;

/// ScanMetadata value object identifying one scan run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanMetadata {
    tool_name: String,
    tool_version: String,
    timestamp: String,
    scan_id: String,
}

impl ScanMetadata {
    pub fn new(tool_name: String, tool_version: String, timestamp: String, scan_id: String) -> Self {
        Self {
            tool_name,
            tool_version,
            timestamp,
            scan_id,
        }
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn scan_id(&self) -> &str {
        &self.scan_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_metadata_serialization() {
        let metadata = ScanMetadata::new(
            "license-reconciler".to_string(),
            "0.1.0".to_string(),
            "2024-01-01T00:00:00Z".to_string(),
            "urn:uuid:12345".to_string(),
        );

        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["tool_name"], "license-reconciler");
        assert_eq!(json["scan_id"], "urn:uuid:12345");
        assert_eq!(metadata.timestamp(), "2024-01-01T00:00:00Z");
    }
}
