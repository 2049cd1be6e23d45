use super::PackageId;
use serde::Serialize;

/// Category of a reported problem. Wire names are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueKind {
    MissingLicense,
    PolicyViolation,
    CompatibilityConflict,
    CycleDetected,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::MissingLicense => "MISSING_LICENSE",
            IssueKind::PolicyViolation => "POLICY_VIOLATION",
            IssueKind::CompatibilityConflict => "COMPATIBILITY_CONFLICT",
            IssueKind::CycleDetected => "CYCLE_DETECTED",
        }
    }

    /// Default severity attached to issues of this kind
    pub fn default_severity(&self) -> Severity {
        match self {
            IssueKind::MissingLicense | IssueKind::CycleDetected => Severity::Warning,
            IssueKind::PolicyViolation | IssueKind::CompatibilityConflict => Severity::Error,
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A problem found during a scan, attributed to one package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    package_id: PackageId,
    kind: IssueKind,
    severity: Severity,
    message: String,
}

impl Issue {
    pub fn new(package_id: PackageId, kind: IssueKind, severity: Severity, message: String) -> Self {
        Self {
            package_id,
            kind,
            severity,
            message,
        }
    }

    /// Creates an issue with the kind's default severity
    pub fn of_kind(package_id: PackageId, kind: IssueKind, message: String) -> Self {
        Self::new(package_id, kind, kind.default_severity(), message)
    }

    pub fn package_id(&self) -> &PackageId {
        &self.package_id
    }

    pub fn kind(&self) -> IssueKind {
        self.kind
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&IssueKind::CompatibilityConflict).unwrap(),
            "\"COMPATIBILITY_CONFLICT\""
        );
        assert_eq!(IssueKind::CycleDetected.to_string(), "CYCLE_DETECTED");
    }

    #[test]
    fn test_default_severities() {
        assert_eq!(IssueKind::MissingLicense.default_severity(), Severity::Warning);
        assert_eq!(IssueKind::PolicyViolation.default_severity(), Severity::Error);
        assert_eq!(IssueKind::CompatibilityConflict.default_severity(), Severity::Error);
        assert_eq!(IssueKind::CycleDetected.default_severity(), Severity::Warning);
    }

    #[test]
    fn test_issue_serialization() {
        let issue = Issue::of_kind(
            PackageId::new("left-pad".to_string()).unwrap(),
            IssueKind::PolicyViolation,
            "GPL-3.0 is not allowed".to_string(),
        );
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["package_id"], "left-pad");
        assert_eq!(json["kind"], "POLICY_VIOLATION");
        assert_eq!(json["severity"], "error");
        assert_eq!(json["message"], "GPL-3.0 is not allowed");
    }
}
