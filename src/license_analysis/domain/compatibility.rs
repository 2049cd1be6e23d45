use super::LicenseId;
use serde::{Deserialize, Serialize, Serializer};

/// Three-valued compatibility between two licenses
///
/// An unmodeled pair is `Unknown`, never `Compatible`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compatibility {
    Compatible,
    Incompatible,
    Unknown,
}

impl Compatibility {
    pub fn from_bool(value: bool) -> Self {
        if value {
            Compatibility::Compatible
        } else {
            Compatibility::Incompatible
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Compatibility::Compatible => "true",
            Compatibility::Incompatible => "false",
            Compatibility::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for Compatibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Serialized as JSON `true`, `false` or the string `"UNKNOWN"`
impl Serialize for Compatibility {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Compatibility::Compatible => serializer.serialize_bool(true),
            Compatibility::Incompatible => serializer.serialize_bool(false),
            Compatibility::Unknown => serializer.serialize_str("UNKNOWN"),
        }
    }
}

/// Broad license family used for grouping and statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseCategory {
    Permissive,
    WeakCopyleft,
    StrongCopyleft,
    NetworkCopyleft,
    Unknown,
}

impl LicenseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            LicenseCategory::Permissive => "permissive",
            LicenseCategory::WeakCopyleft => "weak_copyleft",
            LicenseCategory::StrongCopyleft => "strong_copyleft",
            LicenseCategory::NetworkCopyleft => "network_copyleft",
            LicenseCategory::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for LicenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Verdict for one unordered license pair
///
/// `license_a <= license_b` always holds, so a verdict has one
/// representation regardless of the order the pair was asked in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatibilityVerdict {
    license_a: LicenseId,
    license_b: LicenseId,
    compatible: Compatibility,
    rationale: String,
}

impl CompatibilityVerdict {
    pub fn new(
        first: LicenseId,
        second: LicenseId,
        compatible: Compatibility,
        rationale: impl Into<String>,
    ) -> Self {
        let (license_a, license_b) = if first <= second {
            (first, second)
        } else {
            (second, first)
        };
        Self {
            license_a,
            license_b,
            compatible,
            rationale: rationale.into(),
        }
    }

    pub fn license_a(&self) -> &LicenseId {
        &self.license_a
    }

    pub fn license_b(&self) -> &LicenseId {
        &self.license_b
    }

    pub fn compatible(&self) -> Compatibility {
        self.compatible
    }

    pub fn rationale(&self) -> &str {
        &self.rationale
    }

    pub fn involves(&self, license: &LicenseId) -> bool {
        &self.license_a == license || &self.license_b == license
    }
}

/// Pairwise verdicts over the licenses present in a scan, plus the aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatibilityReport {
    licenses: Vec<LicenseId>,
    verdicts: Vec<CompatibilityVerdict>,
    project_compatible: Compatibility,
}

impl CompatibilityReport {
    /// Builds the report; the aggregate is derived from the verdicts
    pub fn new(licenses: Vec<LicenseId>, verdicts: Vec<CompatibilityVerdict>) -> Self {
        let project_compatible = Self::aggregate(&verdicts);
        Self {
            licenses,
            verdicts,
            project_compatible,
        }
    }

    fn aggregate(verdicts: &[CompatibilityVerdict]) -> Compatibility {
        if verdicts
            .iter()
            .any(|v| v.compatible() == Compatibility::Incompatible)
        {
            Compatibility::Incompatible
        } else if verdicts
            .iter()
            .any(|v| v.compatible() == Compatibility::Unknown)
        {
            Compatibility::Unknown
        } else {
            Compatibility::Compatible
        }
    }

    /// Distinct licenses that were evaluated, sorted
    pub fn licenses(&self) -> &[LicenseId] {
        &self.licenses
    }

    pub fn verdicts(&self) -> &[CompatibilityVerdict] {
        &self.verdicts
    }

    pub fn project_compatible(&self) -> Compatibility {
        self.project_compatible
    }

    /// Looks up the verdict for a pair in either order
    pub fn verdict(&self, a: &LicenseId, b: &LicenseId) -> Option<&CompatibilityVerdict> {
        self.verdicts
            .iter()
            .find(|v| (v.license_a() == a && v.license_b() == b) || (v.license_a() == b && v.license_b() == a))
    }

    /// Incompatible verdicts involving `license`
    pub fn conflicts_for<'a>(
        &'a self,
        license: &'a LicenseId,
    ) -> impl Iterator<Item = &'a CompatibilityVerdict> + 'a {
        self.verdicts
            .iter()
            .filter(move |v| v.compatible() == Compatibility::Incompatible && v.involves(license))
    }
}
