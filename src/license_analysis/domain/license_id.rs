use serde::{Serialize, Serializer};

/// Wire value used for an undetermined license
pub const UNKNOWN_LICENSE: &str = "UNKNOWN";

/// A canonical license identifier, or the explicit absence of one
///
/// `Unknown` is a value in its own right: it is never equal to a
/// guessed nearest license and never compatible with anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LicenseId {
    Canonical(String),
    Unknown,
}

impl LicenseId {
    pub fn canonical(id: impl Into<String>) -> Self {
        LicenseId::Canonical(id.into())
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, LicenseId::Unknown)
    }

    pub fn as_str(&self) -> &str {
        match self {
            LicenseId::Canonical(id) => id,
            LicenseId::Unknown => UNKNOWN_LICENSE,
        }
    }
}

impl std::fmt::Display for LicenseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for LicenseId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
