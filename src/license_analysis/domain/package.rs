use crate::shared::error::ScanError;
use crate::shared::Result;
use serde::Serialize;

/// Maximum length for package identifiers (security limit)
const MAX_PACKAGE_ID_LENGTH: usize = 255;

/// Maximum length for package versions (security limit)
const MAX_VERSION_LENGTH: usize = 100;

/// NewType wrapper for a package identifier with validation
///
/// Identifiers are compared exactly; `Requests` and `requests` are different
/// packages as far as overrides and ignore lists are concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PackageId(String);

impl PackageId {
    pub fn new(id: String) -> Result<Self> {
        if id.is_empty() {
            return Err(Self::invalid(id, "package identifier cannot be empty"));
        }

        if id.len() > MAX_PACKAGE_ID_LENGTH {
            let reason = format!(
                "package identifier is too long ({} bytes). Maximum allowed: {} bytes",
                id.len(),
                MAX_PACKAGE_ID_LENGTH
            );
            return Err(Self::invalid(id, &reason));
        }

        // Alphanumerics plus the separators registries use, and brackets for extras
        if !id
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | '[' | ']'))
        {
            return Err(Self::invalid(
                id,
                "contains invalid characters. Only alphanumeric, hyphens, underscores, dots, and brackets are allowed",
            ));
        }

        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn invalid(value: String, reason: &str) -> anyhow::Error {
        ScanError::InvalidPackageId {
            value,
            reason: reason.to_string(),
        }
        .into()
    }
}

impl std::fmt::Display for PackageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// NewType wrapper for package version with validation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Version(String);

impl Version {
    pub fn new(version: String) -> Result<Self> {
        if version.is_empty() {
            anyhow::bail!("Package version cannot be empty");
        }

        if version.len() > MAX_VERSION_LENGTH {
            anyhow::bail!(
                "Package version is too long ({} bytes). Maximum allowed: {} bytes",
                version.len(),
                MAX_VERSION_LENGTH
            );
        }

        if !version
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '.' | '-' | '+' | '*' | '!'))
        {
            anyhow::bail!(
                "Package version '{}' contains invalid characters. Only alphanumeric, dots, hyphens, plus, bang and asterisks are allowed.",
                version
            );
        }

        Ok(Self(version))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Package value object: an identifier pinned to a version
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Package {
    id: PackageId,
    version: Version,
}

impl Package {
    pub fn new(id: String, version: String) -> Result<Self> {
        Ok(Self {
            id: PackageId::new(id)?,
            version: Version::new(version)?,
        })
    }

    pub fn from_parts(id: PackageId, version: Version) -> Self {
        Self { id, version }
    }

    pub fn id(&self) -> &PackageId {
        &self.id
    }

    pub fn version(&self) -> &Version {
        &self.version
    }
}

impl std::fmt::Display for Package {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.id, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_id_new_valid() {
        let id = PackageId::new("charset-normalizer".to_string()).unwrap();
        assert_eq!(id.as_str(), "charset-normalizer");
    }

    #[test]
    fn test_package_id_allows_extras() {
        assert!(PackageId::new("requests[socks]".to_string()).is_ok());
    }

    #[test]
    fn test_package_id_empty_is_typed_error() {
        let err = PackageId::new("".to_string()).unwrap_err();
        let scan_err = err.downcast_ref::<ScanError>().unwrap();
        assert!(matches!(scan_err, ScanError::InvalidPackageId { .. }));
    }

    #[test]
    fn test_package_id_rejects_whitespace_and_slashes() {
        assert!(PackageId::new("bad name".to_string()).is_err());
        assert!(PackageId::new("../etc/passwd".to_string()).is_err());
    }

    #[test]
    fn test_package_id_too_long() {
        let long = "a".repeat(MAX_PACKAGE_ID_LENGTH + 1);
        let err = PackageId::new(long).unwrap_err();
        assert!(err.to_string().contains("too long"));
    }

    #[test]
    fn test_package_id_is_case_sensitive() {
        let lower = PackageId::new("requests".to_string()).unwrap();
        let upper = PackageId::new("Requests".to_string()).unwrap();
        assert_ne!(lower, upper);
    }

    #[test]
    fn test_version_new_valid() {
        assert_eq!(Version::new("2.31.0".to_string()).unwrap().as_str(), "2.31.0");
        assert!(Version::new("1!2.0.0+local".to_string()).is_ok());
    }

    #[test]
    fn test_version_new_invalid() {
        assert!(Version::new("".to_string()).is_err());
        assert!(Version::new("1.0 beta".to_string()).is_err());
    }

    #[test]
    fn test_package_new_and_display() {
        let package = Package::new("requests".to_string(), "2.31.0".to_string()).unwrap();
        assert_eq!(package.id().as_str(), "requests");
        assert_eq!(package.version().as_str(), "2.31.0");
        assert_eq!(format!("{}", package), "requests@2.31.0");
    }

    #[test]
    fn test_package_serializes_as_plain_strings() {
        let package = Package::new("urllib3".to_string(), "1.26.0".to_string()).unwrap();
        let json = serde_json::to_value(&package).unwrap();
        assert_eq!(json["id"], "urllib3");
        assert_eq!(json["version"], "1.26.0");
    }
}
