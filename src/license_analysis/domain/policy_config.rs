use super::{LicenseId, PackageId};
use std::collections::{BTreeMap, BTreeSet};

/// A manual license assignment for one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseOverride {
    license: LicenseId,
    reason: String,
}

impl LicenseOverride {
    pub fn new(license: LicenseId, reason: String) -> Self {
        Self { license, reason }
    }

    pub fn license(&self) -> &LicenseId {
        &self.license
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Read-only policy input for one scan
///
/// An empty allow-list means no license restriction is enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyConfig {
    allowed_licenses: BTreeSet<String>,
    ignored_packages: BTreeSet<PackageId>,
    overrides: BTreeMap<PackageId, LicenseOverride>,
}

impl PolicyConfig {
    pub fn new(
        allowed_licenses: BTreeSet<String>,
        ignored_packages: BTreeSet<PackageId>,
        overrides: BTreeMap<PackageId, LicenseOverride>,
    ) -> Self {
        Self {
            allowed_licenses,
            ignored_packages,
            overrides,
        }
    }

    pub fn allowed_licenses(&self) -> &BTreeSet<String> {
        &self.allowed_licenses
    }

    pub fn ignored_packages(&self) -> &BTreeSet<PackageId> {
        &self.ignored_packages
    }

    pub fn overrides(&self) -> &BTreeMap<PackageId, LicenseOverride> {
        &self.overrides
    }

    pub fn is_ignored(&self, package: &PackageId) -> bool {
        self.ignored_packages.contains(package)
    }

    pub fn override_for(&self, package: &PackageId) -> Option<&LicenseOverride> {
        self.overrides.get(package)
    }

    /// Whether `license` passes the allow-list
    pub fn permits(&self, license: &LicenseId) -> bool {
        self.allowed_licenses.is_empty() || self.allowed_licenses.contains(license.as_str())
    }
}
