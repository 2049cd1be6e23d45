use crate::license_analysis::domain::{Package, PackageId};
use crate::shared::Result;

/// DependencyEdgeProvider port listing the direct dependencies of a package
pub trait DependencyEdgeProvider {
    /// Returns the direct dependencies of `package_id`
    ///
    /// Unknown packages have no dependencies.
    ///
    /// # Errors
    /// Returns an error when the edges cannot be loaded or a dependency
    /// carries a malformed identifier.
    fn dependencies_of(&self, package_id: &PackageId) -> Result<Vec<Package>>;
}
