use super::{LicenseCategory, LicenseId};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Package count for one license category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStatistics {
    count: usize,
    percentage: f64,
    licenses: BTreeSet<LicenseId>,
}

impl CategoryStatistics {
    pub fn new(count: usize, percentage: f64, licenses: BTreeSet<LicenseId>) -> Self {
        Self {
            count,
            percentage,
            licenses,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    pub fn licenses(&self) -> &BTreeSet<LicenseId> {
        &self.licenses
    }
}

/// License distribution over the scanned (non-ignored) dependencies
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LicenseStatistics {
    total_packages: usize,
    by_category: BTreeMap<LicenseCategory, CategoryStatistics>,
}

impl LicenseStatistics {
    pub fn new(
        total_packages: usize,
        by_category: BTreeMap<LicenseCategory, CategoryStatistics>,
    ) -> Self {
        Self {
            total_packages,
            by_category,
        }
    }

    pub fn total_packages(&self) -> usize {
        self.total_packages
    }

    pub fn by_category(&self) -> &BTreeMap<LicenseCategory, CategoryStatistics> {
        &self.by_category
    }

    pub fn count_for(&self, category: LicenseCategory) -> usize {
        self.by_category.get(&category).map_or(0, |c| c.count())
    }
}
