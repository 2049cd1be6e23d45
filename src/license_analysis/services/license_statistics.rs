use crate::license_analysis::domain::{
    CategoryStatistics, LicenseCategory, LicenseDetermination, LicenseId, LicenseStatistics,
};
use crate::license_analysis::policies::CompatibilityRuleset;
use std::collections::{BTreeMap, BTreeSet};

/// Computes the license category distribution over a set of determinations
pub struct LicenseStatisticsCalculator;

impl LicenseStatisticsCalculator {
    pub fn calculate<'a, I>(determinations: I, ruleset: &CompatibilityRuleset) -> LicenseStatistics
    where
        I: IntoIterator<Item = &'a LicenseDetermination>,
    {
        let mut grouped: BTreeMap<LicenseCategory, (usize, BTreeSet<LicenseId>)> = BTreeMap::new();
        let mut total = 0usize;

        for determination in determinations {
            let license = determination.canonical_license();
            let entry = grouped.entry(ruleset.category(license)).or_default();
            entry.0 += 1;
            entry.1.insert(license.clone());
            total += 1;
        }

        let by_category = grouped
            .into_iter()
            .map(|(category, (count, licenses))| {
                let percentage = (count as f64 / total as f64 * 1000.0).round() / 10.0;
                (category, CategoryStatistics::new(count, percentage, licenses))
            })
            .collect();

        LicenseStatistics::new(total, by_category)
    }
}
