use crate::license_analysis::domain::{
    Compatibility, CompatibilityReport, CompatibilityVerdict, LicenseId,
};
use crate::license_analysis::policies::CompatibilityRuleset;
use std::collections::BTreeSet;

/// CompatibilityEngine service evaluating license pairs against a ruleset
pub struct CompatibilityEngine;

impl CompatibilityEngine {
    /// Verdict for a single pair; symmetric in its arguments
    pub fn verdict(a: &LicenseId, b: &LicenseId, ruleset: &CompatibilityRuleset) -> CompatibilityVerdict {
        let (compatible, rationale) = if a.is_unknown() || b.is_unknown() {
            (
                Compatibility::Unknown,
                "Cannot determine compatibility with an unknown license".to_string(),
            )
        } else if a == b {
            (Compatibility::Compatible, "Same license".to_string())
        } else if let Some(rule) = ruleset.lookup(a, b) {
            (Compatibility::from_bool(rule.compatible), rule.rationale.clone())
        } else {
            let (first, second) = if a <= b { (a, b) } else { (b, a) };
            (
                Compatibility::Unknown,
                format!("No compatibility rule covers {} and {}", first, second),
            )
        };

        CompatibilityVerdict::new(a.clone(), b.clone(), compatible, rationale)
    }

    /// Evaluates every unordered pair of distinct licenses
    ///
    /// The aggregate is false if any pair is false, UNKNOWN if any pair is
    /// UNKNOWN, otherwise true. An UNKNOWN license in the set is paired with
    /// itself, since it is not known to be a single license.
    pub fn evaluate<'a, I>(licenses: I, ruleset: &CompatibilityRuleset) -> CompatibilityReport
    where
        I: IntoIterator<Item = &'a LicenseId>,
    {
        let distinct: Vec<LicenseId> = licenses
            .into_iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut verdicts = Vec::new();
        for (i, a) in distinct.iter().enumerate() {
            for b in &distinct[i + 1..] {
                verdicts.push(Self::verdict(a, b, ruleset));
            }
        }
        if distinct.contains(&LicenseId::Unknown) {
            verdicts.push(Self::verdict(&LicenseId::Unknown, &LicenseId::Unknown, ruleset));
        }

        CompatibilityReport::new(distinct, verdicts)
    }
}
