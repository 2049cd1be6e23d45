use crate::license_analysis::domain::{LicenseCategory, LicenseId, UNKNOWN_LICENSE};
use crate::shared::error::ScanError;
use crate::shared::Result;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// Ruleset shipped with the binary
const BUILTIN_RULESET: &str = include_str!("../../../data/compatibility_rules.json");

const SUPPORTED_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RulesetFile {
    schema_version: u32,
    #[serde(default)]
    families: BTreeMap<String, FamilyDefinition>,
    #[serde(default)]
    family_rules: Vec<RuleDefinition>,
    #[serde(default)]
    pair_rules: Vec<RuleDefinition>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FamilyDefinition {
    category: LicenseCategory,
    licenses: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleDefinition {
    between: Vec<String>,
    compatible: bool,
    rationale: String,
}

/// A modeled compatibility fact for one license pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityRule {
    pub compatible: bool,
    pub rationale: String,
}

/// Static, symmetric compatibility relation over canonical license ids
///
/// Stored sparsely, keyed by the ordered pair. Pairs that are absent have no
/// modeled verdict; callers decide what absence means.
#[derive(Debug, Clone)]
pub struct CompatibilityRuleset {
    relation: HashMap<(LicenseId, LicenseId), CompatibilityRule>,
    categories: HashMap<LicenseId, LicenseCategory>,
}

impl CompatibilityRuleset {
    /// Loads the ruleset embedded in the binary
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_RULESET)
    }

    /// Parses and validates a ruleset document
    pub fn from_json(content: &str) -> Result<Self> {
        let file: RulesetFile = serde_json::from_str(content).map_err(|e| ScanError::Schema {
            details: format!("Compatibility ruleset is not valid: {}", e),
        })?;

        if file.schema_version != SUPPORTED_SCHEMA_VERSION {
            return Err(schema_error(format!(
                "unsupported schema_version {} (expected {})",
                file.schema_version, SUPPORTED_SCHEMA_VERSION
            )));
        }

        let mut categories = HashMap::new();
        let mut members: HashMap<&str, Vec<LicenseId>> = HashMap::new();
        for (family, definition) in &file.families {
            let mut licenses = Vec::new();
            for raw in &definition.licenses {
                let license = parse_license(raw, &format!("family '{}'", family))?;
                if categories.insert(license.clone(), definition.category).is_some() {
                    return Err(schema_error(format!(
                        "license '{}' appears in more than one family",
                        license
                    )));
                }
                licenses.push(license);
            }
            members.insert(family.as_str(), licenses);
        }

        // Family rules first; pair rules then replace whatever the families said
        let mut family_relation = HashMap::new();
        for (position, rule) in file.family_rules.iter().enumerate() {
            let context = format!("family_rules[{}]", position);
            let (first, second) = rule_endpoints(rule, &context)?;
            let left = members.get(first.as_str()).ok_or_else(|| {
                schema_error(format!("{} references unknown family '{}'", context, first))
            })?;
            let right = members.get(second.as_str()).ok_or_else(|| {
                schema_error(format!("{} references unknown family '{}'", context, second))
            })?;

            for a in left {
                for b in right {
                    if a != b {
                        insert_rule(&mut family_relation, a.clone(), b.clone(), rule, &context)?;
                    }
                }
            }
        }

        let mut pair_relation = HashMap::new();
        for (position, rule) in file.pair_rules.iter().enumerate() {
            let context = format!("pair_rules[{}]", position);
            let (first, second) = rule_endpoints(rule, &context)?;
            let a = parse_license(first, &context)?;
            let b = parse_license(second, &context)?;
            if a == b {
                return Err(schema_error(format!(
                    "{} pairs '{}' with itself",
                    context, a
                )));
            }
            insert_rule(&mut pair_relation, a, b, rule, &context)?;
        }

        let mut relation = family_relation;
        relation.extend(pair_relation);

        Ok(Self {
            relation,
            categories,
        })
    }

    /// Modeled rule for a pair, in either order
    pub fn lookup(&self, a: &LicenseId, b: &LicenseId) -> Option<&CompatibilityRule> {
        self.relation.get(&ordered(a.clone(), b.clone()))
    }

    /// Category of a license; unknown when it belongs to no family
    pub fn category(&self, license: &LicenseId) -> LicenseCategory {
        self.categories
            .get(license)
            .copied()
            .unwrap_or(LicenseCategory::Unknown)
    }

    pub fn rule_count(&self) -> usize {
        self.relation.len()
    }
}

fn schema_error(details: String) -> anyhow::Error {
    ScanError::Schema { details }.into()
}

fn ordered(a: LicenseId, b: LicenseId) -> (LicenseId, LicenseId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn parse_license(raw: &str, context: &str) -> Result<LicenseId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(schema_error(format!("{} contains a blank license", context)));
    }
    if trimmed == UNKNOWN_LICENSE {
        return Err(schema_error(format!(
            "{} uses the reserved identifier {}",
            context, UNKNOWN_LICENSE
        )));
    }
    Ok(LicenseId::canonical(trimmed))
}

fn rule_endpoints<'a>(rule: &'a RuleDefinition, context: &str) -> Result<(&'a String, &'a String)> {
    if rule.rationale.trim().is_empty() {
        return Err(schema_error(format!("{} has a blank rationale", context)));
    }
    match rule.between.as_slice() {
        [first, second] => Ok((first, second)),
        other => Err(schema_error(format!(
            "{} 'between' must name exactly 2 entries, found {}",
            context,
            other.len()
        ))),
    }
}

fn insert_rule(
    relation: &mut HashMap<(LicenseId, LicenseId), CompatibilityRule>,
    a: LicenseId,
    b: LicenseId,
    rule: &RuleDefinition,
    context: &str,
) -> Result<()> {
    let key = ordered(a, b);
    if let Some(existing) = relation.get(&key) {
        if existing.compatible != rule.compatible {
            return Err(schema_error(format!(
                "{} contradicts an earlier rule for {} / {}",
                context, key.0, key.1
            )));
        }
        return Ok(());
    }
    relation.insert(
        key,
        CompatibilityRule {
            compatible: rule.compatible,
            rationale: rule.rationale.clone(),
        },
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lic(id: &str) -> LicenseId {
        LicenseId::canonical(id)
    }

    fn schema_details(result: Result<CompatibilityRuleset>) -> String {
        let err = result.unwrap_err();
        match err.downcast_ref::<ScanError>() {
            Some(ScanError::Schema { details }) => details.clone(),
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_builtin_ruleset_loads() {
        let ruleset = CompatibilityRuleset::builtin().unwrap();
        assert!(ruleset.rule_count() > 0);
        assert_eq!(ruleset.category(&lic("MIT")), LicenseCategory::Permissive);
        assert_eq!(ruleset.category(&lic("AGPL-3.0")), LicenseCategory::NetworkCopyleft);
        assert_eq!(ruleset.category(&lic("EUPL-1.2")), LicenseCategory::Unknown);
    }

    #[test]
    fn test_builtin_lookup_is_symmetric() {
        let ruleset = CompatibilityRuleset::builtin().unwrap();
        let forward = ruleset.lookup(&lic("GPL-2.0"), &lic("GPL-3.0")).unwrap();
        let backward = ruleset.lookup(&lic("GPL-3.0"), &lic("GPL-2.0")).unwrap();
        assert_eq!(forward, backward);
        assert!(!forward.compatible);
    }

    #[test]
    fn test_pair_rule_overrides_family_rule() {
        let ruleset = CompatibilityRuleset::builtin().unwrap();
        let rule = ruleset.lookup(&lic("Apache-2.0"), &lic("GPL-2.0")).unwrap();
        assert!(!rule.compatible);
        assert!(rule.rationale.contains("patent"));

        let mit_gpl2 = ruleset.lookup(&lic("MIT"), &lic("GPL-2.0")).unwrap();
        assert!(mit_gpl2.compatible);
    }

    #[test]
    fn test_unmodeled_pair_has_no_rule() {
        let ruleset = CompatibilityRuleset::builtin().unwrap();
        assert!(ruleset.lookup(&lic("EPL-2.0"), &lic("GPL-3.0")).is_none());
        assert!(ruleset.lookup(&lic("MIT"), &lic("MIT")).is_none());
    }

    #[test]
    fn test_rejects_unsupported_schema_version() {
        let details = schema_details(CompatibilityRuleset::from_json(r#"{"schema_version": 2}"#));
        assert!(details.contains("schema_version 2"));
    }

    #[test]
    fn test_rejects_unknown_family() {
        let json = r#"{
            "schema_version": 1,
            "families": {"permissive": {"category": "permissive", "licenses": ["MIT"]}},
            "family_rules": [{"between": ["permissive", "nope"], "compatible": true, "rationale": "x"}]
        }"#;
        let details = schema_details(CompatibilityRuleset::from_json(json));
        assert!(details.contains("unknown family 'nope'"));
    }

    #[test]
    fn test_rejects_license_in_two_families() {
        let json = r#"{
            "schema_version": 1,
            "families": {
                "a": {"category": "permissive", "licenses": ["MIT"]},
                "b": {"category": "strong_copyleft", "licenses": ["MIT"]}
            }
        }"#;
        let details = schema_details(CompatibilityRuleset::from_json(json));
        assert!(details.contains("more than one family"));
    }

    #[test]
    fn test_rejects_contradictory_pair_rules() {
        let json = r#"{
            "schema_version": 1,
            "pair_rules": [
                {"between": ["MIT", "Zlib"], "compatible": true, "rationale": "x"},
                {"between": ["Zlib", "MIT"], "compatible": false, "rationale": "y"}
            ]
        }"#;
        let details = schema_details(CompatibilityRuleset::from_json(json));
        assert!(details.contains("contradicts"));
    }

    #[test]
    fn test_rejects_malformed_rules() {
        let wrong_arity = r#"{
            "schema_version": 1,
            "pair_rules": [{"between": ["MIT"], "compatible": true, "rationale": "x"}]
        }"#;
        assert!(schema_details(CompatibilityRuleset::from_json(wrong_arity)).contains("exactly 2"));

        let blank_rationale = r#"{
            "schema_version": 1,
            "pair_rules": [{"between": ["MIT", "ISC"], "compatible": true, "rationale": " "}]
        }"#;
        assert!(schema_details(CompatibilityRuleset::from_json(blank_rationale)).contains("blank rationale"));

        let reserved = r#"{
            "schema_version": 1,
            "pair_rules": [{"between": ["MIT", "UNKNOWN"], "compatible": true, "rationale": "x"}]
        }"#;
        assert!(schema_details(CompatibilityRuleset::from_json(reserved)).contains("reserved"));
    }

    #[test]
    fn test_rejects_invalid_json_and_unknown_fields() {
        assert!(CompatibilityRuleset::from_json("not json").is_err());
        assert!(CompatibilityRuleset::from_json(r#"{"schema_version": 1, "extra": 1}"#).is_err());
    }
}
