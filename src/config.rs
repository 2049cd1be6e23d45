//! Configuration file support for license-reconciler.
//!
//! Provides YAML-based policy configuration through `.license-reconciler.yml`
//! files: loading, discovery, validation and conversion into the domain
//! `PolicyConfig`.

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use crate::license_analysis::domain::{
    LicenseId, LicenseOverride, PackageId, PolicyConfig, UNKNOWN_LICENSE,
};
use crate::license_analysis::services::LicenseNormalizer;
use crate::shared::error::ScanError;
use crate::shared::security::{read_checked_file, MAX_CONFIG_SIZE};
use crate::shared::Result;

/// File names tried, in order, when discovering a config next to a snapshot
pub const CONFIG_FILENAMES: [&str; 2] = [".license-reconciler.yml", ".license-reconciler.yaml"];

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub allowed_licenses: Option<Vec<String>>,
    pub ignored_packages: Option<Vec<String>>,
    pub overrides: Option<BTreeMap<String, OverrideEntry>>,
    pub max_depth: Option<u32>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// A manual license decision for one package.
#[derive(Debug, Deserialize)]
pub struct OverrideEntry {
    pub license: Option<String>,
    pub reason: Option<String>,
}

fn invalid(details: String) -> anyhow::Error {
    ScanError::Configuration { details }.into()
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = read_checked_file(path, "config file", MAX_CONFIG_SIZE)?;
    parse_config(&content).map_err(|e| {
        anyhow::anyhow!("Failed to load config file: {}\n\n{:#}", path.display(), e)
    })
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<(PathBuf, ConfigFile)>> {
    for name in CONFIG_FILENAMES {
        let config_path = dir.join(name);
        if fs_entry_exists(&config_path) {
            let config = load_config_from_path(&config_path)?;
            return Ok(Some((config_path, config)));
        }
    }
    Ok(None)
}

// symlinks count as present so they are rejected by the read checks
fn fs_entry_exists(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}

/// Parses and validates YAML config text. An empty document is the default config.
pub fn parse_config(content: &str) -> Result<ConfigFile> {
    let value: serde_yaml_ng::Value = serde_yaml_ng::from_str(content)
        .map_err(|e| invalid(format!("invalid YAML: {}", e)))?;

    let config = match value {
        serde_yaml_ng::Value::Null => ConfigFile::default(),
        serde_yaml_ng::Value::Mapping(_) => serde_yaml_ng::from_value(value)
            .map_err(|e| invalid(format!("invalid config structure: {}", e)))?,
        _ => return Err(invalid("the top level must be a mapping".to_string())),
    };

    validate_config(&config)?;
    Ok(config)
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    for (field, entries) in [
        ("allowed_licenses", &config.allowed_licenses),
        ("ignored_packages", &config.ignored_packages),
    ] {
        for (i, entry) in entries.iter().flatten().enumerate() {
            if entry.trim().is_empty() {
                return Err(invalid(format!("{}[{}] must not be empty", field, i)));
            }
        }
    }

    for (package, entry) in config.overrides.iter().flatten() {
        let license = entry.license.as_deref().map(str::trim).unwrap_or_default();
        if license.is_empty() {
            return Err(invalid(format!(
                "overrides.{}.license must not be empty",
                package
            )));
        }
        if license.eq_ignore_ascii_case(UNKNOWN_LICENSE) {
            return Err(invalid(format!(
                "overrides.{}.license must name a license, not {}",
                package, UNKNOWN_LICENSE
            )));
        }
        if entry.reason.as_deref().map(str::trim).unwrap_or_default().is_empty() {
            return Err(invalid(format!(
                "overrides.{}.reason must not be empty",
                package
            )));
        }
    }

    Ok(())
}

/// Maps a configured license name onto the canonical table when it is known
fn canonical_license_name(name: &str) -> String {
    match LicenseNormalizer::lookup_name(name) {
        LicenseId::Canonical(canonical) => canonical,
        LicenseId::Unknown => name.trim().to_string(),
    }
}

fn package_id(field: &str, name: &str) -> Result<PackageId> {
    PackageId::new(name.trim().to_string())
        .map_err(|e| invalid(format!("{} entry '{}': {:#}", field, name, e)))
}

impl ConfigFile {
    /// Names of fields the schema does not know, sorted
    pub fn unknown_field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.unknown_fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Builds the domain policy, extending the file's lists with CLI values
    ///
    /// Allowed licenses and override licenses are mapped onto canonical
    /// ids, so `MIT License` in a config matches a determined `MIT`.
    pub fn to_policy(&self, extra_allowed: &[String], extra_ignored: &[String]) -> Result<PolicyConfig> {
        let allowed: BTreeSet<String> = self
            .allowed_licenses
            .iter()
            .flatten()
            .chain(extra_allowed)
            .map(|name| canonical_license_name(name))
            .collect();

        let ignored = self
            .ignored_packages
            .iter()
            .flatten()
            .chain(extra_ignored)
            .map(|name| package_id("ignored_packages", name))
            .collect::<Result<BTreeSet<_>>>()?;

        let mut overrides = BTreeMap::new();
        for (name, entry) in self.overrides.iter().flatten() {
            let license = entry.license.as_deref().unwrap_or_default();
            let reason = entry.reason.as_deref().unwrap_or_default().trim().to_string();
            overrides.insert(
                package_id("overrides", name)?,
                LicenseOverride::new(LicenseId::canonical(canonical_license_name(license)), reason),
            );
        }

        Ok(PolicyConfig::new(allowed, ignored, overrides))
    }
}
