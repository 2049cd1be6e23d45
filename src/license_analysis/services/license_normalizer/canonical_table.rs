use std::collections::HashMap;
use std::sync::OnceLock;

/// Canonical license identifiers and the spellings that map to them
///
/// Aliases are matched through `near_exact_key`, so case, spacing and
/// punctuation differences between spellings do not need separate entries.
/// Names that do not pin down a single license ("BSD License", "GPL",
/// "Apache Software License") are deliberately absent.
const CANONICAL_LICENSES: &[(&str, &[&str])] = &[
    ("MIT", &["MIT", "MIT License", "Expat", "Expat License"]),
    ("MIT-0", &["MIT-0", "MIT No Attribution"]),
    (
        "Apache-2.0",
        &[
            "Apache-2.0",
            "Apache 2",
            "Apache 2.0",
            "Apache2",
            "ASL 2.0",
            "Apache License 2.0",
            "Apache License, Version 2.0",
            "Apache Software License 2.0",
            "Apache Software License, Version 2.0",
            "Apache License 2.0 (Apache-2.0)",
        ],
    ),
    (
        "BSD-2-Clause",
        &[
            "BSD-2-Clause",
            "BSD 2-Clause License",
            "2-Clause BSD",
            "Simplified BSD",
            "FreeBSD",
        ],
    ),
    (
        "BSD-3-Clause",
        &[
            "BSD-3-Clause",
            "BSD 3-Clause License",
            "3-Clause BSD",
            "New BSD",
            "Modified BSD",
            "Revised BSD",
        ],
    ),
    ("ISC", &["ISC", "ISC License", "ISC License (ISCL)", "ISCL"]),
    ("0BSD", &["0BSD", "Zero-Clause BSD", "BSD Zero Clause License"]),
    ("Unlicense", &["Unlicense", "The Unlicense (Unlicense)"]),
    (
        "CC0-1.0",
        &[
            "CC0-1.0",
            "CC0",
            "CC0 1.0 Universal",
            "CC0 1.0 Universal (CC0 1.0) Public Domain Dedication",
        ],
    ),
    ("Zlib", &["Zlib", "zlib/libpng"]),
    (
        "PSF-2.0",
        &[
            "PSF-2.0",
            "PSF",
            "PSFL",
            "Python Software Foundation",
            "Python Software Foundation License",
        ],
    ),
    (
        "BSL-1.0",
        &[
            "BSL-1.0",
            "Boost Software License 1.0",
            "Boost Software License 1.0 (BSL-1.0)",
        ],
    ),
    (
        "MPL-2.0",
        &[
            "MPL-2.0",
            "MPLv2",
            "Mozilla Public License 2.0",
            "Mozilla Public License 2.0 (MPL 2.0)",
        ],
    ),
    (
        "EPL-2.0",
        &[
            "EPL-2.0",
            "Eclipse Public License 2.0",
            "Eclipse Public License 2.0 (EPL-2.0)",
        ],
    ),
    (
        "EUPL-1.2",
        &[
            "EUPL-1.2",
            "European Union Public Licence 1.2",
            "European Union Public Licence 1.2 (EUPL 1.2)",
        ],
    ),
    (
        "LGPL-2.1",
        &[
            "LGPL-2.1",
            "LGPL-2.1-only",
            "LGPL-2.1-or-later",
            "LGPL-2.1+",
            "LGPLv2.1",
            "LGPLv2.1+",
            "GNU LGPL v2.1",
            "GNU Lesser General Public License v2.1",
        ],
    ),
    (
        "LGPL-3.0",
        &[
            "LGPL-3.0",
            "LGPL-3.0-only",
            "LGPL-3.0-or-later",
            "LGPL-3.0+",
            "LGPLv3",
            "LGPLv3+",
            "GNU LGPL v3",
            "GNU Lesser General Public License v3 (LGPLv3)",
            "GNU Lesser General Public License v3 or later (LGPLv3+)",
        ],
    ),
    (
        "GPL-2.0",
        &[
            "GPL-2.0",
            "GPL-2.0-only",
            "GPLv2",
            "GNU GPL v2",
            "GNU General Public License v2",
            "GNU General Public License v2 (GPLv2)",
            "GNU General Public License version 2",
        ],
    ),
    (
        "GPL-2.0-or-later",
        &[
            "GPL-2.0-or-later",
            "GPL-2.0+",
            "GPLv2+",
            "GNU General Public License v2 or later (GPLv2+)",
        ],
    ),
    (
        "GPL-3.0",
        &[
            "GPL-3.0",
            "GPL-3.0-only",
            "GPL-3.0-or-later",
            "GPL-3.0+",
            "GPLv3",
            "GPLv3+",
            "GNU GPL v3",
            "GNU General Public License v3",
            "GNU General Public License v3 (GPLv3)",
            "GNU General Public License v3 or later (GPLv3+)",
            "GNU General Public License version 3",
        ],
    ),
    (
        "AGPL-3.0",
        &[
            "AGPL-3.0",
            "AGPL-3.0-only",
            "AGPL-3.0-or-later",
            "AGPLv3",
            "AGPLv3+",
            "GNU Affero General Public License v3",
            "GNU Affero General Public License v3 (AGPLv3)",
            "GNU Affero General Public License v3 or later (AGPLv3+)",
        ],
    ),
];

/// Reduces a license name to its comparison key
///
/// Lowercases, spells out `+` as "or later" and drops everything that is not
/// alphanumeric: "GPL-2.0+" and "gpl 2.0 or later" share a key.
pub(crate) fn near_exact_key(name: &str) -> String {
    name.to_lowercase()
        .replace('+', "orlater")
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

fn alias_index() -> &'static HashMap<String, &'static str> {
    static INDEX: OnceLock<HashMap<String, &'static str>> = OnceLock::new();
    INDEX.get_or_init(|| {
        let mut index = HashMap::new();
        for (canonical, aliases) in CANONICAL_LICENSES {
            index.insert(near_exact_key(canonical), *canonical);
            for alias in *aliases {
                index.insert(near_exact_key(alias), *canonical);
            }
        }
        index
    })
}

/// Looks a license name up in the canonical table
///
/// A leading "the" and a trailing "license"/"licence" are ignored when the
/// name itself is not found.
pub(crate) fn lookup(name: &str) -> Option<&'static str> {
    let index = alias_index();
    let key = near_exact_key(name);
    if key.is_empty() {
        return None;
    }
    if let Some(canonical) = index.get(&key) {
        return Some(*canonical);
    }

    let without_article = key.strip_prefix("the").unwrap_or(&key);
    if let Some(canonical) = index.get(without_article) {
        return Some(*canonical);
    }

    let trimmed = without_article
        .strip_suffix("license")
        .or_else(|| without_article.strip_suffix("licence"))?;
    if trimmed.is_empty() {
        return None;
    }
    index.get(trimmed).copied()
}

/// All canonical identifiers in table order
pub(crate) fn canonical_ids() -> impl Iterator<Item = &'static str> {
    CANONICAL_LICENSES.iter().map(|(canonical, _)| *canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_aliases_never_collide() {
        let mut seen: HashMap<String, &str> = HashMap::new();
        for (canonical, aliases) in CANONICAL_LICENSES {
            for name in std::iter::once(canonical).chain(aliases.iter()) {
                let key = near_exact_key(name);
                if let Some(previous) = seen.insert(key.clone(), *canonical) {
                    assert_eq!(previous, *canonical, "alias key '{}' is ambiguous", key);
                }
            }
        }
    }

    #[test]
    fn test_near_exact_key() {
        assert_eq!(near_exact_key("GPL-2.0+"), "gpl20orlater");
        assert_eq!(near_exact_key("GPL 2.0 or later"), "gpl20orlater");
        assert_eq!(near_exact_key("Apache License, Version 2.0"), "apachelicenseversion20");
    }

    #[test]
    fn test_lookup_exact_and_near_exact() {
        assert_eq!(lookup("MIT"), Some("MIT"));
        assert_eq!(lookup("mit license"), Some("MIT"));
        assert_eq!(lookup("The MIT License"), Some("MIT"));
        assert_eq!(lookup("apache-2.0"), Some("Apache-2.0"));
        assert_eq!(lookup("GPL-3.0-or-later"), Some("GPL-3.0"));
        assert_eq!(lookup("GPL-2.0+"), Some("GPL-2.0-or-later"));
        assert_eq!(lookup("The Unlicense"), Some("Unlicense"));
    }

    #[test]
    fn test_lookup_ambiguous_names_are_absent() {
        assert_eq!(lookup("BSD License"), None);
        assert_eq!(lookup("GPL"), None);
        assert_eq!(lookup("Apache"), None);
        assert_eq!(lookup("Apache Software License"), None);
        assert_eq!(lookup("MIT OR Apache-2.0"), None);
        assert_eq!(lookup(""), None);
        assert_eq!(lookup("---"), None);
    }

    #[test]
    fn test_canonical_ids_are_their_own_aliases() {
        for id in canonical_ids() {
            assert_eq!(lookup(id), Some(id));
        }
    }
}
