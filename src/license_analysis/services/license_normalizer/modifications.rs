use super::fingerprints::{self, normalize_tokens};

/// Clauses that narrow a permissive grant, in token-normalized form
///
/// Bare "non commercial" is left out: the Unlicense grants use "for any
/// purpose, commercial or non-commercial".
const RESTRICTION_PHRASES: &[&str] = &[
    "for non commercial use",
    "non commercial use only",
    "no commercial use",
    "not for commercial use",
    "personal use only",
    "educational use only",
    "internal use only",
    "restricted to",
    "not permitted to",
    "may not be sold",
];

/// Wording that adds terms on top of a short permissive license
const ADDED_TERMS_PHRASES: &[(&str, &str)] = &[
    ("additional terms", "Additional terms"),
    ("additional conditions", "Additional conditions"),
    ("additional restrictions", "Additional restrictions"),
    ("with the exception of", "Exception clause"),
    ("notwithstanding", "Notwithstanding clause"),
    ("amendment", "Amendment"),
];

/// Licenses short enough that any added terms are a deviation from the
/// standard wording. Longer licenses use these words in their own text.
const SHORT_PERMISSIVE: &[&str] = &[
    "MIT", "MIT-0", "BSD-2-Clause", "BSD-3-Clause", "ISC", "0BSD", "Zlib", "Unlicense",
];

/// Describes how license text departs from the standard wording
///
/// `matched` is the license the fingerprints recognized, if any. Without a
/// match, text sharing part of a fingerprint is reported as a partial
/// match. Detection is audit-only and never changes the recognized license.
pub(crate) fn detect(text: &str, matched: Option<&str>) -> Vec<String> {
    let normalized = format!(" {} ", normalize_tokens(text));
    let contains = |phrase: &str| normalized.contains(&format!(" {} ", phrase));

    let mut modifications: Vec<String> = RESTRICTION_PHRASES
        .iter()
        .filter(|&&phrase| contains(phrase))
        .map(|phrase| format!("Additional restriction: '{}'", phrase))
        .collect();

    match matched {
        Some(license) if SHORT_PERMISSIVE.contains(&license) => {
            modifications.extend(
                ADDED_TERMS_PHRASES
                    .iter()
                    .filter(|&&(phrase, _)| contains(phrase))
                    .map(|&(_, description)| format!("{} added to {} text", description, license)),
            );
        }
        Some(_) => {}
        None => {
            if let Some((license, found, total)) = fingerprints::closest_partial_match(&normalized) {
                modifications.push(format!(
                    "Text resembles {} but matches only {} of {} distinctive phrases",
                    license, found, total
                ));
            }
        }
    }

    modifications
}
