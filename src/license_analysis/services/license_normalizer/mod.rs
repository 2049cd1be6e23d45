mod canonical_table;
mod fingerprints;
mod modifications;

use crate::license_analysis::domain::{LicenseId, SourceKind};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Metadata values with at least this many lines are treated as license text
const LICENSE_TEXT_MIN_LINES: usize = 3;

/// Longest word prefix tried when resolving a README phrase
const MAX_PHRASE_WORDS: usize = 12;

const SPDX_HEADER: &str =
    r"(?i)SPDX-License-Identifier:\s*([A-Za-z0-9.+\-]+(?:\s+(?:OR|AND|WITH)\s+[A-Za-z0-9.+\-]+)*)";

/// README patterns, most explicit first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadmePattern {
    SpdxHeader,
    ShieldsBadge,
    LicensedUnder,
    LicenseLabel,
    MarkdownLink,
}

impl ReadmePattern {
    const ALL: [ReadmePattern; 5] = [
        ReadmePattern::SpdxHeader,
        ReadmePattern::ShieldsBadge,
        ReadmePattern::LicensedUnder,
        ReadmePattern::LicenseLabel,
        ReadmePattern::MarkdownLink,
    ];

    fn source(&self) -> &'static str {
        match self {
            ReadmePattern::SpdxHeader => SPDX_HEADER,
            ReadmePattern::ShieldsBadge => r"img\.shields\.io/badge/[Ll]icen[sc]e-((?:[^-/\s)]|--)+)-",
            ReadmePattern::LicensedUnder => {
                r"(?i)licensed\s+under\s+(?:the\s+(?:terms\s+of\s+the\s+)?)?([A-Za-z0-9][A-Za-z0-9.,+\- ]{0,80})"
            }
            ReadmePattern::LicenseLabel => r"(?im)^\W*licen[sc]e\W*:\s*([^\n]{1,80})",
            ReadmePattern::MarkdownLink => r"\[([A-Za-z0-9.\- ]+?)\s+[Ll]icen[sc]e\]\s*\(",
        }
    }

    /// Turns a raw capture into a phrase for table lookup
    fn phrase(&self, captured: &str) -> String {
        match self {
            ReadmePattern::ShieldsBadge => {
                let decoded = urlencoding::decode(captured)
                    .map(|cow| cow.into_owned())
                    .unwrap_or_else(|_| captured.to_string());
                decoded.replace('_', " ").replace("--", "-")
            }
            _ => captured.trim().to_string(),
        }
    }
}

fn readme_patterns() -> &'static [(ReadmePattern, Regex)] {
    static PATTERNS: OnceLock<Vec<(ReadmePattern, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        ReadmePattern::ALL
            .iter()
            .map(|pattern| {
                let regex = Regex::new(pattern.source()).expect("README pattern is a valid regex");
                (*pattern, regex)
            })
            .collect()
    })
}

fn spdx_header() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| Regex::new(SPDX_HEADER).expect("SPDX header pattern is a valid regex"))
}

/// Result of normalizing one raw evidence text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Canonical license, or UNKNOWN
    pub license: LicenseId,
    /// The phrase the source-specific extraction isolated, if any
    pub candidate: Option<String>,
    /// Departures from standard license wording found in license text
    pub modifications: Vec<String>,
}

impl Extraction {
    fn resolved(license: Option<&'static str>, candidate: Option<String>) -> Self {
        Self {
            license: license.map_or(LicenseId::Unknown, LicenseId::canonical),
            candidate,
            modifications: Vec::new(),
        }
    }
}

/// LicenseNormalizer service mapping free-form license text to canonical ids
///
/// Pure and source-aware: the same text can normalize differently depending on
/// where it was found. Anything unrecognized or ambiguous is UNKNOWN; there is
/// no nearest-match guessing.
pub struct LicenseNormalizer;

impl LicenseNormalizer {
    /// Maps raw evidence text to a canonical license id or UNKNOWN
    pub fn normalize(raw_text: &str, source_kind: SourceKind) -> LicenseId {
        Self::extract(raw_text, source_kind).license
    }

    /// Like `normalize`, also returning the extracted phrase
    pub fn extract(raw_text: &str, source_kind: SourceKind) -> Extraction {
        let text = raw_text.trim();
        if text.is_empty() {
            return Extraction::resolved(None, None);
        }

        match source_kind {
            SourceKind::MetadataField => Self::from_metadata(text),
            SourceKind::Classifier => Self::from_classifiers(text),
            SourceKind::LicenseFile => Self::from_license_file(text),
            SourceKind::ReadmeMention => Self::from_readme(text),
        }
    }

    /// Exact or near-exact lookup of a license name in the canonical table
    pub fn lookup_name(name: &str) -> LicenseId {
        canonical_table::lookup(name).map_or(LicenseId::Unknown, LicenseId::canonical)
    }

    /// Every identifier the normalizer can produce
    pub fn known_licenses() -> impl Iterator<Item = &'static str> {
        canonical_table::canonical_ids()
    }

    fn from_metadata(text: &str) -> Extraction {
        if text.lines().count() >= LICENSE_TEXT_MIN_LINES {
            return Self::from_license_file(text);
        }
        Extraction::resolved(canonical_table::lookup(text), Some(text.to_string()))
    }

    /// Classifier text may hold several classifier lines; only `License ::`
    /// lines are considered and their most specific segment is looked up.
    /// A segment that is not in the table counts as disagreement.
    fn from_classifiers(text: &str) -> Extraction {
        if !text.contains("::") {
            return Extraction::resolved(canonical_table::lookup(text), Some(text.to_string()));
        }

        let segments: Vec<&str> = text
            .lines()
            .filter_map(|line| {
                let parts: Vec<&str> = line.split("::").map(str::trim).collect();
                match parts.as_slice() {
                    [first, .., last] if first.eq_ignore_ascii_case("license") => Some(*last),
                    _ => None,
                }
            })
            .filter(|segment| !segment.eq_ignore_ascii_case("OSI Approved"))
            .collect();

        let candidate = segments.first().map(|s| s.to_string());
        let known: Option<BTreeSet<&'static str>> = segments
            .iter()
            .map(|segment| canonical_table::lookup(segment))
            .collect();

        match known {
            Some(known) if known.len() == 1 => Extraction::resolved(known.into_iter().next(), candidate),
            _ => Extraction::resolved(None, candidate),
        }
    }

    fn from_license_file(text: &str) -> Extraction {
        if let Some(captures) = spdx_header().captures(text) {
            let value = captures[1].trim().to_string();
            return Extraction::resolved(canonical_table::lookup(&value), Some(value));
        }

        let matched = fingerprints::match_license_text(text);
        let modifications = modifications::detect(text, matched);

        let mut extraction = match matched {
            Some(license) => Extraction::resolved(Some(license), Some(license.to_string())),
            None => {
                // A file holding only a license name, or opening with one as its title
                let title = text
                    .lines()
                    .map(str::trim)
                    .find(|line| !line.is_empty())
                    .unwrap_or(text);
                let license = canonical_table::lookup(title);
                Extraction::resolved(license, license.map(|_| title.to_string()))
            }
        };
        extraction.modifications = modifications;
        extraction
    }

    /// Only explicit license statements are considered; the first pattern
    /// that yields a known license decides, and disagreement within it is
    /// UNKNOWN.
    fn from_readme(text: &str) -> Extraction {
        let mut first_candidate: Option<String> = None;

        for (pattern, regex) in readme_patterns() {
            let mut resolved: Vec<(String, &'static str)> = Vec::new();

            for captures in regex.captures_iter(text) {
                let phrase = pattern.phrase(&captures[1]);
                if first_candidate.is_none() {
                    first_candidate = Some(phrase.clone());
                }
                if let Some(license) = Self::resolve_phrase(&phrase) {
                    resolved.push((phrase, license));
                }
            }

            if let Some((phrase, license)) = resolved.first() {
                let agree = resolved.iter().all(|(_, other)| other == license);
                let license = if agree { Some(*license) } else { None };
                return Extraction::resolved(license, Some(phrase.clone()));
            }
        }

        Extraction::resolved(None, first_candidate)
    }

    /// Resolves the longest leading word sequence found in the table
    fn resolve_phrase(phrase: &str) -> Option<&'static str> {
        let words: Vec<&str> = phrase.split_whitespace().collect();

        for len in (1..=words.len().min(MAX_PHRASE_WORDS)).rev() {
            if let Some(license) = canonical_table::lookup(&words[..len].join(" ")) {
                // "MIT or Apache-2.0" offers a choice rather than naming one license
                if let [next, rest @ ..] = &words[len..] {
                    if Self::is_conjunction(next) && Self::starts_with_license(rest) {
                        return None;
                    }
                }
                return Some(license);
            }
        }
        None
    }

    fn starts_with_license(words: &[&str]) -> bool {
        let words = match words {
            [article, rest @ ..] if article.eq_ignore_ascii_case("the") => rest,
            _ => words,
        };
        (1..=words.len().min(MAX_PHRASE_WORDS))
            .any(|len| canonical_table::lookup(&words[..len].join(" ")).is_some())
    }

    fn is_conjunction(word: &str) -> bool {
        let key = canonical_table::near_exact_key(word);
        key == "or" || key == "and" || word == "/" || word == "&"
    }
}
