/// Distinctive phrase set for recognizing a license body
///
/// Phrases are written in token-normalized form (see `normalize_tokens`).
/// Every required phrase must occur and no excluded phrase may occur.
struct Fingerprint {
    license: &'static str,
    required: &'static [&'static str],
    excluded: &'static [&'static str],
}

const FINGERPRINTS: &[Fingerprint] = &[
    Fingerprint {
        license: "MIT",
        required: &[
            "permission is hereby granted free of charge",
            "the above copyright notice and this permission notice shall be included",
        ],
        excluded: &[],
    },
    Fingerprint {
        license: "MIT-0",
        required: &[
            "permission is hereby granted free of charge",
            "to deal in the software without restriction",
        ],
        excluded: &["the above copyright notice and this permission notice shall be included"],
    },
    Fingerprint {
        license: "Apache-2.0",
        required: &["apache license", "version 2 0"],
        excluded: &[],
    },
    Fingerprint {
        license: "BSD-3-Clause",
        required: &[
            "redistribution and use in source and binary forms",
            "this list of conditions and the following disclaimer",
            "neither the name of",
        ],
        excluded: &["all advertising materials"],
    },
    Fingerprint {
        license: "BSD-2-Clause",
        required: &[
            "redistribution and use in source and binary forms",
            "this list of conditions and the following disclaimer",
        ],
        excluded: &["neither the name of", "all advertising materials"],
    },
    Fingerprint {
        license: "ISC",
        required: &[
            "permission to use copy modify and or distribute this software for any purpose with or without fee is hereby granted",
            "provided that the above copyright notice and this permission notice appear in all copies",
        ],
        excluded: &[],
    },
    Fingerprint {
        license: "0BSD",
        required: &[
            "permission to use copy modify and or distribute this software for any purpose with or without fee is hereby granted",
        ],
        excluded: &["provided that the above copyright notice and this permission notice appear in all copies"],
    },
    Fingerprint {
        license: "Unlicense",
        required: &["this is free and unencumbered software released into the public domain"],
        excluded: &[],
    },
    Fingerprint {
        license: "CC0-1.0",
        required: &["cc0 1 0 universal"],
        excluded: &[],
    },
    Fingerprint {
        license: "Zlib",
        required: &[
            "altered source versions must be plainly marked as such",
            "this notice may not be removed or altered from any source distribution",
        ],
        excluded: &[],
    },
    Fingerprint {
        license: "PSF-2.0",
        required: &["python software foundation license"],
        excluded: &[],
    },
    Fingerprint {
        license: "BSL-1.0",
        required: &["boost software license version 1 0"],
        excluded: &[],
    },
    Fingerprint {
        license: "MPL-2.0",
        required: &["mozilla public license version 2 0"],
        excluded: &[],
    },
    Fingerprint {
        license: "EPL-2.0",
        required: &["eclipse public license v 2 0"],
        excluded: &[],
    },
    Fingerprint {
        license: "EUPL-1.2",
        required: &["european union public licence v 1 2"],
        excluded: &[],
    },
    Fingerprint {
        license: "LGPL-2.1",
        required: &["gnu lesser general public license version 2 1"],
        excluded: &[],
    },
    Fingerprint {
        license: "LGPL-3.0",
        required: &["gnu lesser general public license version 3"],
        excluded: &[],
    },
    Fingerprint {
        license: "GPL-2.0",
        required: &["gnu general public license", "version 2 june 1991"],
        excluded: &[
            "gnu lesser general public license version",
            "gnu library general public license version",
        ],
    },
    Fingerprint {
        license: "GPL-3.0",
        required: &["gnu general public license", "version 3 29 june 2007"],
        excluded: &["gnu lesser general public license version"],
    },
    Fingerprint {
        license: "AGPL-3.0",
        required: &["gnu affero general public license", "version 3 19 november 2007"],
        excluded: &[],
    },
];

/// Lowercases and reduces text to single-space separated alphanumeric tokens
pub(crate) fn normalize_tokens(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Matches license body text against the known fingerprints
///
/// Returns a license only when exactly one fingerprint matches. Copyright
/// lines and other boilerplate around the body do not affect the result.
pub(crate) fn match_license_text(text: &str) -> Option<&'static str> {
    // Padding keeps phrase matches on token boundaries
    let normalized = format!(" {} ", normalize_tokens(text));
    let contains = |phrase: &str| normalized.contains(&format!(" {} ", phrase));

    let mut matches = FINGERPRINTS.iter().filter(|fingerprint| {
        fingerprint.required.iter().all(|phrase| contains(phrase))
            && !fingerprint.excluded.iter().any(|phrase| contains(phrase))
    });

    match (matches.next(), matches.next()) {
        (Some(only), None) => Some(only.license),
        _ => None,
    }
}

/// Fingerprint sharing the largest fraction of its required phrases with
/// already padded, token-normalized text, without matching fully
///
/// Only fingerprints with several required phrases can match partially.
/// Returns the license with the found and total phrase counts; ties go to
/// the earlier fingerprint.
pub(crate) fn closest_partial_match(padded: &str) -> Option<(&'static str, usize, usize)> {
    let mut best: Option<(&'static str, usize, usize)> = None;

    for fingerprint in FINGERPRINTS.iter().filter(|f| f.required.len() >= 2) {
        let total = fingerprint.required.len();
        let found = fingerprint
            .required
            .iter()
            .filter(|phrase| padded.contains(&format!(" {} ", phrase)))
            .count();
        if found == 0 || found == total {
            continue;
        }
        let better = match best {
            Some((_, best_found, best_total)) => found * best_total > best_found * total,
            None => true,
        };
        if better {
            best = Some((fingerprint.license, found, total));
        }
    }
    best
}
