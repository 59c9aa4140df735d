//! Bold variant lookup by font name

/// Style suffixes stripped to find a font's family name
const STYLE_SUFFIXES: &[&str] = &[
    " Regular", " Italic", " Bold", " Light", " Thin", " Medium", " Black", " Roman",
];

/// Name fragments that already mean "bold"
const BOLD_TERMS: &[&str] = &["Bold", "Black", "Heavy", "Semibold"];

/// Suffixes tried, in order, on the family name
const BOLD_SUFFIXES: &[&str] = &[
    " Bold", "-Bold", " Semibold", "-Semibold", " Heavy", "-Heavy", " Black", "-Black",
];

/// Suffixes replaced by " Bold" in the direct variation
const PLAIN_SUFFIXES: &[&str] = &[" Regular", " Italic", " Roman"];

/// Lowercase bold fragments for the fuzzy scan
const BOLD_TERMS_LOWER: &[&str] = &["bold", "semibold", "heavy", "black"];

fn strip_first_suffix<'a>(name: &'a str, suffixes: &[&str]) -> &'a str {
    suffixes
        .iter()
        .find_map(|suffix| name.strip_suffix(suffix))
        .unwrap_or(name)
}

/// Family part of a full font name, e.g. `"Liberation Serif"` for
/// `"Liberation Serif Regular"`
pub fn family_name(font: &str) -> String {
    font.replace(" Regular", "").replace(" Normal", "").trim().to_string()
}

/// Find an installed bold variant of `name`.
///
/// A name that already looks bold is returned as is. Otherwise known bold
/// suffixes are tried on the family name, then `" Bold"` in place of a plain
/// style suffix, and finally any installed font containing the family name
/// and a bold term, ignoring case.
pub fn find_bold_variant(name: &str, available: &[String]) -> Option<String> {
    let is_available = |candidate: &str| available.iter().any(|font| font == candidate);
    let base = strip_first_suffix(name, STYLE_SUFFIXES);

    if BOLD_TERMS.iter().any(|term| name.contains(term)) {
        return Some(name.to_string());
    }

    for suffix in BOLD_SUFFIXES {
        let candidate = format!("{}{}", base, suffix);
        if is_available(&candidate) {
            return Some(candidate);
        }
    }

    let direct = format!("{} Bold", strip_first_suffix(name, PLAIN_SUFFIXES));
    if direct != name && is_available(&direct) {
        return Some(direct);
    }

    let base_lower = base.to_lowercase();
    available
        .iter()
        .find(|font| {
            let lower = font.to_lowercase();
            font.as_str() != name
                && lower.contains(&base_lower)
                && BOLD_TERMS_LOWER.iter().any(|term| lower.contains(term))
        })
        .cloned()
}
