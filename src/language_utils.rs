use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// Translators take tags such as `en`, `id`, `zh-CN` or `pt_BR`. Only the
/// primary subtag is checked against ISO 639; region suffixes pass as given.

/// Source language value that lets the translator detect the language
pub const AUTO_DETECT: &str = "auto";

/// ISO 639-2/B codes that differ from their ISO 639-2/T form
const BIBLIOGRAPHIC_CODES: [(&str, &str); 18] = [
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

/// Lowercased primary subtag of a language tag (`zh-CN` -> `zh`)
pub fn primary_subtag(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Resolve a language tag to its ISO 639 entry
fn lookup(code: &str) -> Option<Language> {
    let primary = primary_subtag(code);
    match primary.len() {
        2 => Language::from_639_1(&primary),
        3 => {
            let part2t = BIBLIOGRAPHIC_CODES
                .iter()
                .find(|(bibliographic, _)| *bibliographic == primary)
                .map(|(_, terminology)| *terminology)
                .unwrap_or(primary.as_str());
            Language::from_639_3(part2t)
        }
        _ => None,
    }
}

/// Validate a language tag whose primary subtag is an ISO 639-1 or ISO 639-2 code
pub fn validate_language_code(code: &str) -> Result<()> {
    lookup(code)
        .map(|_| ())
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Validate a source language tag, which may also ask for auto-detection
pub fn validate_source_language(code: &str) -> Result<()> {
    if code.trim().eq_ignore_ascii_case(AUTO_DETECT) {
        return Ok(());
    }
    validate_language_code(code)
}

/// Get the English language name from a tag
pub fn get_language_name(code: &str) -> Result<String> {
    if code.trim().eq_ignore_ascii_case(AUTO_DETECT) {
        return Ok("Auto-detect".to_string());
    }
    lookup(code)
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))
}

/// Format a tag for console output, e.g. `Indonesian (id)`
pub fn describe_language(code: &str) -> String {
    match get_language_name(code) {
        Ok(name) => format!("{} ({})", name, code),
        Err(_) => code.to_string(),
    }
}
